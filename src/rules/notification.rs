//! Push-notification rules: remote-notification delegate handling and the
//! `content-available` payload flag.

use tree_sitter::Node;

use crate::analysis::{classify, syntax, NodeKind, SourceFile};

use super::findings::{Finding, FindingStore};
use super::types::Category;
use super::RuleVisitor;

const NOTIFICATION_HANDLING: &str = "notificationHandling";
const CONTENT_AVAILABLE_FLAG: &str = "contentAvailableFlag";

const HANDLER_NOTE: &str = "Remote notification handler detected. Invoke the fetch completion handler promptly once processing finishes so the system does not throttle background delivery.";
const CONTENT_AVAILABLE_ON_NOTE: &str = "content-available is set to 1, so the app is woken for background processing on every delivery. Make sure the handler finishes quickly and calls its completion handler.";
const CONTENT_AVAILABLE_OFF_NOTE: &str =
    "content-available is set to 0, so the notification is delivered without waking the app in the background.";

/// Visitor for the push-notification category.
pub struct NotificationVisitor {
    store: FindingStore,
}

impl NotificationVisitor {
    pub fn new() -> Self {
        Self {
            store: FindingStore::new(),
        }
    }

    /// The UIApplicationDelegate remote-notification method: a function
    /// named `application` carrying a `didReceiveRemoteNotification`
    /// argument label and a `UIApplication` parameter.
    fn check_delegate_signature(&mut self, node: Node<'_>, file: &SourceFile) {
        if syntax::function_name(file, node) != Some("application") {
            return;
        }
        let parameters = syntax::function_parameters(node);
        let has_notification_label = parameters
            .iter()
            .any(|p| syntax::parameter_first_name(file, *p) == Some("didReceiveRemoteNotification"));
        let has_application_parameter = parameters
            .iter()
            .any(|p| syntax::parameter_type_text(file, *p) == Some("UIApplication"));
        if has_notification_label && has_application_parameter {
            self.store
                .flag(NOTIFICATION_HANDLING, file.position(node), HANDLER_NOTE);
        }
    }

    fn check_content_available(&mut self, node: Node<'_>, file: &SourceFile) {
        for (key, value) in syntax::dictionary_entries(node) {
            if !file.node_text(key).contains("content-available") {
                continue;
            }
            let observed = syntax::int_literal(file, value);
            self.store
                .observe(CONTENT_AVAILABLE_FLAG, observed.map(|v| v.to_string()));
            match observed {
                Some(1) => self.store.flag(
                    CONTENT_AVAILABLE_FLAG,
                    file.position(key),
                    CONTENT_AVAILABLE_ON_NOTE,
                ),
                Some(0) => self
                    .store
                    .recommend(CONTENT_AVAILABLE_FLAG, CONTENT_AVAILABLE_OFF_NOTE),
                _ => {}
            }
        }
    }
}

impl Default for NotificationVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleVisitor for NotificationVisitor {
    fn category(&self) -> Category {
        Category::PushNotification
    }

    fn visit_node(&mut self, node: Node<'_>, file: &SourceFile) {
        match classify(node) {
            NodeKind::FunctionDecl => self.check_delegate_signature(node, file),
            NodeKind::DictionaryLiteral => self.check_content_available(node, file),
            _ => {}
        }
    }

    fn take_findings(&mut self) -> Vec<Finding> {
        self.store.take_findings()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::rules::walk;

    fn run(source: &str) -> Vec<Finding> {
        let file = SourceFile::parse(Path::new("AppDelegate.swift"), source.as_bytes()).unwrap();
        let mut visitor = NotificationVisitor::new();
        walk(&file, &mut visitor);
        visitor.take_findings()
    }

    fn finding<'a>(findings: &'a [Finding], property: &str) -> Option<&'a Finding> {
        findings.iter().find(|f| f.property == property)
    }

    #[test]
    fn test_remote_notification_delegate_flagged() {
        let findings = run(
            "func application(_ application: UIApplication, didReceiveRemoteNotification userInfo: [AnyHashable: Any]) {\n    handle(userInfo)\n}\n",
        );
        let finding = finding(&findings, NOTIFICATION_HANDLING).unwrap();
        assert!(finding.impact.flagged);
        assert_eq!(finding.impact.locations.len(), 1);
    }

    #[test]
    fn test_unrelated_application_method_not_flagged() {
        let findings = run(
            "func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey: Any]?) -> Bool {\n    return true\n}\n",
        );
        assert!(finding(&findings, NOTIFICATION_HANDLING).is_none());
    }

    #[test]
    fn test_content_available_one_flagged() {
        let findings = run("let payload = [\"aps\": 1, \"content-available\": 1]\n");
        let finding = finding(&findings, CONTENT_AVAILABLE_FLAG).unwrap();
        assert!(finding.impact.flagged);
        assert_eq!(finding.impact.last_value.as_deref(), Some("1"));
        assert_eq!(finding.impact.recommendation, Some(CONTENT_AVAILABLE_ON_NOTE));
    }

    #[test]
    fn test_content_available_zero_observed_not_flagged() {
        let findings = run("let payload = [\"content-available\": 0]\n");
        let finding = finding(&findings, CONTENT_AVAILABLE_FLAG).unwrap();
        assert!(finding.impact.observed);
        assert!(!finding.impact.flagged);
        assert_eq!(finding.impact.recommendation, Some(CONTENT_AVAILABLE_OFF_NOTE));
    }
}
