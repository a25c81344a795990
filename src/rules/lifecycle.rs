//! App-lifecycle rules: background work and missing pause handling.
//!
//! Both rules match on rendered statement text, not resolved calls, so
//! they over-approximate.

use tree_sitter::Node;

use crate::analysis::{classify, syntax, NodeKind, SourceFile};

use super::findings::{Finding, FindingStore};
use super::types::Category;
use super::RuleVisitor;

const BACKGROUND_OPERATIONS: &str = "backgroundOperations";
const RESIGN_ACTIVE_HANDLING: &str = "resignActiveHandling";

const BACKGROUND_NOTE: &str = "Heavy operations detected in applicationDidEnterBackground. Consider moving these operations to a more appropriate lifecycle method or using background tasks.";
const RESIGN_ACTIVE_NOTE: &str = "No pause/stop operations found in applicationWillResignActive. Consider adding appropriate pause/stop operations for network tasks and heavy computations.";

/// Call and type names that indicate network work or heavy computation.
static SUSPICIOUS_NAMES: &[&str] = &[
    "URLSession",
    "dataTask",
    "downloadTask",
    "uploadTask",
    "fetch",
    "download",
    "upload",
    "request",
    "performLongTask",
    "process",
    "calculate",
    "compute",
];

/// Case-insensitive markers expected in a resign-active handler.
static PAUSE_MARKERS: &[&str] = &["pause", "stop", "suspend", "cancel"];

/// Visitor for the app-lifecycle category.
pub struct LifecycleVisitor {
    store: FindingStore,
}

impl LifecycleVisitor {
    pub fn new() -> Self {
        Self {
            store: FindingStore::new(),
        }
    }

    fn check_background_method(&mut self, node: Node<'_>, file: &SourceFile) {
        let suspicious = syntax::function_body_statements(node).iter().any(|statement| {
            let text = file.node_text(*statement);
            SUSPICIOUS_NAMES.iter().any(|name| text.contains(name))
        });
        if suspicious {
            self.store
                .flag(BACKGROUND_OPERATIONS, file.position(node), BACKGROUND_NOTE);
        }
    }

    fn check_resign_active_method(&mut self, node: Node<'_>, file: &SourceFile) {
        let has_pause = syntax::function_body_statements(node).iter().any(|statement| {
            let text = file.node_text(*statement).to_lowercase();
            PAUSE_MARKERS.iter().any(|marker| text.contains(marker))
        });
        if !has_pause {
            self.store.flag(
                RESIGN_ACTIVE_HANDLING,
                file.position(node),
                RESIGN_ACTIVE_NOTE,
            );
        }
    }
}

impl Default for LifecycleVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleVisitor for LifecycleVisitor {
    fn category(&self) -> Category {
        Category::AppLifecycle
    }

    fn visit_node(&mut self, node: Node<'_>, file: &SourceFile) {
        if classify(node) != NodeKind::FunctionDecl {
            return;
        }
        match syntax::function_name(file, node) {
            Some("applicationDidEnterBackground") => self.check_background_method(node, file),
            Some("applicationWillResignActive") => self.check_resign_active_method(node, file),
            _ => {}
        }
    }

    fn take_findings(&mut self) -> Vec<Finding> {
        self.store.take_findings()
    }
}
