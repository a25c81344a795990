//! Data-caching rules: URLCache configuration and request cache policy.

use phf::phf_map;
use tree_sitter::Node;

use crate::analysis::{classify, syntax, NodeKind, SourceFile};

use super::findings::{Finding, FindingStore};
use super::properties::{apply_assignment_policy, AssignmentPolicy, PropertyRule};
use super::types::Category;
use super::RuleVisitor;

const URL_CACHE: &str = "urlCache";

const SHARED_CACHE_NOTE: &str = "Using shared URLCache. Consider implementing a custom URLCache with appropriate memory and disk capacity limits. The default shared cache might not be optimal for your app's specific needs.";
const CUSTOM_CACHE_NOTE: &str = "Custom URLCache configuration detected. Make sure to set appropriate memory and disk capacity limits.";
const CONSTRUCTED_CACHE_NOTE: &str = "Custom URLCache initialized. Make sure to set appropriate memory and disk capacity limits.";
const CACHE_ACCESS_NOTE: &str = "URLCache property is being accessed. Consider implementing a custom URLCache with appropriate memory and disk capacity limits.";

static CACHE_POLICY_CASES: phf::Map<&'static str, &'static str> = phf_map! {
    "useProtocolCachePolicy" => "Using .useProtocolCachePolicy relies on the server's cache headers. Verify the server returns correct cache control for your endpoints.",
    "returnCacheDataElseLoad" => "Using .returnCacheDataElseLoad may serve stale data whenever a cached response exists. Make sure staleness is acceptable for this request.",
    "returnCacheDataDontLoad" => "Using .returnCacheDataDontLoad may result in stale data. Make sure this is intended for your use case.",
};

static CACHE_POLICY_RULE: PropertyRule = PropertyRule {
    property: "requestCachePolicy",
    policy: AssignmentPolicy::EnumAmong {
        cases: &CACHE_POLICY_CASES,
    },
    access_note: "Request cache policy is being accessed. Make sure the configured policy matches your freshness requirements.",
};

/// Visitor for the data-caching category. The cache-policy half is table
/// driven; `urlCache` needs bespoke handling because its message depends
/// on the assigned shape (shared instance vs custom construction).
pub struct CachingVisitor {
    store: FindingStore,
}

impl CachingVisitor {
    pub fn new() -> Self {
        Self {
            store: FindingStore::new(),
        }
    }

    fn visit_assignment(&mut self, node: Node<'_>, file: &SourceFile) {
        let Some(property) = syntax::assignment_target_property(file, node) else {
            return;
        };
        let position = file.position(node);
        match property {
            URL_CACHE => {
                let shared = syntax::assignment_value(node)
                    .and_then(|v| syntax::enum_case(file, v))
                    .is_some_and(|case| case == "shared");
                let note = if shared {
                    SHARED_CACHE_NOTE
                } else {
                    CUSTOM_CACHE_NOTE
                };
                self.store.observe(URL_CACHE, None);
                self.store.flag(URL_CACHE, position, note);
            }
            "requestCachePolicy" => {
                apply_assignment_policy(
                    &CACHE_POLICY_RULE,
                    file,
                    syntax::assignment_value(node),
                    position,
                    &mut self.store,
                );
            }
            _ => {}
        }
    }

    fn visit_member_access(&mut self, node: Node<'_>, file: &SourceFile) {
        if !syntax::access_base_is_identifier(node) || syntax::is_assignment_target(node) {
            return;
        }
        let position = file.position(node);
        match syntax::navigated_property(file, node) {
            Some(URL_CACHE) => self.store.flag_read(URL_CACHE, position, CACHE_ACCESS_NOTE),
            Some("requestCachePolicy") => self.store.flag_read(
                CACHE_POLICY_RULE.property,
                position,
                CACHE_POLICY_RULE.access_note,
            ),
            _ => {}
        }
    }

    fn visit_call(&mut self, node: Node<'_>, file: &SourceFile) {
        if syntax::call_function_name(file, node) != Some("URLCache") {
            return;
        }
        // The assignment rule already covers `x.urlCache = URLCache(...)`.
        if Self::is_url_cache_assignment_value(node, file) {
            return;
        }
        let position = file.position(node);
        self.store.observe(URL_CACHE, None);
        self.store.flag(URL_CACHE, position, CONSTRUCTED_CACHE_NOTE);
    }

    fn is_url_cache_assignment_value(node: Node<'_>, file: &SourceFile) -> bool {
        let mut current = node.parent();
        while let Some(parent) = current {
            if parent.kind() == "assignment" {
                return syntax::assignment_target_property(file, parent) == Some(URL_CACHE);
            }
            if matches!(parent.kind(), "statements" | "source_file") {
                return false;
            }
            current = parent.parent();
        }
        false
    }
}

impl Default for CachingVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleVisitor for CachingVisitor {
    fn category(&self) -> Category {
        Category::DataCaching
    }

    fn visit_node(&mut self, node: Node<'_>, file: &SourceFile) {
        match classify(node) {
            NodeKind::Assignment => self.visit_assignment(node, file),
            NodeKind::MemberAccess => self.visit_member_access(node, file),
            NodeKind::Call => self.visit_call(node, file),
            _ => {}
        }
    }

    fn take_findings(&mut self) -> Vec<Finding> {
        self.store.take_findings()
    }
}
