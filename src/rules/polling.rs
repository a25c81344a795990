//! Polling rules: repeating timers, delayed dispatch, and busy-wait loops.

use tree_sitter::Node;

use crate::analysis::{classify, syntax, NodeKind, SourceFile};

use super::findings::{Finding, FindingStore};
use super::types::Category;
use super::RuleVisitor;

const TIMER_POLLING: &str = "timerPolling";
const DISPATCH_POLLING: &str = "recursiveDispatchPolling";
const LOOP_POLLING: &str = "infiniteLoopPolling";

const TIMER_NOTE: &str =
    "Consider using a more appropriate polling mechanism or setting a more appropriate timeout value";
const DISPATCH_NOTE: &str =
    "Doing some heavy stuff on the main thread may be impacting how the app responds";
const SLEEP_NOTE: &str = "Thread.sleep command completely blocks the executing thread, preventing it from performing any other work. If run on the main thread, this would freeze the UI entirely.";

/// Visitor for the polling category.
pub struct PollingVisitor {
    store: FindingStore,
}

impl PollingVisitor {
    pub fn new() -> Self {
        Self {
            store: FindingStore::new(),
        }
    }

    /// `Timer.scheduledTimer(..., repeats: true)`.
    fn check_timer_polling(&mut self, node: Node<'_>, file: &SourceFile) {
        if syntax::call_base_name(file, node) != Some("Timer")
            || syntax::call_member_name(file, node) != Some("scheduledTimer")
        {
            return;
        }
        if syntax::call_bool_argument(file, node, "repeats") != Some(true) {
            return;
        }
        self.store.flag(TIMER_POLLING, file.position(node), TIMER_NOTE);
    }

    /// `DispatchQueue...asyncAfter(...)`.
    fn check_dispatch_polling(&mut self, node: Node<'_>, file: &SourceFile) {
        if syntax::call_member_name(file, node) != Some("asyncAfter") {
            return;
        }
        self.store
            .flag(DISPATCH_POLLING, file.position(node), DISPATCH_NOTE);
    }

    /// `Thread.sleep(...)` as a direct statement of a `while` body. Sleeps
    /// nested in deeper blocks are out of scope for this rule.
    fn check_loop_polling(&mut self, node: Node<'_>, file: &SourceFile) {
        for statement in syntax::loop_body_statements(node) {
            if classify(statement) != NodeKind::Call {
                continue;
            }
            if syntax::call_base_name(file, statement) != Some("Thread")
                || syntax::call_member_name(file, statement) != Some("sleep")
            {
                continue;
            }
            self.store
                .flag(LOOP_POLLING, file.position(statement), SLEEP_NOTE);
        }
    }
}

impl Default for PollingVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleVisitor for PollingVisitor {
    fn category(&self) -> Category {
        Category::Polling
    }

    fn visit_node(&mut self, node: Node<'_>, file: &SourceFile) {
        match classify(node) {
            NodeKind::Call => {
                self.check_timer_polling(node, file);
                self.check_dispatch_polling(node, file);
            }
            NodeKind::While => self.check_loop_polling(node, file),
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
        let file = SourceFile::parse(Path::new("Test.swift"), source.as_bytes()).unwrap();
        let mut visitor = PollingVisitor::new();
        walk(&file, &mut visitor);
        visitor.take_findings()
    }

    fn locations(findings: &[Finding], property: &str) -> Vec<(usize, usize)> {
        findings
            .iter()
            .find(|f| f.property == property && f.impact.flagged)
            .map(|f| f.impact.locations.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_repeating_timer_flagged_once() {
        let findings = run(
            "Timer.scheduledTimer(timeInterval: 1.0, target: self, selector: #selector(tick), userInfo: nil, repeats: true)\n",
        );
        assert_eq!(locations(&findings, TIMER_POLLING).len(), 1);
        assert_eq!(locations(&findings, TIMER_POLLING)[0].0, 1);
    }

    #[test]
    fn test_non_repeating_timer_records_nothing() {
        let findings = run(
            "Timer.scheduledTimer(timeInterval: 1.0, target: self, selector: #selector(tick), userInfo: nil, repeats: false)\n",
        );
        assert!(locations(&findings, TIMER_POLLING).is_empty());

        let findings = run("Timer.scheduledTimer(withTimeInterval: 1.0) { _ in }\n");
        assert!(locations(&findings, TIMER_POLLING).is_empty());
    }

    #[test]
    fn test_async_after_flagged() {
        let findings =
            run("DispatchQueue.main.asyncAfter(deadline: .now() + 2.0) {\n    poll()\n}\n");
        assert_eq!(locations(&findings, DISPATCH_POLLING).len(), 1);
    }

    #[test]
    fn test_direct_sleep_in_while_body() {
        let findings = run("while isWaiting {\n    Thread.sleep(forTimeInterval: 1.0)\n}\n");
        let sleeps = locations(&findings, LOOP_POLLING);
        assert_eq!(sleeps.len(), 1);
        assert_eq!(sleeps[0].0, 2);
    }

    #[test]
    fn test_nested_sleep_is_out_of_scope() {
        let findings = run(
            "while isWaiting {\n    if shouldBackOff {\n        Thread.sleep(forTimeInterval: 1.0)\n    }\n}\n",
        );
        assert!(locations(&findings, LOOP_POLLING).is_empty());
    }

    #[test]
    fn test_sleep_outside_loop_not_flagged() {
        let findings = run("Thread.sleep(forTimeInterval: 1.0)\n");
        assert!(locations(&findings, LOOP_POLLING).is_empty());
    }
}
