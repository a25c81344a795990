//! Data-driven visitor for the property-table categories.
//!
//! Session/HTTP, connection management, content delivery, timeout, and
//! prefetch/background rules all share the same two trigger shapes - an
//! assignment to a tracked property and a bare read of one - and differ
//! only in their decision policy. Those policies live in static tables
//! (see `catalog`); this visitor interprets them.

use tree_sitter::Node;

use crate::analysis::{classify, syntax, NodeKind, SourceFile};

use super::findings::{Finding, FindingStore};
use super::types::Category;
use super::RuleVisitor;

/// Decision policy applied to the assigned value of one property.
pub enum AssignmentPolicy {
    /// Flag when a boolean literal matches the risky polarity.
    Boolean {
        flag_when: bool,
        recommendation: &'static str,
    },
    /// Flag when an enum case falls outside the allowed set.
    EnumOutside {
        allowed: &'static [&'static str],
        recommendation: &'static str,
    },
    /// Flag when an enum case appears in the table, with a per-case
    /// recommendation.
    EnumAmong {
        cases: &'static phf::Map<&'static str, &'static str>,
    },
    /// Flag when an integer literal exceeds the limit.
    IntAbove {
        limit: i64,
        recommendation: &'static str,
    },
    /// Flag when an integer literal falls outside `[min, max]`.
    IntOutside {
        min: i64,
        max: i64,
        recommendation: &'static str,
    },
    /// Flag every assignment regardless of value.
    Always { recommendation: &'static str },
}

/// One tracked property: its decision policy and the informational note
/// reported when the property is read without being assigned.
pub struct PropertyRule {
    pub property: &'static str,
    pub policy: AssignmentPolicy,
    pub access_note: &'static str,
}

/// Evaluate a rule's policy against an assignment's right-hand side,
/// recording the observation and flagging the position when the value is
/// judged an antipattern. A value whose shape does not fit the policy is
/// recorded as observed and otherwise skipped.
pub fn apply_assignment_policy(
    rule: &PropertyRule,
    file: &SourceFile,
    value: Option<Node<'_>>,
    position: (usize, usize),
    store: &mut FindingStore,
) {
    let property = rule.property;
    match rule.policy {
        AssignmentPolicy::Boolean {
            flag_when,
            recommendation,
        } => {
            let observed = value.and_then(|v| syntax::bool_literal(file, v));
            store.observe(property, observed.map(|v| v.to_string()));
            if observed == Some(flag_when) {
                store.flag(property, position, recommendation);
            }
        }
        AssignmentPolicy::EnumOutside {
            allowed,
            recommendation,
        } => {
            let observed = value.and_then(|v| syntax::enum_case(file, v));
            store.observe(property, observed.map(str::to_string));
            if let Some(case) = observed {
                if !allowed.iter().any(|a| *a == case) {
                    store.flag(property, position, recommendation);
                }
            }
        }
        AssignmentPolicy::EnumAmong { cases } => {
            let observed = value.and_then(|v| syntax::enum_case(file, v));
            store.observe(property, observed.map(str::to_string));
            if let Some(recommendation) = observed.and_then(|case| cases.get(case).copied()) {
                store.flag(property, position, recommendation);
            }
        }
        AssignmentPolicy::IntAbove {
            limit,
            recommendation,
        } => {
            let observed = value.and_then(|v| syntax::int_literal(file, v));
            store.observe(property, observed.map(|v| v.to_string()));
            if matches!(observed, Some(v) if v > limit) {
                store.flag(property, position, recommendation);
            }
        }
        AssignmentPolicy::IntOutside {
            min,
            max,
            recommendation,
        } => {
            let observed = value.and_then(|v| syntax::int_literal(file, v));
            store.observe(property, observed.map(|v| v.to_string()));
            if matches!(observed, Some(v) if v < min || v > max) {
                store.flag(property, position, recommendation);
            }
        }
        AssignmentPolicy::Always { recommendation } => {
            store.observe(property, None);
            store.flag(property, position, recommendation);
        }
    }
}

/// Visitor interpreting one category's property table.
pub struct PropertyRuleVisitor {
    category: Category,
    rules: &'static [PropertyRule],
    store: FindingStore,
}

impl PropertyRuleVisitor {
    pub fn new(category: Category, rules: &'static [PropertyRule]) -> Self {
        Self {
            category,
            rules,
            store: FindingStore::new(),
        }
    }

    fn rule_for(&self, property: &str) -> Option<&'static PropertyRule> {
        self.rules.iter().find(|r| r.property == property)
    }

    fn visit_assignment(&mut self, node: Node<'_>, file: &SourceFile) {
        let Some(property) = syntax::assignment_target_property(file, node) else {
            return;
        };
        let Some(rule) = self.rule_for(property) else {
            return;
        };
        let position = file.position(node);
        apply_assignment_policy(
            rule,
            file,
            syntax::assignment_value(node),
            position,
            &mut self.store,
        );
    }

    fn visit_member_access(&mut self, node: Node<'_>, file: &SourceFile) {
        if !syntax::access_base_is_identifier(node) || syntax::is_assignment_target(node) {
            return;
        }
        let Some(property) = syntax::navigated_property(file, node) else {
            return;
        };
        let Some(rule) = self.rule_for(property) else {
            return;
        };
        let position = file.position(node);
        self.store.flag_read(rule.property, position, rule.access_note);
    }
}

impl RuleVisitor for PropertyRuleVisitor {
    fn category(&self) -> Category {
        self.category
    }

    fn visit_node(&mut self, node: Node<'_>, file: &SourceFile) {
        match classify(node) {
            NodeKind::Assignment => self.visit_assignment(node, file),
            NodeKind::MemberAccess => self.visit_member_access(node, file),
            _ => {}
        }
    }

    fn take_findings(&mut self) -> Vec<Finding> {
        self.store.take_findings()
    }
}
