//! The antipattern rule catalog and its traversal machinery.

pub mod caching;
pub mod catalog;
pub mod findings;
pub mod lifecycle;
pub mod notification;
pub mod polling;
pub mod properties;
pub mod runner;
pub mod types;

pub use catalog::catalog;
pub use findings::{Finding, FindingStore, PropertyImpact, Usage};
pub use runner::Runner;
pub use types::{Category, Diagnostic, Severity};

use tree_sitter::Node;

use crate::analysis::SourceFile;

/// A stateful traversal unit bound to one rule category.
///
/// The runner hands every named node of the tree to `visit_node` in
/// pre-order; node shapes a visitor does not handle are ignored. After the
/// walk the runner drains the visitor's findings.
pub trait RuleVisitor {
    /// The topical category this visitor reports under.
    fn category(&self) -> Category;

    /// Inspect one node. Called once per named node, in document order.
    fn visit_node(&mut self, node: Node<'_>, file: &SourceFile);

    /// Drain accumulated findings after the walk.
    fn take_findings(&mut self) -> Vec<Finding>;
}

/// One full pre-order, depth-first walk over the named nodes of the tree.
pub fn walk(file: &SourceFile, visitor: &mut dyn RuleVisitor) {
    let mut cursor = file.tree.root_node().walk();
    loop {
        if cursor.node().is_named() {
            visitor.visit_node(cursor.node(), file);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
