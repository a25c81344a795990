//! netlint - networking antipattern analyzer for Swift code.
//!
//! netlint statically analyzes one Swift source file for networking
//! configuration and usage antipatterns: risky URLSession settings,
//! caching policy, timeout bands, polling loops, background-lifecycle
//! misuse, and push-notification handling. Each occurrence is reported as
//! a positioned, compiler-style warning suitable for IDE/CI surfacing.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: Swift parsing and the node-kind view rules dispatch on
//! - `rules`: the rule catalog - independent visitors that walk the tree,
//!   accumulate per-property evidence, and decide what gets flagged
//! - `report`: text output formatting
//! - `cli`: argument surface and the analyze-one-file entry point
//!
//! # Adding a Rule
//!
//! Property-shaped rules (assignment plus bare read of a named property)
//! are one table entry in `rules::catalog`; anything with its own trigger
//! shape implements `rules::RuleVisitor` and joins the catalog.

pub mod analysis;
pub mod cli;
pub mod report;
pub mod rules;

pub use analysis::{NodeKind, ParseError, SourceFile};
pub use rules::{
    catalog, Category, Diagnostic, Finding, FindingStore, PropertyImpact, RuleVisitor, Runner,
    Severity, Usage,
};
