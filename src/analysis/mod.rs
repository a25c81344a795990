//! Source parsing and the node-kind view rules are written against.

pub mod source;
pub mod syntax;

pub use source::{ParseError, SourceFile};
pub use syntax::{classify, NodeKind};
