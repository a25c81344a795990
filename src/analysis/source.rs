//! Parsed source file handling.

use std::path::Path;

use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Errors raised while turning source text into a syntax tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load Swift grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("failed to parse Swift source: {0}")]
    Parse(String),
}

/// A parsed Swift source file.
///
/// Holds the tree-sitter tree together with the source bytes so rules can
/// resolve node text and positions without re-reading the file. The tree is
/// read-only for the whole analysis run.
pub struct SourceFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path (for diagnostics).
    pub path: String,
}

impl SourceFile {
    /// Parse Swift source into a tree.
    ///
    /// Partial parse errors still yield a valid tree with ERROR nodes;
    /// rules simply skip shapes they cannot match.
    pub fn parse(path: &Path, source: &[u8]) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_swift::LANGUAGE.into())?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Parse(path.display().to_string()))?;

        Ok(Self {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// 1-based line and column of a node's start.
    pub fn position(&self, node: Node) -> (usize, usize) {
        let point = node.start_position();
        (point.row + 1, point.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_source() {
        let source = b"let config = URLSessionConfiguration.default\n";
        let file = SourceFile::parse(Path::new("Test.swift"), source).unwrap();
        assert_eq!(file.path, "Test.swift");
        assert!(!file.tree.root_node().has_error());
    }

    #[test]
    fn test_position_is_one_based() {
        let source = b"let x = 1\n";
        let file = SourceFile::parse(Path::new("Test.swift"), source).unwrap();
        let root = file.tree.root_node();
        assert_eq!(file.position(root), (1, 1));
    }
}
