//! Output formatting for analysis results.
//!
//! Diagnostics are rendered as compiler-style text lines, one per line,
//! suitable for IDE and CI log surfacing. Structured formats are left to
//! library callers; the binary emits text only.

use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::*;

use crate::rules::Diagnostic;

/// Render diagnostics as newline-joined text lines.
pub fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::format)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write rendered diagnostics to the output path, or to stdout when no
/// path is given. The file is created or overwritten, with a trailing
/// newline; a short summary goes to stderr so stdout stays clean.
pub fn write_text(diagnostics: &[Diagnostic], output: Option<&Path>) -> anyhow::Result<()> {
    let content = render(diagnostics);

    match output {
        Some(path) => {
            let mut data = content;
            if !data.is_empty() {
                data.push('\n');
            }
            fs::write(path, data)
                .with_context(|| format!("failed to write output file {}", path.display()))?;
            eprintln!(
                "{} {} warning(s) written to {}",
                "netlint:".bold(),
                diagnostics.len(),
                path.display()
            );
        }
        None => {
            if !content.is_empty() {
                println!("{}", content);
            }
        }
    }

    Ok(())
}
