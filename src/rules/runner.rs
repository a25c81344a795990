//! The orchestrator: runs the catalog and expands findings into
//! diagnostics.

use crate::analysis::SourceFile;

use super::catalog::catalog;
use super::findings::PropertyImpact;
use super::types::{Diagnostic, Severity};
use super::walk;

/// Executes every rule visitor against one parsed file.
///
/// Visitors are constructed fresh per run and each performs its own walk
/// over the same read-only tree; no state crosses runs or visitors.
#[derive(Default)]
pub struct Runner;

impl Runner {
    pub fn new() -> Self {
        Self
    }

    /// Run the full catalog and return one diagnostic per flagged
    /// location, in catalog order, then document order within a finding.
    /// No deduplication: a property triggered from two locations yields
    /// two diagnostics.
    pub fn run(&self, file: &SourceFile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for mut visitor in catalog() {
            walk(file, visitor.as_mut());
            let category = visitor.category();
            for finding in visitor.take_findings() {
                if !(finding.impact.observed && finding.impact.flagged) {
                    continue;
                }
                let message = compose_message(&finding.impact);
                for &(line, column) in &finding.impact.locations {
                    diagnostics.push(Diagnostic {
                        file: file.path.clone(),
                        line,
                        column,
                        severity: Severity::Warning,
                        category,
                        message: message.clone(),
                    });
                }
            }
        }

        diagnostics
    }
}

/// A flagged finding's message: its recommendation, plus the observed
/// literal value when one was recorded.
fn compose_message(impact: &PropertyImpact) -> String {
    let recommendation = impact
        .recommendation
        .unwrap_or("Review this networking configuration.");
    match &impact.last_value {
        Some(value) => format!("{} Current value is: {}", recommendation, value),
        None => recommendation.to_string(),
    }
}
