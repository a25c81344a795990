//! Command-line interface for netlint.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::analysis::SourceFile;
use crate::report;
use crate::rules::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Networking antipattern analyzer for Swift code.
///
/// Analyzes a single Swift source file for risky URLSession configuration
/// and usage patterns - timeouts, caching policy, connection settings,
/// polling loops, lifecycle misuse, and push-notification handling - and
/// prints one compiler-style warning per occurrence.
#[derive(Parser)]
#[command(name = "netlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the input file to analyze
    #[arg(short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Path to the output file (defaults to standard output)
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Validate the input, analyze it, and write the report.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if !cli.input.is_file() {
        anyhow::bail!("input file path '{}' is not valid", cli.input.display());
    }

    let source = fs::read(&cli.input)?;
    let file = SourceFile::parse(&cli.input, &source)?;
    let diagnostics = Runner::new().run(&file);
    report::write_text(&diagnostics, cli.output.as_deref())?;

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_fails_before_analysis() {
        let cli = Cli {
            input: PathBuf::from("/nonexistent/Missing.swift"),
            output: None,
        };
        let error = run(&cli).unwrap_err();
        assert!(error.to_string().contains("not valid"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("App.swift");
        let output = dir.path().join("report.txt");
        std::fs::write(&input, "config.allowsCellularAccess = true\n").unwrap();

        let cli = Cli {
            input,
            output: Some(output.clone()),
        };
        assert_eq!(run(&cli).unwrap(), EXIT_SUCCESS);

        let report = std::fs::read_to_string(&output).unwrap();
        assert!(report.contains("warning: Consider setting allowsCellularAccess to false"));
    }
}
