//! Human-readable report output.

use crate::DiscoveryReport;
use std::fmt::Write;

/// Render `report` as the plain-text summary printed by the CLI.
///
/// The OS family and every strategy that ran are always listed, so an
/// empty result still shows what was searched.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::{render_text, DiscoveryReport, OsFamily};
///
/// let text = render_text(&DiscoveryReport::empty(OsFamily::Linux));
/// assert!(text.starts_with("OS family: linux\n"));
/// assert!(text.contains("Candidates: none found"));
/// ```
pub fn render_text(report: &DiscoveryReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &DiscoveryReport) -> std::fmt::Result {
    writeln!(out, "OS family: {}", report.os_family())?;

    if report.strategies_run().is_empty() {
        writeln!(out, "Strategies: none applicable")?;
    } else {
        writeln!(out, "Strategies:")?;
        let width = report
            .strategies_run()
            .iter()
            .map(|run| run.id.len())
            .max()
            .unwrap_or(0);
        for run in report.strategies_run() {
            writeln!(
                out,
                "  {:<width$}  {:<9}  {} {}",
                run.id,
                run.status.label(),
                run.paths_yielded,
                plural(run.paths_yielded, "path", "paths"),
            )?;
        }
    }

    if report.candidates().is_empty() {
        writeln!(out, "Candidates: none found")?;
        return Ok(());
    }

    writeln!(out, "Candidates ({}):", report.candidates().len())?;
    for (i, candidate) in report.candidates().iter().enumerate() {
        writeln!(
            out,
            "  {}. {}  [{}, {}, {} {}]",
            i + 1,
            candidate.path.display(),
            candidate.confidence,
            candidate.source_strategy,
            candidate.file_count,
            plural(candidate.file_count, "file", "files"),
        )?;
    }
    Ok(())
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Candidate, Confidence, OsFamily, RunStatus, StrategyRun};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_render_full_report() {
        let report = DiscoveryReport::new(
            vec![Candidate {
                path: PathBuf::from("/usr/share/tesseract-ocr/5/tessdata"),
                source_strategy: "well-known".to_string(),
                confidence: Confidence::Verified,
                file_count: 3,
            }],
            OsFamily::Linux,
            vec![
                StrategyRun {
                    id: "environment".to_string(),
                    status: RunStatus::Complete,
                    paths_yielded: 2,
                },
                StrategyRun {
                    id: "well-known".to_string(),
                    status: RunStatus::TimedOut,
                    paths_yielded: 1,
                },
            ],
        );

        let expected = "\
OS family: linux
Strategies:
  environment  complete   2 paths
  well-known   timed out  1 path
Candidates (1):
  1. /usr/share/tesseract-ocr/5/tessdata  [verified, well-known, 3 files]
";
        assert_eq!(render_text(&report), expected);
    }

    #[test]
    fn test_render_empty_report() {
        let report = DiscoveryReport::empty(OsFamily::Other);
        assert_eq!(
            render_text(&report),
            "OS family: other\nStrategies: none applicable\nCandidates: none found\n"
        );
    }

    #[test]
    fn test_render_failed_strategy() {
        let report = DiscoveryReport::new(
            Vec::new(),
            OsFamily::Windows,
            vec![StrategyRun {
                id: "registry".to_string(),
                status: RunStatus::Failed {
                    message: "denied".to_string(),
                },
                paths_yielded: 0,
            }],
        );
        let text = render_text(&report);
        assert!(text.contains("  registry  skipped    0 paths\n"));
        assert!(text.ends_with("Candidates: none found\n"));
    }
}
