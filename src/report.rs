//! Result types produced by a discovery run.

use crate::OsFamily;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// How much a candidate is trusted to be a genuine, complete installation.
///
/// Ordering follows trust: `Verified > Likely > Possible`.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::Confidence;
///
/// assert!(Confidence::Verified > Confidence::Likely);
/// assert!(Confidence::Likely > Confidence::Possible);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    /// Populated directory found by a high-trust strategy.
    Verified,
    /// Populated directory found by a medium-trust strategy.
    Likely,
    /// Existing but empty directory named like a data directory.
    Possible,
}

impl Confidence {
    fn rank(self) -> u8 {
        match self {
            Self::Verified => 2,
            Self::Likely => 1,
            Self::Possible => 0,
        }
    }

    /// Whether a candidate at this confidence counts as a usable find.
    pub fn is_usable(self) -> bool {
        matches!(self, Self::Verified | Self::Likely)
    }
}

impl PartialOrd for Confidence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Confidence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// A validated directory believed to contain language-data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Canonical path of the directory.
    pub path: PathBuf,

    /// Identifier of the strategy that produced it.
    pub source_strategy: String,

    /// Trust assigned from the producing strategy and the probe.
    pub confidence: Confidence,

    /// Number of `.traineddata` files directly inside the directory.
    pub file_count: usize,
}

/// How a single strategy's run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RunStatus {
    /// The strategy produced all of its paths.
    Complete,

    /// The strategy hit its deadline; paths yielded before it were kept.
    TimedOut,

    /// The strategy could not run and was skipped.
    Failed {
        /// Why the strategy was skipped.
        message: String,
    },
}

impl RunStatus {
    /// Short label for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tessdata_discovery::RunStatus;
    ///
    /// assert_eq!(RunStatus::TimedOut.label(), "timed out");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::TimedOut => "timed out",
            Self::Failed { .. } => "skipped",
        }
    }

    /// `true` only when every path the strategy had was produced.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Record of one executed strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyRun {
    /// Strategy identifier.
    pub id: String,

    /// How the run ended.
    #[serde(flatten)]
    pub status: RunStatus,

    /// Raw paths the strategy yielded before it ended.
    pub paths_yielded: usize,
}

/// Outcome of one `discover()` call.
///
/// Candidates are unique by canonical path and ordered best-first:
/// confidence descending, then strategy priority, then the order in which
/// they were discovered. A report is built once and only read afterwards.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::{DiscoveryReport, OsFamily};
///
/// let report = DiscoveryReport::empty(OsFamily::Other);
/// assert!(report.primary().is_none());
/// assert!(!report.has_usable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    candidates: Vec<Candidate>,
    os_family: OsFamily,
    strategies_run: Vec<StrategyRun>,
}

impl DiscoveryReport {
    pub(crate) fn new(
        candidates: Vec<Candidate>,
        os_family: OsFamily,
        strategies_run: Vec<StrategyRun>,
    ) -> Self {
        Self {
            candidates,
            os_family,
            strategies_run,
        }
    }

    /// A report with nothing searched and nothing found.
    pub fn empty(os_family: OsFamily) -> Self {
        Self::new(Vec::new(), os_family, Vec::new())
    }

    /// Candidates, best first.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The OS family that was searched.
    pub fn os_family(&self) -> OsFamily {
        self.os_family
    }

    /// Strategies that ran, in priority order.
    pub fn strategies_run(&self) -> &[StrategyRun] {
        &self.strategies_run
    }

    /// The best candidate, if any.
    pub fn primary(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Path of the best candidate, if any.
    pub fn primary_path(&self) -> Option<&Path> {
        self.primary().map(|c| c.path.as_path())
    }

    /// `true` if at least one Verified or Likely candidate was found.
    pub fn has_usable(&self) -> bool {
        self.candidates.iter().any(|c| c.confidence.is_usable())
    }

    /// Identifiers of strategies that did not complete.
    pub fn incomplete_strategies(&self) -> impl Iterator<Item = &str> {
        self.strategies_run
            .iter()
            .filter(|run| !run.status.is_complete())
            .map(|run| run.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(path: &str, confidence: Confidence, file_count: usize) -> Candidate {
        Candidate {
            path: PathBuf::from(path),
            source_strategy: "environment".to_string(),
            confidence,
            file_count,
        }
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Verified > Confidence::Likely);
        assert!(Confidence::Likely > Confidence::Possible);
        assert_eq!(
            Confidence::Possible.max(Confidence::Verified),
            Confidence::Verified
        );
    }

    #[test]
    fn test_confidence_usable() {
        assert!(Confidence::Verified.is_usable());
        assert!(Confidence::Likely.is_usable());
        assert!(!Confidence::Possible.is_usable());
    }

    #[test]
    fn test_empty_report() {
        let report = DiscoveryReport::empty(OsFamily::Linux);
        assert!(report.candidates().is_empty());
        assert!(report.strategies_run().is_empty());
        assert_eq!(report.os_family(), OsFamily::Linux);
        assert!(report.primary_path().is_none());
    }

    #[test]
    fn test_primary_and_usable() {
        let report = DiscoveryReport::new(
            vec![
                candidate("/a/tessdata", Confidence::Verified, 2),
                candidate("/b/tessdata", Confidence::Likely, 1),
            ],
            OsFamily::Linux,
            Vec::new(),
        );
        assert_eq!(report.primary_path(), Some(Path::new("/a/tessdata")));
        assert!(report.has_usable());
    }

    #[test]
    fn test_possible_only_is_not_usable() {
        let report = DiscoveryReport::new(
            vec![candidate("/a/tessdata", Confidence::Possible, 0)],
            OsFamily::Linux,
            Vec::new(),
        );
        assert!(!report.has_usable());
        assert!(report.primary().is_some());
    }

    #[test]
    fn test_incomplete_strategies() {
        let runs = vec![
            StrategyRun {
                id: "environment".to_string(),
                status: RunStatus::Complete,
                paths_yielded: 2,
            },
            StrategyRun {
                id: "filesystem-scan".to_string(),
                status: RunStatus::TimedOut,
                paths_yielded: 0,
            },
            StrategyRun {
                id: "registry".to_string(),
                status: RunStatus::Failed {
                    message: "boom".to_string(),
                },
                paths_yielded: 0,
            },
        ];
        let report = DiscoveryReport::new(Vec::new(), OsFamily::Windows, runs);
        let incomplete: Vec<_> = report.incomplete_strategies().collect();
        assert_eq!(incomplete, vec!["filesystem-scan", "registry"]);
    }

    #[test]
    fn test_run_status_labels() {
        assert_eq!(RunStatus::Complete.label(), "complete");
        assert_eq!(RunStatus::TimedOut.label(), "timed out");
        assert_eq!(
            RunStatus::Failed {
                message: String::new()
            }
            .label(),
            "skipped"
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = DiscoveryReport::new(
            vec![candidate("/a/tessdata", Confidence::Verified, 3)],
            OsFamily::Linux,
            vec![StrategyRun {
                id: "environment".to_string(),
                status: RunStatus::Complete,
                paths_yielded: 1,
            }],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["os_family"], "linux");
        assert_eq!(json["candidates"][0]["confidence"], "verified");
        assert_eq!(json["candidates"][0]["file_count"], 3);
        assert_eq!(json["strategies_run"][0]["status"], "complete");
        assert_eq!(json["strategies_run"][0]["paths_yielded"], 1);
    }
}
