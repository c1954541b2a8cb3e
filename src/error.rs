//! Error types for discovery.
//!
//! Only configuration problems are fatal. Unreadable paths, unavailable OS
//! mechanisms and slow strategies are all absorbed into the report; see
//! [`RunStatus`](crate::RunStatus).

use std::time::Duration;
use thiserror::Error;

/// Fatal errors from a discovery run, raised before any strategy starts.
///
/// Each variant carries a `fix` field with an actionable suggestion.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::DiscoveryError;
///
/// fn handle_error(error: DiscoveryError) {
///     eprintln!("Discovery failed: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The allowlist names a strategy the engine does not know.
    #[error("Unknown strategy: {id}")]
    UnknownStrategy {
        /// The unrecognized identifier.
        id: String,
        /// Identifiers the engine does know.
        known: Vec<String>,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The allowlist is present but names nothing.
    #[error("Strategy allowlist is empty")]
    EmptyAllowlist {
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The per-strategy timeout is unusable.
    #[error("Invalid per-strategy timeout: {timeout:?}")]
    InvalidTimeout {
        /// The rejected value.
        timeout: Duration,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },
}

impl DiscoveryError {
    /// Get an actionable suggestion for fixing this error.
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::UnknownStrategy { fix, .. } => fix,
            Self::EmptyAllowlist { fix } => fix,
            Self::InvalidTimeout { fix, .. } => fix,
        }
    }
}

/// Why a strategy could not start producing paths.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrategyError {
    /// The strategy failed for a strategy-specific reason.
    #[error("{0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_strategy_display() {
        let error = DiscoveryError::UnknownStrategy {
            id: "gpu".to_string(),
            known: vec!["environment".to_string()],
            fix: "Use one of: environment".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown strategy: gpu");
        assert_eq!(error.fix_suggestion(), "Use one of: environment");
    }

    #[test]
    fn test_all_variants_have_fix() {
        let errors = vec![
            DiscoveryError::UnknownStrategy {
                id: "gpu".to_string(),
                known: Vec::new(),
                fix: "Use a known strategy".to_string(),
            },
            DiscoveryError::EmptyAllowlist {
                fix: "Name at least one strategy".to_string(),
            },
            DiscoveryError::InvalidTimeout {
                timeout: Duration::ZERO,
                fix: "Use a positive timeout".to_string(),
            },
        ];

        for error in errors {
            assert!(
                !error.fix_suggestion().is_empty(),
                "fix_suggestion() should return non-empty string for {:?}",
                error
            );
        }
    }

    #[test]
    fn test_invalid_timeout_display() {
        let error = DiscoveryError::InvalidTimeout {
            timeout: Duration::ZERO,
            fix: String::new(),
        };
        assert!(error.to_string().contains("Invalid per-strategy timeout"));
    }

    #[test]
    fn test_strategy_error_display() {
        assert_eq!(StrategyError::Failed("boom".to_string()).to_string(), "boom");
    }
}
