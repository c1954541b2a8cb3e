//! Discovery options configuration.
//!
//! This module provides the [`DiscoverOptions`] struct for configuring a
//! discovery run: forcing an OS family, restricting the strategy set and
//! bounding how long any single strategy may take.

use crate::{DiscoveryError, OsFamily};
use std::time::Duration;

/// Configuration options for a discovery run.
///
/// # Default Behavior
///
/// The OS family is detected from the host, every applicable strategy
/// runs, and each strategy gets 5 seconds. Strategies run concurrently,
/// so the whole run is bounded by roughly one timeout, not their sum.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::{DiscoverOptions, OsFamily};
/// use std::time::Duration;
///
/// // Search only via environment variables, as if on Linux
/// let opts = DiscoverOptions {
///     os_override: Some(OsFamily::Linux),
///     strategy_allowlist: Some(vec!["environment".to_string()]),
///     timeout_per_strategy: Duration::from_millis(500),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// Force a specific OS family instead of detecting the host's.
    ///
    /// Default: `None` (autodetect)
    pub os_override: Option<OsFamily>,

    /// Restrict the run to these strategy identifiers.
    ///
    /// Naming an identifier the engine does not know is a configuration
    /// error, reported before any strategy runs.
    ///
    /// Default: `None` (all applicable strategies)
    pub strategy_allowlist: Option<Vec<String>>,

    /// Maximum time a single strategy may run.
    ///
    /// Paths produced before the deadline are kept and the strategy is
    /// reported as timed out.
    ///
    /// Default: 5 seconds
    pub timeout_per_strategy: Duration,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            os_override: None,
            strategy_allowlist: None,
            timeout_per_strategy: Duration::from_secs(5),
        }
    }
}

impl DiscoverOptions {
    /// The OS family to search: the override, or the host's.
    pub fn os_family(&self) -> OsFamily {
        self.os_override.unwrap_or_else(OsFamily::current)
    }

    /// Whether the allowlist (if any) admits `id`.
    pub fn allows(&self, id: &str) -> bool {
        self.strategy_allowlist
            .as_ref()
            .map_or(true, |list| list.iter().any(|allowed| allowed == id))
    }

    /// Check the options against the set of known strategy identifiers.
    pub fn validate(&self, known: &[&str]) -> Result<(), DiscoveryError> {
        if self.timeout_per_strategy.is_zero() {
            return Err(DiscoveryError::InvalidTimeout {
                timeout: self.timeout_per_strategy,
                fix: "Use a per-strategy timeout greater than zero".to_string(),
            });
        }

        if let Some(list) = &self.strategy_allowlist {
            if list.is_empty() {
                return Err(DiscoveryError::EmptyAllowlist {
                    fix: format!("Name at least one of: {}", known.join(", ")),
                });
            }
            if let Some(unknown) = list.iter().find(|id| !known.contains(&id.as_str())) {
                return Err(DiscoveryError::UnknownStrategy {
                    id: unknown.clone(),
                    known: known.iter().map(|k| k.to_string()).collect(),
                    fix: format!("Use one of: {}", known.join(", ")),
                });
            }
        }

        Ok(())
    }
}
