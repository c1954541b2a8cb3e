//! Candidate-path strategies.
//!
//! A strategy only decides *where to look*: it yields raw path strings
//! (possibly containing `~` or environment tokens) and never checks whether
//! they exist. Validation is the probe's job.
//!
//! Each strategy is registered through a [`StrategySpec`] carrying its
//! identifier, the OS families it applies to, its priority and its trust
//! level. [`builtin_strategies`] returns the full built-in set.

mod binary_relative;
mod drives;
mod environment;
mod filesystem_scan;
mod package_manager;
mod registry;
mod well_known;

pub use binary_relative::BinaryRelativeStrategy;
pub use drives::DriveEnumerationStrategy;
pub use environment::EnvironmentStrategy;
pub use filesystem_scan::FilesystemScanStrategy;
pub use package_manager::PackageManagerStrategy;
pub use registry::RegistryStrategy;
pub use well_known::WellKnownPathsStrategy;

use crate::host::Host;
use crate::{Confidence, OsFamily, StrategyError};
use std::sync::Arc;

/// Identifiers of the built-in strategies.
pub mod ids {
    /// Windows registry keys written by installers.
    pub const REGISTRY: &str = "registry";
    /// Environment variables pointing at data directories.
    pub const ENVIRONMENT: &str = "environment";
    /// Fixed per-OS install locations.
    pub const WELL_KNOWN: &str = "well-known";
    /// Snap, flatpak, conda, brew, nix and user-local trees.
    pub const PACKAGE_MANAGER: &str = "package-manager";
    /// Paths relative to located tesseract executables.
    pub const BINARY_RELATIVE: &str = "binary-relative";
    /// Every responsive drive letter joined with known suffixes.
    pub const DRIVE_ENUMERATION: &str = "drive-enumeration";
    /// Depth-bounded walk of install roots.
    pub const FILESYSTEM_SCAN: &str = "filesystem-scan";
}

/// A finite, single-pass sequence of raw candidate paths.
pub type PathStream = Box<dyn Iterator<Item = String> + Send>;

/// What a strategy can see while producing paths.
#[derive(Debug, Clone)]
pub struct StrategyContext {
    /// Host collaborators.
    pub host: Host,
    /// The OS family being searched.
    pub os: OsFamily,
}

/// A generator of candidate directory paths.
///
/// `produce` is called once per discovery run, on a worker thread of its
/// own. It should return quickly and do its slow work lazily inside the
/// stream, so the engine can keep whatever was yielded before a timeout.
pub trait StrategySource: Send + Sync {
    /// Start producing raw paths.
    ///
    /// An unavailable mechanism (no registry, no drives) should yield an
    /// empty stream; `Err` means the strategy could not run at all.
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError>;
}

/// How far a populated directory from a strategy is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trust {
    /// Directories are reported as [`Confidence::Verified`].
    High,
    /// Directories are reported as [`Confidence::Likely`].
    Medium,
}

impl Trust {
    /// Confidence of a directory holding at least one data file.
    pub fn confidence(self) -> Confidence {
        match self {
            Self::High => Confidence::Verified,
            Self::Medium => Confidence::Likely,
        }
    }
}

/// Static registration of one strategy.
#[derive(Clone)]
pub struct StrategySpec {
    /// Stable identifier, used in allowlists and reports.
    pub id: &'static str,
    /// OS families the strategy applies to.
    pub families: &'static [OsFamily],
    /// Higher runs (and ranks) first.
    pub priority: u16,
    /// Trust given to populated directories it finds.
    pub trust: Trust,
    source: Arc<dyn StrategySource>,
}

impl StrategySpec {
    /// Register `source` under `id`.
    pub fn new(
        id: &'static str,
        families: &'static [OsFamily],
        priority: u16,
        trust: Trust,
        source: impl StrategySource + 'static,
    ) -> Self {
        Self {
            id,
            families,
            priority,
            trust,
            source: Arc::new(source),
        }
    }

    /// Whether the strategy applies to `os`.
    pub fn applies_to(&self, os: OsFamily) -> bool {
        self.families.contains(&os)
    }

    /// Shared handle to the producer.
    pub fn source(&self) -> Arc<dyn StrategySource> {
        Arc::clone(&self.source)
    }
}

impl std::fmt::Debug for StrategySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategySpec")
            .field("id", &self.id)
            .field("families", &self.families)
            .field("priority", &self.priority)
            .field("trust", &self.trust)
            .finish_non_exhaustive()
    }
}

const WINDOWS: &[OsFamily] = &[OsFamily::Windows];
const LINUX: &[OsFamily] = &[OsFamily::Linux];
const ALL_RECOGNIZED: &[OsFamily] = &[OsFamily::Windows, OsFamily::Linux, OsFamily::MacOs];

/// Every built-in strategy, highest priority first.
///
/// Package-manager locations rank above binary-relative ones; drive and
/// filesystem scans are slow and speculative and rank last.
pub fn builtin_strategies() -> Vec<StrategySpec> {
    vec![
        StrategySpec::new(ids::REGISTRY, WINDOWS, 100, Trust::High, RegistryStrategy),
        StrategySpec::new(
            ids::ENVIRONMENT,
            ALL_RECOGNIZED,
            90,
            Trust::High,
            EnvironmentStrategy,
        ),
        StrategySpec::new(
            ids::WELL_KNOWN,
            ALL_RECOGNIZED,
            80,
            Trust::High,
            WellKnownPathsStrategy,
        ),
        StrategySpec::new(
            ids::PACKAGE_MANAGER,
            LINUX,
            60,
            Trust::Medium,
            PackageManagerStrategy,
        ),
        StrategySpec::new(
            ids::BINARY_RELATIVE,
            ALL_RECOGNIZED,
            50,
            Trust::Medium,
            BinaryRelativeStrategy,
        ),
        StrategySpec::new(
            ids::DRIVE_ENUMERATION,
            WINDOWS,
            20,
            Trust::Medium,
            DriveEnumerationStrategy,
        ),
        StrategySpec::new(
            ids::FILESYSTEM_SCAN,
            ALL_RECOGNIZED,
            10,
            Trust::Medium,
            FilesystemScanStrategy::default(),
        ),
    ]
}
