//! Host collaborators consumed by strategies.
//!
//! Every OS primitive a strategy reads goes through one of these traits,
//! so the engine can run against fakes without touching the real machine:
//!
//! - [`EnvSource`]: environment variables and the home directory
//! - [`RegistryReader`]: the Windows configuration database
//! - [`MountEnumerator`]: drive roots and their responsiveness
//! - [`BinaryLocator`]: the OCR engine's executables and what they report
//!
//! [`Host`] bundles one of each. [`Host::system`] wires the real
//! implementations; [`Host::isolated`] wires null ones around a given
//! environment.

mod binary;
mod command;
mod env;
mod mounts;
mod parser;
mod registry;

pub use binary::{NoBinaries, SystemBinaries};
pub use env::{StaticEnv, SystemEnv};
pub use mounts::{NoMounts, SystemMounts};
pub use registry::{Hive, NoRegistry, SystemRegistry};

use crate::OsFamily;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Read access to environment variables.
pub trait EnvSource: Send + Sync {
    /// Value of `name`, or `None` if unset or not valid Unicode.
    fn var(&self, name: &str) -> Option<String>;

    /// The current user's home directory.
    ///
    /// Defaults to `HOME`, falling back to `USERPROFILE`.
    fn home_dir(&self) -> Option<PathBuf> {
        let non_empty = |name: &str| self.var(name).filter(|home| !home.is_empty());
        non_empty("HOME")
            .or_else(|| non_empty("USERPROFILE"))
            .map(PathBuf::from)
    }
}

/// Read access to the OS configuration database.
pub trait RegistryReader: Send + Sync {
    /// String value `value` under `hive\key`.
    ///
    /// Returns `None` when the key or value is missing, access is denied,
    /// or there is no registry on this platform.
    fn read_string(&self, hive: Hive, key: &str, value: &str) -> Option<String>;
}

/// Enumeration of mounted drive roots.
pub trait MountEnumerator: Send + Sync {
    /// Candidate drive roots, e.g. `C:\`. Empty where drives don't exist.
    fn drive_roots(&self) -> Vec<PathBuf>;

    /// Whether `root` answers an availability check within `timeout`.
    fn is_responsive(&self, root: &Path, timeout: Duration) -> bool;
}

/// Location of the OCR engine's own executables.
pub trait BinaryLocator: Send + Sync {
    /// Every `tesseract` executable that can be found, best first.
    fn locate(&self, env: &dyn EnvSource, os: OsFamily) -> Vec<PathBuf>;

    /// The data directory the binary itself reports, if it reports one.
    fn reported_data_dir(&self, binary: &Path) -> Option<String>;
}

/// The set of collaborators a discovery run reads from.
///
/// Cheap to clone; every collaborator is shared.
#[derive(Clone)]
pub struct Host {
    /// Environment variables.
    pub env: Arc<dyn EnvSource>,
    /// Configuration database.
    pub registry: Arc<dyn RegistryReader>,
    /// Drive enumeration.
    pub mounts: Arc<dyn MountEnumerator>,
    /// OCR engine executables.
    pub binaries: Arc<dyn BinaryLocator>,
}

impl Host {
    /// Collaborators backed by the real machine.
    pub fn system() -> Self {
        Self {
            env: Arc::new(SystemEnv),
            registry: Arc::new(SystemRegistry),
            mounts: Arc::new(SystemMounts),
            binaries: Arc::new(SystemBinaries),
        }
    }

    /// Collaborators that read nothing except the given environment.
    pub fn isolated(env: impl EnvSource + 'static) -> Self {
        Self {
            env: Arc::new(env),
            registry: Arc::new(NoRegistry),
            mounts: Arc::new(NoMounts),
            binaries: Arc::new(NoBinaries),
        }
    }

    /// Replace the registry reader.
    pub fn with_registry(mut self, registry: impl RegistryReader + 'static) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Replace the mount enumerator.
    pub fn with_mounts(mut self, mounts: impl MountEnumerator + 'static) -> Self {
        self.mounts = Arc::new(mounts);
        self
    }

    /// Replace the binary locator.
    pub fn with_binaries(mut self, binaries: impl BinaryLocator + 'static) -> Self {
        self.binaries = Arc::new(binaries);
        self
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
