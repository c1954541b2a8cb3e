//! Installer-written registry keys.

use super::{PathStream, StrategyContext, StrategySource};
use crate::host::Hive;
use crate::StrategyError;
use std::path::Path;

/// Keys the Windows installers write, most specific first.
const INSTALL_KEYS: &[(Hive, &str)] = &[
    (Hive::LocalMachine, "SOFTWARE\\Tesseract-OCR"),
    (Hive::LocalMachine, "SOFTWARE\\WOW6432Node\\Tesseract-OCR"),
    (Hive::CurrentUser, "SOFTWARE\\Tesseract-OCR"),
];

const INSTALL_PATH_VALUE: &str = "InstallPath";

/// Yields `<InstallPath>\tessdata` for every installer key present.
///
/// Keys are read lazily, one per pulled path. Without a registry (or
/// without access to it) the stream is simply empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryStrategy;

impl StrategySource for RegistryStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        let registry = ctx.host.registry.clone();
        let paths = INSTALL_KEYS.iter().filter_map(move |(hive, key)| {
            let install = registry.read_string(*hive, key, INSTALL_PATH_VALUE)?;
            let install = install.trim();
            if install.is_empty() {
                return None;
            }
            tracing::debug!(hive = hive.as_str(), key, install, "installer key found");
            Some(Path::new(install).join("tessdata").to_string_lossy().into_owned())
        });
        Ok(Box::new(paths))
    }
}
