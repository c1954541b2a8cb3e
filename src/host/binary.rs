//! Lookup of the tesseract executable, with fallback locations.

use super::command::output_with_timeout;
use super::parser::parse_reported_data_dir;
use super::{BinaryLocator, EnvSource};
use crate::OsFamily;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables that may name the executable directly.
const BINARY_ENV_VARS: &[&str] = &["TESSERACT_CMD", "TESSERACT_PATH"];

/// Timeout for asking a binary where its data lives.
const LIST_LANGS_TIMEOUT: Duration = Duration::from_secs(3);

const WINDOWS_FALLBACK_PATHS: &[&str] = &[
    "C:/Program Files/Tesseract-OCR/tesseract.exe",
    "C:/Program Files (x86)/Tesseract-OCR/tesseract.exe",
    "C:/tools/tesseract/tesseract.exe",
];

const UNIX_FALLBACK_PATHS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    "/opt/tesseract/bin/tesseract",
];

/// Finds tesseract on the real machine.
///
/// Lookup order:
///
/// 1. `TESSERACT_CMD` / `TESSERACT_PATH`, when they name an existing file
/// 2. Every match on the environment's `PATH` (via the `which` crate)
/// 3. Common install locations not always on `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBinaries;

impl BinaryLocator for SystemBinaries {
    fn locate(&self, env: &dyn EnvSource, os: OsFamily) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = Vec::new();
        let mut push = |path: PathBuf| {
            if path.is_file() && !found.contains(&path) {
                found.push(path);
            }
        };

        for var in BINARY_ENV_VARS {
            if let Some(value) = env.var(var).filter(|v| !v.trim().is_empty()) {
                push(PathBuf::from(value.trim()));
            }
        }

        // PATH comes from the injected environment, not the process
        if let Some(search_path) = env.var("PATH") {
            if let Ok(matches) = which::which_in_global("tesseract", Some(search_path)) {
                for path in matches {
                    push(path);
                }
            }
        }

        let fallbacks: &[&str] = match os {
            OsFamily::Windows => WINDOWS_FALLBACK_PATHS,
            OsFamily::Linux | OsFamily::MacOs => UNIX_FALLBACK_PATHS,
            OsFamily::Other => &[],
        };
        for path in fallbacks {
            push(PathBuf::from(path));
        }

        found
    }

    fn reported_data_dir(&self, binary: &Path) -> Option<String> {
        let output = output_with_timeout(binary, &["--list-langs"], LIST_LANGS_TIMEOUT)?;
        parse_reported_data_dir(&output)
    }
}

/// No binaries at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBinaries;

impl BinaryLocator for NoBinaries {
    fn locate(&self, _env: &dyn EnvSource, _os: OsFamily) -> Vec<PathBuf> {
        Vec::new()
    }

    fn reported_data_dir(&self, _binary: &Path) -> Option<String> {
        None
    }
}
