//! Sandboxed, containerized and user-local package trees on Linux.

use super::{PathStream, StrategyContext, StrategySource};
use crate::StrategyError;
use std::fs;
use std::path::{Path, PathBuf};

/// Snap mounts a self-contained filesystem per package.
const SNAP_PATHS: &[&str] = &[
    "/snap/tesseract/current/usr/share/tesseract-ocr/5/tessdata",
    "/snap/tesseract/current/usr/share/tesseract-ocr/4.00/tessdata",
    "/snap/tesseract/current/usr/share/tessdata",
];

/// Fixed package-manager prefixes, yielded as raw templates.
const PREFIX_PATHS: &[&str] = &[
    "${CONDA_PREFIX}/share/tessdata",
    "/home/linuxbrew/.linuxbrew/share/tessdata",
    "~/.linuxbrew/share/tessdata",
    "~/.nix-profile/share/tessdata",
    "/run/current-system/sw/share/tessdata",
    "~/.local/share/tessdata",
    "~/.local/share/tesseract-ocr/tessdata",
    "~/.local/share/tesseract-ocr/5/tessdata",
];

/// Flatpak installation roots holding one directory per application.
const FLATPAK_SYSTEM_ROOT: &str = "/var/lib/flatpak/app";
const FLATPAK_USER_ROOT: &str = ".local/share/flatpak/app";

/// Location of the data directory inside a flatpak application tree.
const FLATPAK_DATA_SUFFIX: &str = "current/active/files/share/tessdata";

/// Yields snap mounts, package prefixes, then flatpak application trees.
///
/// Flatpak roots are listed lazily, after everything else has been
/// yielded; each installed application contributes one candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageManagerStrategy;

impl StrategySource for PackageManagerStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        let fixed = SNAP_PATHS
            .iter()
            .chain(PREFIX_PATHS)
            .map(|p| p.to_string());

        let mut flatpak_roots = vec![PathBuf::from(FLATPAK_SYSTEM_ROOT)];
        if let Some(home) = ctx.host.env.home_dir() {
            flatpak_roots.push(home.join(FLATPAK_USER_ROOT));
        }
        let flatpak = flatpak_roots
            .into_iter()
            .flat_map(|root| flatpak_apps(&root))
            .map(|app| app.join(FLATPAK_DATA_SUFFIX).to_string_lossy().into_owned());

        Ok(Box::new(fixed.chain(flatpak)))
    }
}

/// Application directories under a flatpak root, sorted for stable order.
fn flatpak_apps(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut apps: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    apps.sort();
    apps
}
