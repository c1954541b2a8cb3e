//! Depth-bounded walk of install roots.

use super::drives::DRIVE_RESPONSE_TIMEOUT;
use super::{PathStream, StrategyContext, StrategySource};
use crate::host::MountEnumerator;
use crate::{OsFamily, StrategyError};
use std::fs;
use std::path::{Path, PathBuf};

const UNIX_ROOTS: &[&str] = &["/usr", "/usr/local", "/opt"];

/// Windows roots are searched on this many responsive drives.
const WINDOWS_SCAN_DRIVES: usize = 2;
const WINDOWS_ROOT_SUFFIXES: &[&str] = &["Program Files", "Program Files (x86)"];

/// Directory names never entered.
const SKIP_DIRS: &[&str] = &[
    "windows",
    "system32",
    "syswow64",
    "$recycle.bin",
    "recovery",
    "proc",
    "sys",
    "dev",
    "run",
    "tmp",
    "boot",
    ".git",
    ".svn",
    "__pycache__",
    "node_modules",
    ".vscode",
    ".cache",
];

/// Name fragments that suggest an install tree worth entering.
const INTERESTING: &[&str] = &[
    "tesseract", "ocr", "program", "share", "local", "opt", "tools", "bin", "brew", "cellar",
    "apps",
];

const DATA_DIR_NAME: &str = "tessdata";

/// Walks install roots looking for directories named `tessdata`.
///
/// The walk is lazy, depth-first and bounded by `max_depth`. Symbolic
/// links are not followed. Below the root, only directories whose names
/// suggest an install tree are entered. A `tessdata` directory is yielded
/// and not descended into.
#[derive(Debug, Clone, Default)]
pub struct FilesystemScanStrategy {
    roots: Option<Vec<PathBuf>>,
    max_depth: Option<usize>,
}

impl FilesystemScanStrategy {
    /// Scan explicit roots instead of the per-OS defaults.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            roots: Some(roots),
            max_depth: None,
        }
    }

    /// Override the maximum depth below each root.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn default_depth(os: OsFamily) -> usize {
        match os {
            OsFamily::Windows => 4,
            _ => 5,
        }
    }

    fn default_roots(os: OsFamily, mounts: &dyn MountEnumerator) -> Vec<PathBuf> {
        match os {
            OsFamily::Windows => mounts
                .drive_roots()
                .into_iter()
                .filter(|root| mounts.is_responsive(root, DRIVE_RESPONSE_TIMEOUT))
                .take(WINDOWS_SCAN_DRIVES)
                .flat_map(|root| WINDOWS_ROOT_SUFFIXES.iter().map(move |s| root.join(s)))
                .collect(),
            OsFamily::Linux | OsFamily::MacOs => UNIX_ROOTS.iter().map(PathBuf::from).collect(),
            OsFamily::Other => Vec::new(),
        }
    }
}

impl StrategySource for FilesystemScanStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        let roots = match &self.roots {
            Some(roots) => roots.clone(),
            None => Self::default_roots(ctx.os, ctx.host.mounts.as_ref()),
        };
        let max_depth = self.max_depth.unwrap_or_else(|| Self::default_depth(ctx.os));
        tracing::debug!(roots = roots.len(), max_depth, "filesystem scan starting");
        Ok(Box::new(ScanWalk::new(roots, max_depth)))
    }
}

/// Lazy depth-first walk; pulls one directory listing per step.
struct ScanWalk {
    stack: Vec<(PathBuf, usize)>,
    max_depth: usize,
}

impl ScanWalk {
    fn new(roots: Vec<PathBuf>, max_depth: usize) -> Self {
        // reversed so roots are visited in the given order
        let stack = roots.into_iter().rev().map(|r| (r, 0)).collect();
        Self { stack, max_depth }
    }

    fn push_children(&mut self, dir: &Path, depth: usize) {
        if depth >= self.max_depth {
            return;
        }
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        let mut children: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            // file_type() does not follow symlinks
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.path())
            .filter(|p| is_data_dir(p) || should_enter(p))
            .collect();
        children.sort();
        self.stack
            .extend(children.into_iter().rev().map(|c| (c, depth + 1)));
    }
}

impl Iterator for ScanWalk {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some((dir, depth)) = self.stack.pop() {
            if is_data_dir(&dir) {
                return Some(dir.to_string_lossy().into_owned());
            }
            self.push_children(&dir, depth);
        }
        None
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn is_data_dir(path: &Path) -> bool {
    dir_name(path) == DATA_DIR_NAME
}

/// Whether a directory below a root is worth entering.
fn should_enter(path: &Path) -> bool {
    let name = dir_name(path);
    if SKIP_DIRS.contains(&name.as_str()) {
        return false;
    }
    // short names (bin, lib, 5) and version directories (4.00, 5.3.0)
    name.len() < 4
        || name.starts_with(|c: char| c.is_ascii_digit())
        || INTERESTING.iter().any(|keyword| name.contains(keyword))
}
