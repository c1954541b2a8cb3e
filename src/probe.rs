//! Validation of a single candidate path.
//!
//! A probe expands home and environment tokens, resolves the path to its
//! canonical form and counts the language-data files directly inside it.
//! Probing is best-effort: any I/O failure reads as "does not exist".

use crate::host::EnvSource;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// File extension of a recognized language-data file.
pub const DATA_FILE_EXTENSION: &str = "traineddata";

/// Directory name fragment that marks a language-data directory.
const DATA_DIR_MARKER: &str = "tessdata";

/// Result of probing one path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// The path resolved and could be read.
    pub exists: bool,
    /// The path is a directory.
    pub is_directory: bool,
    /// Non-empty `.traineddata` files directly inside the directory.
    pub file_count: usize,
    /// Canonical form of the path, when it exists.
    pub canonical: Option<PathBuf>,
}

impl ProbeResult {
    fn missing() -> Self {
        Self::default()
    }
}

/// Probe `raw` after expanding `~`, `$VAR`, `${VAR}` and `%VAR%` tokens.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::host::StaticEnv;
/// use tessdata_discovery::probe::probe;
///
/// let result = probe("$NOT_SET/tessdata", &StaticEnv::default());
/// assert!(!result.exists);
/// ```
pub fn probe(raw: &str, env: &dyn EnvSource) -> ProbeResult {
    let Some(canonical) = resolve(raw, env) else {
        return ProbeResult::missing();
    };
    inspect(canonical)
}

/// Expand `raw` and canonicalize it. `None` if it cannot be resolved.
fn resolve(raw: &str, env: &dyn EnvSource) -> Option<PathBuf> {
    let expanded = expand_path(raw, env)?;
    let canonical = fs::canonicalize(&expanded)
        .map_err(|e| tracing::trace!(path = %expanded.display(), error = %e, "unresolvable"))
        .ok()?;
    Some(strip_verbatim(canonical))
}

fn inspect(canonical: PathBuf) -> ProbeResult {
    let metadata = match fs::metadata(&canonical) {
        Ok(m) => m,
        Err(_) => return ProbeResult::missing(),
    };

    if !metadata.is_dir() {
        return ProbeResult {
            exists: true,
            is_directory: false,
            file_count: 0,
            canonical: Some(canonical),
        };
    }

    // An unreadable directory counts as absent.
    match count_data_files(&canonical) {
        Some(file_count) => ProbeResult {
            exists: true,
            is_directory: true,
            file_count,
            canonical: Some(canonical),
        },
        None => ProbeResult::missing(),
    }
}

/// Count non-empty `*.traineddata` files directly inside `dir`.
fn count_data_files(dir: &Path) -> Option<usize> {
    let entries = fs::read_dir(dir).ok()?;
    let count = entries
        .filter_map(Result::ok)
        .filter(|entry| is_data_file_name(&entry.file_name()))
        // follows symlinks: distributions often link data files into place
        .filter(|entry| {
            fs::metadata(entry.path())
                .map(|m| m.is_file() && m.len() > 0)
                .unwrap_or(false)
        })
        .count();
    Some(count)
}

fn is_data_file_name(name: &OsStr) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION))
}

/// Whether the final component of `path` names a language-data directory.
pub fn looks_like_data_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.to_ascii_lowercase().contains(DATA_DIR_MARKER))
}

/// Expand home and environment tokens in `raw`.
///
/// Returns `None` for blank input or when a token names an unset variable.
pub fn expand_path(raw: &str, env: &dyn EnvSource) -> Option<PathBuf> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| {
        Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)|%([^%/\\]+)%")
            .expect("Invalid regex pattern")
    });

    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let with_home = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            let home = env.home_dir()?;
            format!("{}{}", home.display(), rest)
        }
        _ => raw.to_string(),
    };

    let mut missing = false;
    let expanded = token.replace_all(&with_home, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        match env.var(name).filter(|v| !v.is_empty()) {
            Some(value) => value,
            None => {
                missing = true;
                String::new()
            }
        }
    });

    if missing {
        return None;
    }
    Some(PathBuf::from(expanded.into_owned()))
}

/// Remove the `\\?\` prefix Windows adds to canonical paths.
fn strip_verbatim(path: PathBuf) -> PathBuf {
    if cfg!(windows) {
        if let Some(s) = path.to_str() {
            if let Some(rest) = s.strip_prefix(r"\\?\UNC\") {
                return PathBuf::from(format!(r"\\{rest}"));
            }
            if let Some(rest) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(rest);
            }
        }
    }
    path
}

/// Comparison key for a canonical path.
///
/// Lower-cased where the filesystem is case-insensitive by default.
pub fn canonical_key(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(any(windows, target_os = "macos")) {
        s.to_lowercase()
    } else {
        s.into_owned()
    }
}

/// Probe results shared by every strategy within one discovery run.
///
/// Keyed by canonical path, so a directory reached through several raw
/// paths or several strategies is listed only once. The lock is never held
/// across filesystem access.
#[derive(Debug, Default)]
pub struct ProbeCache {
    entries: Mutex<HashMap<String, ProbeResult>>,
}

impl ProbeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `raw`, reusing a cached listing of the same canonical path.
    pub fn probe(&self, raw: &str, env: &dyn EnvSource) -> ProbeResult {
        let Some(canonical) = resolve(raw, env) else {
            return ProbeResult::missing();
        };

        let key = canonical_key(&canonical);
        if let Some(hit) = self.lookup(&key) {
            tracing::trace!(path = %canonical.display(), "probe cache hit");
            return hit;
        }

        let result = inspect(canonical);
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, result.clone());
        }
        result
    }

    /// Number of distinct canonical paths probed so far.
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    fn lookup(&self, key: &str) -> Option<ProbeResult> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}
