//! Paths derived from the location of the tesseract executable.

use super::{PathStream, StrategyContext, StrategySource};
use crate::{OsFamily, StrategyError};
use std::path::{Path, PathBuf};

const WINDOWS_RELATIVE: &[&str] = &[
    "tessdata",
    "../tessdata",
    "../../tessdata",
    "../share/tessdata",
    "../share/tesseract-ocr/tessdata",
];

const UNIX_RELATIVE: &[&str] = &[
    "../share/tesseract-ocr/5/tessdata",
    "../share/tesseract-ocr/4.00/tessdata",
    "../share/tesseract-ocr/tessdata",
    "../share/tesseract/tessdata",
    "../share/tessdata",
    "../../share/tesseract-ocr/tessdata",
    "../../share/tesseract/tessdata",
    "../tessdata",
    "tessdata",
];

/// Yields, for every located binary, the directory it reports and then
/// its sibling and parent-relative data directories.
///
/// Binaries are located up front; each one is asked for its data
/// directory only when the stream reaches it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryRelativeStrategy;

impl BinaryRelativeStrategy {
    /// Relative suffixes tried against a binary's directory on `os`.
    pub fn relative_paths(os: OsFamily) -> &'static [&'static str] {
        match os {
            OsFamily::Windows => WINDOWS_RELATIVE,
            OsFamily::Linux | OsFamily::MacOs => UNIX_RELATIVE,
            OsFamily::Other => &[],
        }
    }
}

impl StrategySource for BinaryRelativeStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        let host = ctx.host.clone();
        let os = ctx.os;
        let binaries = host.binaries.locate(host.env.as_ref(), os);
        tracing::debug!(count = binaries.len(), "tesseract binaries located");

        let paths = binaries.into_iter().flat_map(move |binary| {
            let reported = host.binaries.reported_data_dir(&binary);
            let relative = binary_dir(&binary)
                .into_iter()
                .flat_map(move |dir| {
                    BinaryRelativeStrategy::relative_paths(os)
                        .iter()
                        .map(move |rel| dir.join(rel).to_string_lossy().into_owned())
                });
            reported.into_iter().chain(relative)
        });
        Ok(Box::new(paths))
    }
}

/// Directory holding the binary, with symlinks resolved so that
/// `/usr/bin/tesseract -> /opt/tesseract/bin/tesseract` is searched from
/// `/opt/tesseract/bin`.
fn binary_dir(binary: &Path) -> Option<PathBuf> {
    let resolved = std::fs::canonicalize(binary).unwrap_or_else(|_| binary.to_path_buf());
    resolved.parent().map(Path::to_path_buf)
}
