//! Fixed, hand-maintained install locations per OS.

use super::{PathStream, StrategyContext, StrategySource};
use crate::{OsFamily, StrategyError};

const WINDOWS_PATHS: &[&str] = &[
    "C:/Program Files/Tesseract-OCR/tessdata",
    "C:/Program Files (x86)/Tesseract-OCR/tessdata",
    "${PROGRAMFILES}/Tesseract-OCR/tessdata",
    "${PROGRAMFILES(X86)}/Tesseract-OCR/tessdata",
    "${LOCALAPPDATA}/Programs/Tesseract-OCR/tessdata",
    "${LOCALAPPDATA}/Tesseract-OCR/tessdata",
    "C:/Tesseract-OCR/tessdata",
    "C:/tools/tesseract/tessdata",
    "${ChocolateyInstall}/lib/tesseract/tools/tessdata",
    "~/scoop/apps/tesseract/current/tessdata",
    "~/AppData/Local/Tesseract-OCR/tessdata",
    "~/tessdata",
];

// Debian and Ubuntu install into a version-numbered directory.
const LINUX_PATHS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tesseract-ocr/tessdata",
    "/usr/share/tesseract/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tesseract-ocr/tessdata",
    "/usr/local/share/tessdata",
    "/usr/lib/tesseract-ocr/tessdata",
    "/opt/tesseract/share/tessdata",
    "~/.local/share/tesseract/tessdata",
    "~/.tesseract/tessdata",
    "~/tessdata",
];

const MACOS_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/share/tesseract-ocr/tessdata",
    "/usr/local/share/tessdata",
    "/usr/local/share/tesseract-ocr/tessdata",
    "/opt/local/share/tessdata",
    "/usr/share/tesseract-ocr/tessdata",
    "~/.local/share/tesseract/tessdata",
    "~/tessdata",
];

/// Yields the fixed location list for the target OS, as raw templates.
///
/// Templates may contain `~` and environment tokens; a template whose
/// tokens cannot be expanded on this host is discarded by the probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellKnownPathsStrategy;

impl WellKnownPathsStrategy {
    /// The template list for `os`.
    pub fn templates(os: OsFamily) -> &'static [&'static str] {
        match os {
            OsFamily::Windows => WINDOWS_PATHS,
            OsFamily::Linux => LINUX_PATHS,
            OsFamily::MacOs => MACOS_PATHS,
            OsFamily::Other => &[],
        }
    }
}

impl StrategySource for WellKnownPathsStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        Ok(Box::new(
            Self::templates(ctx.os).iter().map(|t| t.to_string()),
        ))
    }
}
