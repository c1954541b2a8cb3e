//! Drive-letter enumeration.

use super::{PathStream, StrategyContext, StrategySource};
use crate::StrategyError;
use std::time::Duration;

/// How long a drive gets to answer before it is skipped.
pub const DRIVE_RESPONSE_TIMEOUT: Duration = Duration::from_millis(250);

/// Install locations relative to a drive root.
const DRIVE_SUFFIXES: &[&str] = &[
    "Program Files\\Tesseract-OCR\\tessdata",
    "Program Files (x86)\\Tesseract-OCR\\tessdata",
    "Tesseract-OCR\\tessdata",
    "tools\\tesseract\\tessdata",
    "tessdata",
];

/// Yields every known suffix under every responsive drive root.
///
/// Drives are checked lazily as the stream is pulled, each bounded by
/// [`DRIVE_RESPONSE_TIMEOUT`], so a hung network drive costs at most that
/// long and never stalls the rest of the stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveEnumerationStrategy;

impl StrategySource for DriveEnumerationStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        let mounts = ctx.host.mounts.clone();
        let roots = mounts.drive_roots();
        let paths = roots
            .into_iter()
            .filter(move |root| {
                let responsive = mounts.is_responsive(root, DRIVE_RESPONSE_TIMEOUT);
                if !responsive {
                    tracing::debug!(root = %root.display(), "drive skipped");
                }
                responsive
            })
            .flat_map(|root| {
                DRIVE_SUFFIXES
                    .iter()
                    .map(move |suffix| root.join(suffix).to_string_lossy().into_owned())
            });
        Ok(Box::new(paths))
    }
}
