//! Environment variables pointing at language data.

use super::{PathStream, StrategyContext, StrategySource};
use crate::StrategyError;
use std::path::Path;

/// Variables that conventionally name a data directory or its parent.
pub const DATA_ENV_VARS: &[&str] = &["TESSDATA_PREFIX", "TESSERACT_DATA_PATH", "TESSERACT_PREFIX"];

/// Yields each set variable's value, then `<value>/tessdata`.
///
/// A prefix variable may point either at the data directory itself or at
/// the directory containing it; both spellings are yielded and the probe
/// keeps whichever holds data.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentStrategy;

impl StrategySource for EnvironmentStrategy {
    fn produce(&self, ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
        let mut paths = Vec::new();
        for var in DATA_ENV_VARS {
            let Some(value) = ctx.host.env.var(var) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            tracing::debug!(var, value, "data directory variable set");
            paths.push(value.to_string());
            paths.push(Path::new(value).join("tessdata").to_string_lossy().into_owned());
        }
        Ok(Box::new(paths.into_iter()))
    }
}
