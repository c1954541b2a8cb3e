//! Environment variable sources.

use super::EnvSource;
use std::collections::HashMap;

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, independent of the process environment.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::host::{EnvSource, StaticEnv};
///
/// let env = StaticEnv::from_iter([("TESSDATA_PREFIX", "/opt/tessdata")]);
/// assert_eq!(env.var("TESSDATA_PREFIX").as_deref(), Some("/opt/tessdata"));
/// assert!(env.var("HOME").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    /// Set `name` to `value`, replacing any previous value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
