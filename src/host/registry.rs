//! Windows registry access.

use super::RegistryReader;

/// Timeout for a single `reg query` invocation.
#[cfg(windows)]
const REG_QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

/// Top-level registry hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hive {
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
    /// `HKEY_CURRENT_USER`
    CurrentUser,
}

impl Hive {
    /// Full hive name as accepted by `reg query`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::CurrentUser => "HKEY_CURRENT_USER",
        }
    }
}

/// Reads the real registry through `reg query`.
///
/// On non-Windows platforms every lookup returns `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRegistry;

impl RegistryReader for SystemRegistry {
    #[cfg(windows)]
    fn read_string(&self, hive: Hive, key: &str, value: &str) -> Option<String> {
        use super::command::output_with_timeout;
        use super::parser::parse_reg_query;

        let full_key = format!("{}\\{}", hive.as_str(), key);
        let output = output_with_timeout(
            std::path::Path::new("reg"),
            &["query", &full_key, "/v", value],
            REG_QUERY_TIMEOUT,
        )?;
        parse_reg_query(&output, value)
    }

    #[cfg(not(windows))]
    fn read_string(&self, _hive: Hive, _key: &str, _value: &str) -> Option<String> {
        None
    }
}

/// A registry with no keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl RegistryReader for NoRegistry {
    fn read_string(&self, _hive: Hive, _key: &str, _value: &str) -> Option<String> {
        None
    }
}
