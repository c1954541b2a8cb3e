//! OS family enum selecting which strategies apply.

use serde::Serialize;
use strum::IntoEnumIterator;

/// The operating-system family a discovery run targets.
///
/// Each [`StrategySpec`](crate::StrategySpec) declares the families it
/// applies to; the engine uses this tag instead of scattered platform
/// checks. `Other` stands for any unrecognized family and has no
/// applicable strategies, so discovering on it yields an empty report.
///
/// # Example
///
/// ```rust
/// use tessdata_discovery::OsFamily;
///
/// assert_eq!(OsFamily::parse("Darwin"), OsFamily::MacOs);
/// assert_eq!(OsFamily::parse("plan9"), OsFamily::Other);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OsFamily {
    /// Microsoft Windows
    Windows,
    /// Linux distributions
    Linux,
    /// Apple macOS
    MacOs,
    /// Anything else; no strategies apply
    Other,
}

impl OsFamily {
    /// The family of the host this process is running on.
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Parse a family name, case-insensitively.
    ///
    /// Unrecognized names map to [`OsFamily::Other`] rather than failing:
    /// an unknown family is a valid "nothing to search" target.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" => Self::Windows,
            "linux" => Self::Linux,
            "macos" | "darwin" | "osx" => Self::MacOs,
            _ => Self::Other,
        }
    }

    /// Families that have at least one strategy.
    pub const fn recognized() -> &'static [OsFamily] {
        &[Self::Windows, Self::Linux, Self::MacOs]
    }

    /// Iterator over every family, including `Other`.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
