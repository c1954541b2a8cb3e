//! Parsing of helper command output.

use regex::Regex;
use std::sync::OnceLock;

/// Extract the data directory from `tesseract --list-langs` output.
///
/// Handles the header line tesseract prints before the language list:
///
/// - `List of available languages in "/usr/share/tesseract-ocr/5/tessdata/" (3):`
/// - `List of available languages (2):` -> no directory
///
/// A trailing path separator is removed.
pub(crate) fn parse_reported_data_dir(output: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"List of available languages in "([^"]+)""#).expect("Invalid regex pattern")
    });

    let dir = re.captures(output)?.get(1)?.as_str();
    let trimmed = dir.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract a string value from `reg query <key> /v <value>` output.
///
/// The value line looks like `    InstallPath    REG_SZ    C:\Program Files\Tesseract-OCR`;
/// the data may itself contain spaces.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn parse_reg_query(output: &str, value: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix(value)?;
        let rest = rest.trim_start();
        let (kind, data) = rest.split_once(char::is_whitespace)?;
        if !matches!(kind, "REG_SZ" | "REG_EXPAND_SZ") {
            return None;
        }
        let data = data.trim();
        (!data.is_empty()).then(|| data.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_langs_v5() {
        let output = "List of available languages in \"/usr/share/tesseract-ocr/5/tessdata/\" (3):\neng\nosd\ndeu\n";
        assert_eq!(
            parse_reported_data_dir(output).as_deref(),
            Some("/usr/share/tesseract-ocr/5/tessdata")
        );
    }

    #[test]
    fn test_parse_list_langs_windows() {
        let output = "List of available languages in \"C:\\Program Files\\Tesseract-OCR/tessdata/\" (2):\r\neng\r\nosd\r\n";
        assert_eq!(
            parse_reported_data_dir(output).as_deref(),
            Some("C:\\Program Files\\Tesseract-OCR/tessdata")
        );
    }

    #[test]
    fn test_parse_list_langs_without_dir() {
        assert!(parse_reported_data_dir("List of available languages (2):\neng\nosd\n").is_none());
        assert!(parse_reported_data_dir("").is_none());
    }

    #[test]
    fn test_parse_reg_query() {
        let output = "\r\nHKEY_LOCAL_MACHINE\\SOFTWARE\\Tesseract-OCR\r\n    InstallPath    REG_SZ    C:\\Program Files\\Tesseract-OCR\r\n\r\n";
        assert_eq!(
            parse_reg_query(output, "InstallPath").as_deref(),
            Some("C:\\Program Files\\Tesseract-OCR")
        );
    }

    #[test]
    fn test_parse_reg_query_missing_value() {
        let output = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Tesseract-OCR\n    Version    REG_SZ    5.3.0\n";
        assert!(parse_reg_query(output, "InstallPath").is_none());
    }

    #[test]
    fn test_parse_reg_query_ignores_non_string_types() {
        let output = "    InstallPath    REG_DWORD    0x1\n";
        assert!(parse_reg_query(output, "InstallPath").is_none());
    }
}
