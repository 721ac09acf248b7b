//! Flat `key=value` configuration file.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{DaylogError, Result};

/// Default statistics lookback, in days, when `stat_day` is absent or
/// unusable.
pub const DEFAULT_STAT_DAYS: i64 = 7;

/// Strips a trailing `#` comment and surrounding whitespace; an empty
/// result means the line carries nothing.
pub(crate) fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

fn key_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)(?:=(.*))?$").expect("literal pattern compiles"))
}

/// Parses `key=value` (or bare `key`, meaning an empty value) from one
/// already-stripped line.
pub(crate) fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let caps = key_value_re().captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
    Some((key, value))
}

/// The loaded `config` file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the config file text. Comment and blank lines are
    /// skipped; any other line that is not `key=value` is a hard error
    /// naming the line.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut config = Self::new();
        for (i, raw) in text.lines().enumerate() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }
            let (key, value) = parse_key_value(line).ok_or_else(|| DaylogError::InvalidConfig {
                line: i + 1,
                text: raw.to_string(),
            })?;
            config.values.insert(key.to_string(), value.to_string());
        }
        Ok(config)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The `stat_day` lookback; falls back to [`DEFAULT_STAT_DAYS`]
    /// when the key is absent, unparsable, or negative.
    pub fn stat_days(&self) -> i64 {
        self.get("stat_day")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|n| *n >= 0)
            .unwrap_or(DEFAULT_STAT_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_skips_comments() {
        let config = Config::from_text(
            "# daylog configuration\n\
             stat_day=14\n\
             \n\
             color_scheme=bash # trailing comment\n",
        )
        .unwrap();
        assert_eq!(config.get("stat_day"), Some("14"));
        assert_eq!(config.get("color_scheme"), Some("bash"));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn malformed_line_is_fatal() {
        let err = Config::from_text("stat_day=7\n!!!\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn stat_days_falls_back_to_default() {
        assert_eq!(Config::new().stat_days(), DEFAULT_STAT_DAYS);
        let garbage = Config::from_text("stat_day=soon\n").unwrap();
        assert_eq!(garbage.stat_days(), DEFAULT_STAT_DAYS);
        let negative = Config::from_text("stat_day=-3\n").unwrap();
        assert_eq!(negative.stat_days(), DEFAULT_STAT_DAYS);
        let explicit = Config::from_text("stat_day=30\n").unwrap();
        assert_eq!(explicit.stat_days(), 30);
        let zero = Config::from_text("stat_day=0\n").unwrap();
        assert_eq!(zero.stat_days(), 0);
    }
}
