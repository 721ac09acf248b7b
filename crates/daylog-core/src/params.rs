//! Parameter wrappers shared between the library surface and callers.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{DaylogError, Result};

/// A raw day-range query as the user typed it, before expansion against
/// today's date. Both ends optional; see
/// [`DayRange::resolve`](crate::stats::DayRange::resolve) for the
/// defaulting rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeQuery {
    pub first: Option<String>,
    pub last: Option<String>,
}

impl RangeQuery {
    pub fn new(first: Option<String>, last: Option<String>) -> Self {
        Self { first, last }
    }
}

fn set_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\.(\w+)(?:=(.+))?$").expect("literal pattern compiles"))
}

/// A `group.key` query or `group.key=value` assignment against the
/// group definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValue {
    pub group: String,
    pub key: String,
    /// `None` for a query, `Some` for an assignment.
    pub value: Option<String>,
}

impl SetValue {
    pub fn parse(expr: &str) -> Result<Self> {
        let caps = set_value_re()
            .captures(expr)
            .ok_or_else(|| DaylogError::Configuration {
                message: format!("expected group.key or group.key=value, got `{expr}`"),
            })?;
        Ok(Self {
            group: caps[1].to_string(),
            key: caps[2].to_string(),
            value: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }
}
