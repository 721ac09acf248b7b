//! Classification group definitions and the INI-like settings file.
//!
//! A group is plain data here: name, display label, render color, and
//! the regex pattern text. Compilation of patterns is a separate,
//! explicit step in [`crate::classify`], so an uncompiled group can
//! never be used for matching by accident.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{parse_key_value, strip_comment};
use crate::error::{DaylogError, Result};

/// Name of the reserved catch-all group that always exists.
pub const GLOBAL_GROUP: &str = "global";

/// One classification bucket as persisted in the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefinition {
    pub name: String,
    pub label: String,
    pub color: String,
    pub pattern: String,
}

impl GroupDefinition {
    /// A fresh group; the label defaults to the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            color: String::new(),
            pattern: String::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.name == GLOBAL_GROUP
    }

    /// Reads one settable attribute by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "label" => Some(&self.label),
            "color" => Some(&self.color),
            "pattern" => Some(&self.pattern),
            _ => None,
        }
    }

    /// Sets one attribute by key; unknown keys are a configuration
    /// error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "label" => self.label = value.to_string(),
            "color" => self.color = value.to_string(),
            "pattern" => self.pattern = value.to_string(),
            _ => {
                return Err(DaylogError::Configuration {
                    message: format!("unknown group key: {key}"),
                })
            }
        }
        Ok(())
    }
}

impl fmt::Display for GroupDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        writeln!(f, "label={}", self.label)?;
        writeln!(f, "color={}", self.color)?;
        writeln!(f, "pattern={}", self.pattern)
    }
}

fn section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[(\w+)\]$").expect("literal pattern compiles"))
}

/// The full set of group definitions, in settings-file order.
///
/// Order matters: classification is first-match-wins, and persisting
/// writes the groups back in this same order, so match priority is
/// stable across runs. The `global` group is always present and always
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    groups: Vec<GroupDefinition>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            groups: vec![GroupDefinition::new(GLOBAL_GROUP)],
        }
    }

    /// Parses the settings file: `[name]` section headers with
    /// `key=value` lines below, an implicit leading `global` section,
    /// `#` comments and blank lines skipped. Anything else aborts the
    /// load with the line number.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut settings = Self::new();
        let mut current = 0;
        for (i, raw) in text.lines().enumerate() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = section_re().captures(line) {
                current = settings.ensure(&caps[1]);
                continue;
            }
            if let Some((key, value)) = parse_key_value(line) {
                settings.groups[current].set(key, value).map_err(|_| {
                    DaylogError::InvalidSetting {
                        line: i + 1,
                        text: raw.to_string(),
                    }
                })?;
                continue;
            }
            return Err(DaylogError::InvalidSetting {
                line: i + 1,
                text: raw.to_string(),
            });
        }
        Ok(settings)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupDefinition> {
        self.groups.iter()
    }

    pub fn get(&self, name: &str) -> Option<&GroupDefinition> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GroupDefinition> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Index of the named group, appending a fresh definition when it
    /// does not exist yet.
    pub fn ensure(&mut self, name: &str) -> usize {
        if let Some(i) = self.groups.iter().position(|g| g.name == name) {
            return i;
        }
        self.groups.push(GroupDefinition::new(name));
        self.groups.len() - 1
    }

    /// Serializes every group as an INI section, in priority order.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            out.push_str(&group.to_string());
        }
        out
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# daylog groups
label=Other
color=white

[work]
label=Work
color=red
pattern=^(Coding|Review)

[rest]
label=Rest
color=green
pattern=Sleep
";

    #[test]
    fn implicit_leading_global_section() {
        let settings = Settings::from_text(SAMPLE).unwrap();
        assert_eq!(settings.len(), 3);
        let global = settings.get(GLOBAL_GROUP).unwrap();
        assert_eq!(global.label, "Other");
        assert_eq!(global.color, "white");
        assert_eq!(global.pattern, "");
    }

    #[test]
    fn groups_keep_file_order() {
        let settings = Settings::from_text(SAMPLE).unwrap();
        let names: Vec<&str> = settings.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, [GLOBAL_GROUP, "work", "rest"]);
    }

    #[test]
    fn round_trip_preserves_order_and_values() {
        let settings = Settings::from_text(SAMPLE).unwrap();
        let reparsed = Settings::from_text(&settings.to_text()).unwrap();
        assert_eq!(reparsed, settings);
    }

    #[test]
    fn label_defaults_to_name() {
        let settings = Settings::from_text("[mail]\npattern=Mail\n").unwrap();
        let mail = settings.get("mail").unwrap();
        assert_eq!(mail.label, "mail");
    }

    #[test]
    fn invalid_lines_are_fatal_with_line_number() {
        let err = Settings::from_text("[work]\nlabel=Work\n???\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
        let err = Settings::from_text("[work]\nflavor=sour\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn ensure_appends_new_groups_at_the_end() {
        let mut settings = Settings::new();
        let i = settings.ensure("work");
        assert_eq!(i, 1);
        assert_eq!(settings.ensure("work"), 1);
        settings.get_mut("work").unwrap().set("color", "red").unwrap();
        assert_eq!(settings.get("work").unwrap().color, "red");
    }
}
