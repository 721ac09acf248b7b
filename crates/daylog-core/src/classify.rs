//! Compiled classification of activity content into groups.
//!
//! Compilation is an explicit phase: [`CompiledSet::compile`] turns the
//! whole [`Settings`] into ready-to-match groups up front, so an
//! invalid pattern surfaces as one fatal configuration error before any
//! statistics run, never lazily mid-report.

use regex::Regex;

use crate::error::{DaylogError, Result};
use crate::settings::{GroupDefinition, Settings};

/// One group with its pattern compiled.
#[derive(Debug)]
pub struct CompiledGroup {
    def: GroupDefinition,
    /// `None` for an empty pattern, which never matches. The reserved
    /// `global` group typically has no pattern and collects its time as
    /// the derived remainder instead.
    regex: Option<Regex>,
}

impl CompiledGroup {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn label(&self) -> &str {
        &self.def.label
    }

    pub fn color(&self) -> &str {
        &self.def.color
    }

    pub fn is_global(&self) -> bool {
        self.def.is_global()
    }

    pub fn matches(&self, content: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(content),
            None => false,
        }
    }
}

/// All groups compiled, in settings-file priority order.
#[derive(Debug)]
pub struct CompiledSet {
    groups: Vec<CompiledGroup>,
    global: usize,
}

impl CompiledSet {
    /// Compiles every group's pattern. Any invalid pattern is a fatal
    /// configuration error naming the group and the pattern text.
    pub fn compile(settings: &Settings) -> Result<Self> {
        let mut groups = Vec::with_capacity(settings.len());
        for def in settings.iter() {
            let regex = if def.pattern.is_empty() {
                None
            } else {
                Some(
                    Regex::new(&def.pattern).map_err(|e| DaylogError::InvalidPattern {
                        group: def.name.clone(),
                        pattern: def.pattern.clone(),
                        source: e,
                    })?,
                )
            };
            groups.push(CompiledGroup {
                def: def.clone(),
                regex,
            });
        }
        let global = groups
            .iter()
            .position(CompiledGroup::is_global)
            .ok_or_else(|| DaylogError::Configuration {
                message: "settings have no global group".to_string(),
            })?;
        Ok(Self { groups, global })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> &CompiledGroup {
        &self.groups[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledGroup> {
        self.groups.iter()
    }

    /// Index of the reserved `global` fallback group.
    pub fn global_index(&self) -> usize {
        self.global
    }

    /// First group whose pattern matches `content`, in settings-file
    /// order; `None` when nothing matches. Pure: the same content and
    /// set always classify identically.
    pub fn classify(&self, content: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.matches(content))
    }
}
