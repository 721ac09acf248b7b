//! Named shortcuts that expand to activity content.
//!
//! A task is a `name,level,content` line: starting an activity by task
//! name records the task's content instead, and the level is rendered
//! as a color class when listing.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::strip_comment;
use crate::error::{DaylogError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    level: i32,
    order: usize,
    content: String,
}

fn task_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\w+)\s*,\s*(\d+)\s*,\s*(.*?)\s*$").expect("literal pattern compiles")
    })
}

impl Task {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 0,
            order: 0,
            content: content.into(),
        }
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let invalid = || DaylogError::InvalidTask {
            line: line.to_string(),
        };
        let caps = task_re().captures(line).ok_or_else(invalid)?;
        let level: i32 = caps[2].parse().map_err(|_| invalid())?;
        let mut task = Task::new(&caps[1], &caps[3]);
        task.level = level;
        Ok(task)
    }

    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.name, self.level, self.content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Color class for the task's priority level.
    pub fn color_class(&self) -> &'static str {
        match self.level {
            i32::MIN..=0 => "white",
            1 => "lightgreen",
            2 => "yellow",
            3 => "purple",
            _ => "red",
        }
    }
}

/// The whole task file: name-to-task mapping with file order retained
/// as a display tie-break.
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: HashMap<String, Task>,
    next_order: usize,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the task file; comment and blank lines are skipped, any
    /// other malformed line aborts the load.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut set = Self::new();
        for raw in text.lines() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }
            set.insert(Task::from_line(line)?);
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// The content a task name expands to when starting an activity.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.tasks.get(name).map(Task::content)
    }

    pub fn insert(&mut self, mut task: Task) {
        task.order = self.next_order;
        self.next_order += 1;
        self.tasks.insert(task.name.clone(), task);
    }

    /// Sets a task's level, creating the task with empty content when
    /// absent.
    pub fn set_level(&mut self, name: &str, level: i32) {
        match self.tasks.get_mut(name) {
            Some(task) => task.set_level(level),
            None => {
                let mut task = Task::new(name, "");
                task.set_level(level);
                self.insert(task);
            }
        }
    }

    /// Sets a task's content, creating the task when absent.
    pub fn set_content(&mut self, name: &str, content: &str) {
        match self.tasks.get_mut(name) {
            Some(task) => task.set_content(content),
            None => self.insert(Task::new(name, content)),
        }
    }

    /// Display order: level descending, then file order, then content.
    pub fn ordered(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then_with(|| a.order.cmp(&b.order))
                .then_with(|| a.content.cmp(&b.content))
        });
        tasks
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for task in self.ordered() {
            out.push_str(&task.to_line());
            out.push('\n');
        }
        out
    }
}
