//! Aggregation of activities by identical content.

use std::collections::HashMap;

use jiff::civil::DateTime;

use super::item::ScheduleItem;
use crate::time::minutes_between;

/// All activities sharing one exact content string: the most recent
/// start seen and the cumulative (clipped) minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    content: String,
    last: DateTime,
    minutes: i64,
}

impl Job {
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Start instant of the most recent occurrence.
    pub fn last(&self) -> DateTime {
        self.last
    }

    /// Total clipped minutes accumulated for this content.
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Minutes elapsed from the most recent occurrence to `now`.
    pub fn since(&self, now: DateTime) -> i64 {
        minutes_between(self.last, now)
    }
}

/// Transient mapping from content string to [`Job`], rebuilt per query.
#[derive(Debug, Clone, Default)]
pub struct JobSet {
    jobs: HashMap<String, Job>,
}

impl JobSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Feeds one item with its already-clipped duration. `last` becomes
    /// the chronologically later start regardless of feed order;
    /// minutes accumulate additively.
    pub fn record(&mut self, item: &ScheduleItem, minutes: i64) {
        self.jobs
            .entry(item.content().to_string())
            .and_modify(|job| {
                job.minutes += minutes;
                if item.start() > job.last {
                    job.last = item.start();
                }
            })
            .or_insert_with(|| Job {
                content: item.content().to_string(),
                last: item.start(),
                minutes,
            });
    }

    pub fn get(&self, content: &str) -> Option<&Job> {
        self.jobs.get(content)
    }

    /// Jobs sorted by content string, for the per-group view.
    pub fn by_content(&self) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self.jobs.values().collect();
        jobs.sort_by(|a, b| a.content.cmp(&b.content));
        jobs
    }

    /// Jobs sorted most recent first, ties broken by content, for the
    /// recency view.
    pub fn by_recency(&self) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self.jobs.values().collect();
        jobs.sort_by(|a, b| b.last.cmp(&a.last).then_with(|| a.content.cmp(&b.content)));
        jobs
    }
}
