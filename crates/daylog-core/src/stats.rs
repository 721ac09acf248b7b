//! Day-range aggregation: per-group totals, per-content jobs, and the
//! minute grid behind the plot view.
//!
//! Every statistic shares one scan shape: walk the day files from one
//! day before the range (an activity crossing midnight lives in the
//! file of the day it started) through the last day, clip each closed
//! item against the range's instant window, and feed the clipped
//! minutes to an accumulator.

use jiff::civil::Date;
use log::debug;

use crate::classify::CompiledSet;
use crate::error::{DaylogError, Result};
use crate::models::JobSet;
use crate::params::RangeQuery;
use crate::store::Store;
use crate::time::{
    add_days, day_start, expand_day, format_day, minutes_between, next_day_start, range_of_days,
    MINUTES_PER_DAY,
};

/// An inclusive range of calendar days, `first <= last` by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    first: Date,
    last: Date,
}

impl DayRange {
    pub fn new(first: Date, last: Date) -> Result<Self> {
        if first > last {
            return Err(DaylogError::InvalidRange {
                from: format_day(first),
                to: format_day(last),
            });
        }
        Ok(Self { first, last })
    }

    /// Resolves a user-supplied range query: no arguments means
    /// `default_first..=today`, one day means just that day, two days
    /// give the range explicitly.
    pub fn resolve(query: &RangeQuery, today: Date, default_first: Date) -> Result<Self> {
        match (&query.first, &query.last) {
            (None, _) => Self::new(default_first, today),
            (Some(day), None) => {
                let day = expand_day(day, today)?;
                Self::new(day, day)
            }
            (Some(first), Some(last)) => {
                Self::new(expand_day(first, today)?, expand_day(last, today)?)
            }
        }
    }

    pub fn first(&self) -> Date {
        self.first
    }

    pub fn last(&self) -> Date {
        self.last
    }

    /// The days in the range, oldest first.
    pub fn days(&self) -> Vec<Date> {
        range_of_days(self.first, self.last)
    }

    /// The half-open instant window `[first 00:00, last+1 00:00)`.
    pub fn window(&self) -> Result<(jiff::civil::DateTime, jiff::civil::DateTime)> {
        Ok((day_start(self.first), next_day_start(self.last)?))
    }

    /// The days to scan: one lead day before the range, for activities
    /// that started the prior evening and crossed midnight.
    fn scan_days(&self) -> Result<Vec<Date>> {
        Ok(range_of_days(add_days(self.first, -1)?, self.last))
    }
}

/// Clipped minutes attributed to one group over a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    pub name: String,
    pub label: String,
    pub color: String,
    pub minutes: i64,
}

/// Per-group totals over a range, with the denominators for
/// percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatReport {
    /// First day that actually has recorded activity (falls back to the
    /// range's first day when the whole range is empty).
    pub first: Date,
    pub last: Date,
    /// Groups with nonzero minutes, largest first, names breaking ties.
    pub totals: Vec<GroupTotal>,
    /// Sum of all listed group minutes.
    pub sum: i64,
    /// Full minutes of the counted span: active days times 1440, zero
    /// when no day in the range has activity.
    pub total: i64,
}

/// Computes per-group totals over `range`.
///
/// Explicit groups get the minutes of the items their patterns match;
/// `global` is not matched directly but derived as the remainder of the
/// counted span, so it covers untracked time and unmatched items alike.
///
/// The scan reaches back exactly one day before the range, which
/// assumes no activity runs longer than 24 hours: an item that started
/// earlier than the lead day lives in a file the scan never opens, so
/// any minutes it spends inside the window go unattributed.
pub fn stat_report(store: &Store, groups: &CompiledSet, range: &DayRange) -> Result<StatReport> {
    let (from, to) = range.window()?;
    let mut minutes = vec![0i64; groups.len()];
    let mut first_active: Option<Date> = None;

    for day in range.scan_days()? {
        let schedule = store.load_day(day)?;
        if day >= range.first() && !schedule.is_empty() && first_active.is_none() {
            first_active = Some(day);
        }
        for item in &schedule {
            if !item.is_closed() {
                continue;
            }
            let clipped = item.duration_within(from, to)?;
            if clipped == 0 {
                continue;
            }
            if let Some(idx) = groups.classify(item.content()) {
                if idx != groups.global_index() {
                    minutes[idx] += clipped;
                }
            }
        }
    }

    let total = match first_active {
        Some(day) => {
            let counted = minutes_between(day_start(day), next_day_start(range.last())?);
            debug!(
                "counting from {} ({} minutes)",
                format_day(day),
                counted
            );
            counted
        }
        None => 0,
    };
    let explicit: i64 = minutes.iter().sum();
    minutes[groups.global_index()] = (total - explicit).max(0);

    let mut totals: Vec<GroupTotal> = groups
        .iter()
        .enumerate()
        .filter(|(idx, _)| minutes[*idx] > 0)
        .map(|(idx, group)| GroupTotal {
            name: group.name().to_string(),
            label: group.label().to_string(),
            color: group.color().to_string(),
            minutes: minutes[idx],
        })
        .collect();
    totals.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));
    let sum = totals.iter().map(|t| t.minutes).sum();

    Ok(StatReport {
        first: first_active.unwrap_or_else(|| range.first()),
        last: range.last(),
        totals,
        sum,
        total,
    })
}

/// Per-content aggregation over a range: one [`JobSet`] per group plus
/// a flat set spanning all of them.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Parallel to the compiled group list; items no pattern matches
    /// land in the `global` slot.
    pub per_group: Vec<JobSet>,
    /// Every job regardless of group.
    pub all: JobSet,
}

pub fn job_report(store: &Store, groups: &CompiledSet, range: &DayRange) -> Result<JobReport> {
    let (from, to) = range.window()?;
    let mut per_group = vec![JobSet::new(); groups.len()];
    let mut all = JobSet::new();

    for day in range.scan_days()? {
        for item in &store.load_day(day)? {
            if !item.is_closed() {
                continue;
            }
            let clipped = item.duration_within(from, to)?;
            if clipped == 0 {
                continue;
            }
            let idx = groups
                .classify(item.content())
                .unwrap_or_else(|| groups.global_index());
            per_group[idx].record(item, clipped);
            all.record(item, clipped);
        }
    }

    Ok(JobReport { per_group, all })
}

/// One cell per minute of the range, holding the index of the group
/// active during that minute, or `None` for untracked time. Later items
/// overwrite earlier ones when intervals overlap.
pub fn minute_cells(store: &Store, groups: &CompiledSet, range: &DayRange) -> Result<Vec<Option<usize>>> {
    let (from, to) = range.window()?;
    let len = usize::try_from(range.days().len() as i64 * MINUTES_PER_DAY)
        .map_err(|_| DaylogError::InvalidRange {
            from: format_day(range.first()),
            to: format_day(range.last()),
        })?;
    let mut cells = vec![None; len];

    for day in range.scan_days()? {
        for item in &store.load_day(day)? {
            let Some(finish) = item.finish().closed_at() else {
                continue;
            };
            let lo = item.start().max(from);
            let hi = finish.min(to);
            if hi <= lo {
                continue;
            }
            let idx = groups
                .classify(item.content())
                .unwrap_or_else(|| groups.global_index());
            let lo = minutes_between(from, lo) as usize;
            let hi = minutes_between(from, hi) as usize;
            for cell in &mut cells[lo..hi] {
                *cell = Some(idx);
            }
        }
    }

    Ok(cells)
}
