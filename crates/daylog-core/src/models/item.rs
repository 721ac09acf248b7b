//! A single timestamped activity interval.

use std::fmt;
use std::sync::OnceLock;

use jiff::civil::{Date, DateTime};
use regex::Regex;

use crate::error::{DaylogError, Result};
use crate::time::{day_start, format_time, minutes_between, next_day_start, parse_time};

/// The end of an activity interval.
///
/// A running activity has no finish yet; a recorded one always does.
/// Modeling this as a sum type keeps "still running" distinct from any
/// particular timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Activity is still running
    Pending,
    /// Activity finished at the given instant
    Closed(DateTime),
}

impl Finish {
    pub fn is_closed(&self) -> bool {
        matches!(self, Finish::Closed(_))
    }

    /// The finish instant, if the activity is closed.
    pub fn closed_at(&self) -> Option<DateTime> {
        match self {
            Finish::Closed(t) => Some(*t),
            Finish::Pending => None,
        }
    }
}

/// One activity interval: a start instant, an optional finish, and a
/// free-text content label.
///
/// Invariant: when closed, the finish is strictly after the start. Every
/// mutation that would break this is rejected without touching the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    start: DateTime,
    finish: Finish,
    content: String,
}

fn item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4}\.\d{2}\.\d{2}/\d{2}:\d{2})( (\d{4}\.\d{2}\.\d{2}/\d{2}:\d{2}))?( (.*))?$",
        )
        .expect("literal pattern compiles")
    })
}

impl ScheduleItem {
    /// A running activity started at `start`.
    pub fn started_at(start: DateTime, content: impl Into<String>) -> Self {
        Self {
            start,
            finish: Finish::Pending,
            content: content.into(),
        }
    }

    /// Parses one serialized line: `"<start> <finish> <content>"`, the
    /// finish field left empty for a running activity. Malformed lines
    /// are hard errors carrying the offending text.
    pub fn from_line(line: &str) -> Result<Self> {
        let line = line.trim_end();
        let invalid = || DaylogError::InvalidItem {
            line: line.to_string(),
        };
        let caps = item_re().captures(line).ok_or_else(invalid)?;
        let start = parse_time(&caps[1]).map_err(|_| invalid())?;
        let finish = match caps.get(3) {
            Some(m) => {
                let finish = parse_time(m.as_str()).map_err(|_| invalid())?;
                if finish <= start {
                    return Err(DaylogError::InvalidInterval {
                        start: format_time(start),
                        finish: format_time(finish),
                    });
                }
                Finish::Closed(finish)
            }
            None => Finish::Pending,
        };
        let content = caps
            .get(5)
            .map(|m| m.as_str().trim())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            start,
            finish,
            content,
        })
    }

    /// Serializes to the one-line persisted form. A pending item keeps
    /// the finish field empty, leaving a double space before any
    /// content.
    pub fn to_line(&self) -> String {
        let line = match self.finish {
            Finish::Closed(finish) => format!(
                "{} {} {}",
                format_time(self.start),
                format_time(finish),
                self.content
            ),
            Finish::Pending => format!("{}  {}", format_time(self.start), self.content),
        };
        line.trim_end().to_string()
    }

    pub fn start(&self) -> DateTime {
        self.start
    }

    pub fn finish(&self) -> Finish {
        self.finish
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_closed(&self) -> bool {
        self.finish.is_closed()
    }

    /// The calendar day the activity started on; day files are named
    /// after it.
    pub fn start_day(&self) -> Date {
        self.start.date()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Moves the start. Rejected when a finish is set at or before the
    /// new start; the item is untouched on failure.
    pub fn set_start(&mut self, start: DateTime) -> Result<()> {
        if let Finish::Closed(finish) = self.finish {
            if finish <= start {
                return Err(DaylogError::InvalidInterval {
                    start: format_time(start),
                    finish: format_time(finish),
                });
            }
        }
        self.start = start;
        Ok(())
    }

    /// Sets the finish. Rejected when it is at or before the start; the
    /// item is untouched on failure.
    pub fn set_finish(&mut self, finish: DateTime) -> Result<()> {
        if finish <= self.start {
            return Err(DaylogError::InvalidInterval {
                start: format_time(self.start),
                finish: format_time(finish),
            });
        }
        self.finish = Finish::Closed(finish);
        Ok(())
    }

    /// Atomically replaces both ends; succeeds only if `finish` is
    /// strictly after `start`.
    pub fn set_start_finish(&mut self, start: DateTime, finish: DateTime) -> Result<()> {
        if finish <= start {
            return Err(DaylogError::InvalidInterval {
                start: format_time(start),
                finish: format_time(finish),
            });
        }
        self.start = start;
        self.finish = Finish::Closed(finish);
        Ok(())
    }

    /// Whole minutes from start to finish; an error while the activity
    /// is still running.
    pub fn duration_minutes(&self) -> Result<i64> {
        let finish = self.finish.closed_at().ok_or_else(|| self.unfinished())?;
        Ok(minutes_between(self.start, finish))
    }

    /// Minutes of overlap between this interval and `[from, to)`.
    ///
    /// This is the primitive every statistic is built on: the result is
    /// never negative, never exceeds the item's own duration, and an
    /// interval entirely outside the range yields 0 rather than an
    /// error. Fails when `from` is after `to` or the item is still
    /// running.
    pub fn duration_within(&self, from: DateTime, to: DateTime) -> Result<i64> {
        if from > to {
            return Err(DaylogError::InvalidRange {
                from: format_time(from),
                to: format_time(to),
            });
        }
        let finish = self.finish.closed_at().ok_or_else(|| self.unfinished())?;
        let lo = self.start.max(from);
        let hi = finish.min(to);
        if hi <= lo {
            Ok(0)
        } else {
            Ok(minutes_between(lo, hi))
        }
    }

    /// Overlap with the inclusive day range `[first, last]`, expanded
    /// to the instant window `[first 00:00, last+1 00:00)`.
    pub fn duration_in_day_range(&self, first: Date, last: Date) -> Result<i64> {
        self.duration_within(day_start(first), next_day_start(last)?)
    }

    /// Overlap with a single calendar day.
    pub fn duration_in_day(&self, day: Date) -> Result<i64> {
        self.duration_in_day_range(day, day)
    }

    /// Minutes since midnight of the start's own day, in `[0, 1440)`.
    pub fn start_minute_of_day(&self) -> i32 {
        i32::from(self.start.hour()) * 60 + i32::from(self.start.minute())
    }

    fn unfinished(&self) -> DaylogError {
        DaylogError::Unfinished {
            content: self.content.clone(),
        }
    }
}

impl fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line())
    }
}
