//! Display wrappers for durations and schedule listings.
//!
//! Formatting lives behind newtypes implementing [`fmt::Display`], so
//! callers compose them into their own output instead of the core
//! printing anything itself.

use std::fmt;

use jiff::civil::Date;

use crate::models::ScheduleGroup;
use crate::time::day_with_weekday;

/// Minutes rendered compactly as `3h25m`; sub-hour values keep the
/// hour field, `0h30m`.
#[derive(Debug, Clone, Copy)]
pub struct Hm(pub i64);

impl fmt::Display for Hm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}m", self.0 / 60, self.0 % 60)
    }
}

/// Minutes rendered as aligned `  123 hours 45 minutes` columns for
/// tabular reports.
#[derive(Debug, Clone, Copy)]
pub struct HoursMinutes(pub i64);

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:5} hours {:2} minutes", self.0 / 60, self.0 % 60)
    }
}

/// Minutes of elapsed age rendered at the coarsest sensible unit:
/// `42m`, `7h`, or `3d`.
#[derive(Debug, Clone, Copy)]
pub struct Age(pub i64);

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 60 {
            write!(f, "{}m", self.0)
        } else if self.0 < 24 * 60 {
            write!(f, "{}h", self.0 / 60)
        } else {
            write!(f, "{}d", self.0 / (24 * 60))
        }
    }
}

/// One day's schedule as a listing: a weekday heading followed by the
/// items, each prefixed with its index.
#[derive(Debug)]
pub struct ScheduleListing<'a> {
    day: Date,
    group: &'a ScheduleGroup,
}

impl<'a> ScheduleListing<'a> {
    pub fn new(day: Date, group: &'a ScheduleGroup) -> Self {
        Self { day, group }
    }
}

impl fmt::Display for ScheduleListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Day {}", day_with_weekday(self.day))?;
        for (idx, item) in self.group.iter().enumerate() {
            writeln!(f, "{idx:3}: {item}")?;
        }
        Ok(())
    }
}
