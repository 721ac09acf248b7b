//! An ordered collection of schedule items for one calendar day.

use jiff::civil::Date;

use super::item::ScheduleItem;
use crate::error::{DaylogError, Result};

/// The in-memory form of a day file: items in insertion order, which is
/// also file line order.
///
/// The group is conceptually scoped to one day but not structurally
/// enforced; items are filtered by their start day only when
/// serializing via [`ScheduleGroup::lines_for_day`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleGroup {
    items: Vec<ScheduleItem>,
}

impl ScheduleGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole day file. Blank lines are skipped; any malformed
    /// line aborts the load.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut group = Self::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            group.push(ScheduleItem::from_line(line)?);
        }
        Ok(group)
    }

    pub fn push(&mut self, item: ScheduleItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Result<&ScheduleItem> {
        self.items.get(index).ok_or(DaylogError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn last(&self) -> Result<&ScheduleItem> {
        self.items.last().ok_or(DaylogError::EmptySchedule)
    }

    /// Swaps out the most recent item, used when prolonging a finished
    /// activity.
    pub fn replace_last(&mut self, item: ScheduleItem) -> Result<()> {
        let last = self.items.last_mut().ok_or(DaylogError::EmptySchedule)?;
        *last = item;
        Ok(())
    }

    pub fn remove_last(&mut self) -> Result<ScheduleItem> {
        self.items.pop().ok_or(DaylogError::EmptySchedule)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<ScheduleItem> {
        if index >= self.items.len() {
            return Err(DaylogError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Serializes only the items whose start falls on `day`, one line
    /// each, in collection order. This is what gets written back to the
    /// day file; items dragged in from adjacent days (prolong flows)
    /// stay out of it.
    pub fn lines_for_day(&self, day: Date) -> String {
        let mut out = String::new();
        for item in &self.items {
            if item.start_day() == day {
                out.push_str(&item.to_line());
                out.push('\n');
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a ScheduleGroup {
    type Item = &'a ScheduleItem;
    type IntoIter = std::slice::Iter<'a, ScheduleItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
