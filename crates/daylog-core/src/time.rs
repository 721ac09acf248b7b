//! Timestamp and calendar-day utilities.
//!
//! All persisted values use fixed textual formats at minute resolution
//! with no timezone: `YYYY.MM.DD/HH:MM` for instants and `YYYY.MM.DD`
//! for days. Values are naive local wall-clock times, so [`jiff`]'s
//! civil types carry them without any zone attached.

use std::sync::OnceLock;

use jiff::civil::{Date, DateTime, Time};
use jiff::Span;
use regex::Regex;

use crate::error::{DaylogError, Result};

/// Canonical instant format, e.g. `2024.01.10/09:30`.
pub const TIME_FORMAT: &str = "%Y.%m.%d/%H:%M";
/// Canonical day format, e.g. `2024.01.10`.
pub const DAY_FORMAT: &str = "%Y.%m.%d";
/// Day format with weekday abbreviation, e.g. `2024.01.10 Wed`.
pub const DAY_WEEK_FORMAT: &str = "%Y.%m.%d %a";
const CLOCK_FORMAT: &str = "%H:%M";

/// Minutes in one calendar day, the fixed rate used for statistics
/// denominators.
pub const MINUTES_PER_DAY: i64 = 1440;

fn month_day_clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{2})\.(\d{2})/(\d{2}):(\d{2})$").expect("literal pattern compiles")
    })
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})\.(\d{2})$").expect("literal pattern compiles"))
}

/// Parses a full `YYYY.MM.DD/HH:MM` timestamp.
pub fn parse_time(s: &str) -> Result<DateTime> {
    DateTime::strptime(TIME_FORMAT, s).map_err(|_| DaylogError::InvalidTime {
        value: s.to_string(),
    })
}

/// Parses a `YYYY.MM.DD` day.
pub fn parse_day(s: &str) -> Result<Date> {
    Date::strptime(DAY_FORMAT, s).map_err(|_| DaylogError::InvalidDay {
        value: s.to_string(),
    })
}

pub fn format_time(t: DateTime) -> String {
    t.strftime(TIME_FORMAT).to_string()
}

pub fn format_day(d: Date) -> String {
    d.strftime(DAY_FORMAT).to_string()
}

/// Day with weekday abbreviation, e.g. `2017.04.07 Fri`.
pub fn day_with_weekday(d: Date) -> String {
    d.strftime(DAY_WEEK_FORMAT).to_string()
}

/// Expands a user-supplied time string into a full instant.
///
/// Accepted shapes, tried in order, first match wins:
/// full `YYYY.MM.DD/HH:MM`; bare `HH:MM` (today's date); `MM.DD/HH:MM`
/// (this year); bare `YYYY.MM.DD` (midnight); bare `MM.DD` (this year,
/// midnight).
pub fn expand_time(s: &str, today: Date) -> Result<DateTime> {
    if let Ok(t) = DateTime::strptime(TIME_FORMAT, s) {
        return Ok(t);
    }
    if let Ok(clock) = Time::strptime(CLOCK_FORMAT, s) {
        return Ok(today.to_datetime(clock));
    }
    if let Some(caps) = month_day_clock_re().captures(s) {
        return month_day(today, &caps[1], &caps[2], s)
            .and_then(|d| clock_of(&caps[3], &caps[4], s).map(|t| d.to_datetime(t)));
    }
    if let Ok(d) = Date::strptime(DAY_FORMAT, s) {
        return Ok(day_start(d));
    }
    if let Some(caps) = month_day_re().captures(s) {
        return month_day(today, &caps[1], &caps[2], s).map(day_start);
    }
    Err(DaylogError::InvalidTime {
        value: s.to_string(),
    })
}

/// Expands a user-supplied day string: the `today`/`yesterday`
/// keywords, a canonical day, or any [`expand_time`] shape truncated to
/// its day.
pub fn expand_day(s: &str, today: Date) -> Result<Date> {
    match s {
        "today" => Ok(today),
        "yesterday" => today.yesterday().map_err(|_| DaylogError::InvalidDay {
            value: s.to_string(),
        }),
        _ => {
            if let Ok(d) = Date::strptime(DAY_FORMAT, s) {
                return Ok(d);
            }
            expand_time(s, today)
                .map(|t| t.date())
                .map_err(|_| DaylogError::InvalidDay {
                    value: s.to_string(),
                })
        }
    }
}

fn month_day(today: Date, month: &str, day: &str, original: &str) -> Result<Date> {
    let month: i8 = month.parse().map_err(|_| invalid_time(original))?;
    let day: i8 = day.parse().map_err(|_| invalid_time(original))?;
    Date::new(today.year(), month, day).map_err(|_| invalid_time(original))
}

fn clock_of(hour: &str, minute: &str, original: &str) -> Result<Time> {
    let hour: i8 = hour.parse().map_err(|_| invalid_time(original))?;
    let minute: i8 = minute.parse().map_err(|_| invalid_time(original))?;
    Time::new(hour, minute, 0, 0).map_err(|_| invalid_time(original))
}

fn invalid_time(s: &str) -> DaylogError {
    DaylogError::InvalidTime {
        value: s.to_string(),
    }
}

/// Shifts a day by `n` calendar days (negative moves backwards).
pub fn add_days(day: Date, n: i32) -> Result<Date> {
    day.checked_add(Span::new().days(n as i64))
        .map_err(|_| DaylogError::InvalidDay {
            value: format!("{}{:+}", format_day(day), n),
        })
}

/// Every day from `first` through `last` inclusive; empty when `first`
/// is after `last`.
pub fn range_of_days(first: Date, last: Date) -> Vec<Date> {
    first
        .series(Span::new().days(1))
        .take_while(|d| *d <= last)
        .collect()
}

/// Midnight at the start of `day`.
pub fn day_start(day: Date) -> DateTime {
    day.to_datetime(Time::midnight())
}

/// Midnight at the start of the day after `day`.
pub fn next_day_start(day: Date) -> Result<DateTime> {
    add_days(day, 1).map(day_start)
}

/// Whole minutes from `from` to `to` (negative when `to` is earlier).
pub fn minutes_between(from: DateTime, to: DateTime) -> i64 {
    from.duration_until(to).as_mins()
}

/// Wall-clock reads, confined here so everything else in the core takes
/// instants as arguments.
pub mod clock {
    use jiff::civil::{Date, DateTime};
    use jiff::Zoned;

    use crate::error::{DaylogError, Result};

    /// Current local time, truncated to minute resolution.
    pub fn now() -> DateTime {
        let t = Zoned::now().datetime();
        t.date().at(t.hour(), t.minute(), 0, 0)
    }

    /// Current local day.
    pub fn today() -> Date {
        now().date()
    }

    /// The day before [`today`].
    pub fn yesterday() -> Result<Date> {
        today().yesterday().map_err(|_| DaylogError::InvalidDay {
            value: "yesterday".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parses_and_formats_canonical_time() {
        let t = parse_time("2017.03.29/17:32").unwrap();
        assert_eq!(t, date(2017, 3, 29).at(17, 32, 0, 0));
        assert_eq!(format_time(t), "2017.03.29/17:32");
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_time("2017.03.29").is_err());
        assert!(parse_time("2017.13.29/10:00").is_err());
        assert!(parse_time("garbage").is_err());
    }

    #[test]
    fn expand_time_tries_shapes_in_order() {
        let today = date(2017, 3, 29);
        assert_eq!(
            expand_time("2017.03.29/03:04", today).unwrap(),
            date(2017, 3, 29).at(3, 4, 0, 0)
        );
        assert_eq!(
            expand_time("08:15", today).unwrap(),
            date(2017, 3, 29).at(8, 15, 0, 0)
        );
        assert_eq!(
            expand_time("04.07/09:30", today).unwrap(),
            date(2017, 4, 7).at(9, 30, 0, 0)
        );
        assert_eq!(
            expand_time("2017.03.29", today).unwrap(),
            date(2017, 3, 29).at(0, 0, 0, 0)
        );
        assert_eq!(
            expand_time("04.07", today).unwrap(),
            date(2017, 4, 7).at(0, 0, 0, 0)
        );
        assert!(expand_time("29/17", today).is_err());
    }

    #[test]
    fn expand_day_handles_keywords() {
        let today = date(2017, 3, 1);
        assert_eq!(expand_day("today", today).unwrap(), today);
        assert_eq!(expand_day("yesterday", today).unwrap(), date(2017, 2, 28));
        assert_eq!(expand_day("2017.04.07", today).unwrap(), date(2017, 4, 7));
        assert_eq!(
            expand_day("04.07/10:00", today).unwrap(),
            date(2017, 4, 7)
        );
        assert!(expand_day("not-a-day", today).is_err());
    }

    #[test]
    fn weekday_abbreviation() {
        assert_eq!(day_with_weekday(date(2017, 4, 7)), "2017.04.07 Fri");
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(
            add_days(date(2017, 2, 28), 1).unwrap(),
            date(2017, 3, 1)
        );
        assert_eq!(
            add_days(date(2017, 1, 1), -1).unwrap(),
            date(2016, 12, 31)
        );
    }

    #[test]
    fn range_of_days_is_inclusive() {
        let days = range_of_days(date(2017, 2, 27), date(2017, 3, 2));
        assert_eq!(
            days,
            vec![
                date(2017, 2, 27),
                date(2017, 2, 28),
                date(2017, 3, 1),
                date(2017, 3, 2),
            ]
        );
        assert_eq!(
            range_of_days(date(2017, 3, 1), date(2017, 3, 1)),
            vec![date(2017, 3, 1)]
        );
        assert!(range_of_days(date(2017, 3, 2), date(2017, 3, 1)).is_empty());
    }

    #[test]
    fn minutes_between_instants() {
        let a = date(2017, 3, 28).at(23, 32, 0, 0);
        let b = date(2017, 3, 29).at(0, 44, 0, 0);
        assert_eq!(minutes_between(a, b), 72);
        assert_eq!(minutes_between(b, a), -72);
    }
}
