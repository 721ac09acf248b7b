//! Core library for the daylog time tracker.
//!
//! This crate provides the domain logic behind the `daylog` CLI:
//! parsing and serializing activity intervals, the flat-file store
//! keyed by calendar day, regex-based activity classification into
//! groups, and range statistics (per-group totals, per-content jobs,
//! and the minute grid the plot view draws from).
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] for their persisted
//! one-line forms, and the [`display`] module adds wrappers (durations,
//! day listings) that compose into terminal output. The core never
//! prints; callers decide layout and coloring.
//!
//! # Quick Start
//!
//! ```rust
//! use daylog_core::{ScheduleItem, Store};
//!
//! # fn example() -> daylog_core::Result<()> {
//! let store = Store::open(Some(std::env::temp_dir().join("daylog-doc")))?;
//!
//! // Record a finished activity in its start day's file.
//! let item = ScheduleItem::from_line("2024.01.10/09:00 2024.01.10/10:30 standup")?;
//! let mut day = store.load_day(item.start_day())?;
//! day.push(item.clone());
//! store.save_day(item.start_day(), &day)?;
//!
//! assert_eq!(day.last()?.duration_minutes()?, 90);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod settings;
pub mod stats;
pub mod store;
pub mod time;

// Re-export commonly used types
pub use classify::{CompiledGroup, CompiledSet};
pub use config::Config;
pub use display::{Age, Hm, HoursMinutes, ScheduleListing};
pub use error::{DaylogError, Result};
pub use models::{Finish, Job, JobSet, ScheduleGroup, ScheduleItem, Task, TaskSet};
pub use params::{RangeQuery, SetValue};
pub use settings::{GroupDefinition, Settings, GLOBAL_GROUP};
pub use stats::{job_report, minute_cells, stat_report, DayRange, JobReport, StatReport};
pub use store::Store;
