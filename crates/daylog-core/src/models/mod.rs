//! Domain models: activity intervals, day collections, job and task
//! aggregations.

pub mod item;
pub mod job;
pub mod schedule;
pub mod task;

pub use item::{Finish, ScheduleItem};
pub use job::{Job, JobSet};
pub use schedule::ScheduleGroup;
pub use task::{Task, TaskSet};
