use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use daylog_core::RangeQuery;

/// Main command-line interface for the daylog time tracker
///
/// Daylog records what you are doing as timestamped activities, one
/// flat file per day. Activities are classified into groups by regular
/// expressions from the settings file, and the reporting commands
/// (`list`, `stat`, `plot`, `job`, `jobstat`) aggregate any range of
/// days.
#[derive(Parser)]
#[command(version, about, name = "daylog", arg_required_else_help = true)]
pub struct Args {
    /// Base directory holding the day files. Defaults to $DAYLOG_PATH,
    /// then $XDG_DATA_HOME/daylog
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the daylog CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Start an activity
    Start {
        /// What you are doing; task names expand to their content
        content: Option<String>,
        /// Start time, defaults to now
        time: Option<String>,
    },
    /// Replace the running activity's content or start time
    Restart {
        /// A time to move the start to, or new content (restarting now)
        arg: Option<String>,
    },
    /// Discard the running activity
    Cancel,
    /// Finish the running activity, or prolong the last finished one
    Finish {
        /// Finish time, defaults to now
        time: Option<String>,
    },
    /// List recorded activities day by day
    List(RangeArgs),
    /// Show per-group statistics
    #[command(alias = "statistic")]
    Stat(RangeArgs),
    /// Plot time usage as a minute grid
    Plot(RangeArgs),
    /// Show jobs grouped by activity group
    Job(RangeArgs),
    /// Show jobs sorted by last occurrence
    Jobstat(RangeArgs),
    /// Show tasks or set task attributes
    Task {
        #[command(subcommand)]
        command: Option<TaskCommands>,
    },
    /// Query or update a group setting
    Set {
        /// `group.key` to query, or `group.key=value` to assign
        expr: String,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Set a task's level (integer value) or content (anything else)
    Set {
        /// Task name; created if it does not exist
        name: String,
        /// An integer sets the level, any other value the content
        value: String,
    },
}

/// Day-range arguments shared by the reporting commands.
#[derive(ClapArgs)]
pub struct RangeArgs {
    /// First day (e.g. 2024.01.10, 01.10, today, yesterday)
    pub first: Option<String>,
    /// Last day, defaults to the first day
    pub last: Option<String>,
}

impl RangeArgs {
    pub fn into_params(self) -> RangeQuery {
        RangeQuery::new(self.first, self.last)
    }
}
