//! Flat-file persistence under a single base directory.
//!
//! One file per calendar day (named `YYYY.MM.DD`), plus the `start`
//! marker for the running activity and the `settings`/`config`/`task`
//! files. Every write is a whole-file overwrite of content computed in
//! memory first. "File does not exist" is an expected, recoverable
//! condition everywhere; any other I/O failure is fatal.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use jiff::civil::Date;
use log::debug;

use crate::config::Config;
use crate::error::{DaylogError, FsResultExt, Result};
use crate::models::{ScheduleGroup, ScheduleItem, TaskSet};
use crate::settings::Settings;
use crate::time::format_day;

/// Environment variable overriding the base directory.
pub const PATH_ENV: &str = "DAYLOG_PATH";
/// In-progress marker file name.
pub const START_FILE: &str = "start";
/// Settings (group definitions) file name.
pub const SETTINGS_FILE: &str = "settings";
/// Flat configuration file name.
pub const CONFIG_FILE: &str = "config";
/// Task shortcuts file name.
pub const TASK_FILE: &str = "task";

/// Handle on the base directory holding all persisted state.
#[derive(Debug, Clone)]
pub struct Store {
    base: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the base directory. Resolution order:
    /// the explicit `base` argument, then `$DAYLOG_PATH`, then the XDG
    /// data directory `$XDG_DATA_HOME/daylog`.
    pub fn open(base: Option<PathBuf>) -> Result<Self> {
        let base = match base {
            Some(base) => base,
            None => match env::var_os(PATH_ENV) {
                Some(path) => PathBuf::from(path),
                None => Self::default_base()?,
            },
        };
        fs::create_dir_all(&base).fs_context(&base)?;
        debug!("base directory: {}", base.display());
        Ok(Self { base })
    }

    fn default_base() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("daylog")
            .get_data_home()
            .ok_or_else(|| {
                DaylogError::XdgDirectory("no XDG data directory available".to_string())
            })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the day file for `day`.
    pub fn day_path(&self, day: Date) -> PathBuf {
        self.base.join(format_day(day))
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DaylogError::FileSystem {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Loads the schedule recorded for `day`; a missing day file is an
    /// empty schedule, a malformed one aborts the load.
    pub fn load_day(&self, day: Date) -> Result<ScheduleGroup> {
        let path = self.day_path(day);
        match self.read_optional(&path)? {
            Some(text) => {
                ScheduleGroup::from_text(&text).map_err(|e| DaylogError::corrupt(&path, e))
            }
            None => {
                debug!("no schedule for {}, treating as empty", format_day(day));
                Ok(ScheduleGroup::new())
            }
        }
    }

    /// Overwrites the day file with the group's items for that day.
    pub fn save_day(&self, day: Date, group: &ScheduleGroup) -> Result<()> {
        let path = self.day_path(day);
        fs::write(&path, group.lines_for_day(day)).fs_context(&path)?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Whether `day` has any recorded activity.
    pub fn has_activity(&self, day: Date) -> Result<bool> {
        Ok(!self.load_day(day)?.is_empty())
    }

    /// Reads the in-progress marker, if an activity is running. A
    /// marker holding a closed item is corruption, not a running
    /// activity.
    pub fn load_current(&self) -> Result<Option<ScheduleItem>> {
        let path = self.base.join(START_FILE);
        let Some(text) = self.read_optional(&path)? else {
            return Ok(None);
        };
        let line = text.trim_end_matches('\n');
        let item =
            ScheduleItem::from_line(line).map_err(|e| DaylogError::corrupt(&path, e))?;
        if item.is_closed() {
            return Err(DaylogError::corrupt(
                &path,
                DaylogError::Configuration {
                    message: "marker file holds a finished activity".to_string(),
                },
            ));
        }
        Ok(Some(item))
    }

    /// Writes the in-progress marker.
    pub fn save_current(&self, item: &ScheduleItem) -> Result<()> {
        let path = self.base.join(START_FILE);
        fs::write(&path, item.to_line()).fs_context(&path)
    }

    /// Removes the in-progress marker; already absent is fine.
    pub fn clear_current(&self) -> Result<()> {
        let path = self.base.join(START_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DaylogError::FileSystem { path, source: e }),
        }
    }

    /// Loads group definitions; a missing settings file yields the
    /// default set (just `global`).
    pub fn load_settings(&self) -> Result<Settings> {
        let path = self.base.join(SETTINGS_FILE);
        match self.read_optional(&path)? {
            Some(text) => Settings::from_text(&text).map_err(|e| DaylogError::corrupt(&path, e)),
            None => {
                debug!("no settings file, using defaults");
                Ok(Settings::new())
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let path = self.base.join(SETTINGS_FILE);
        fs::write(&path, settings.to_text()).fs_context(&path)
    }

    /// Loads the configuration; missing file means all defaults.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.base.join(CONFIG_FILE);
        match self.read_optional(&path)? {
            Some(text) => Config::from_text(&text).map_err(|e| DaylogError::corrupt(&path, e)),
            None => {
                debug!("no config file, using defaults");
                Ok(Config::new())
            }
        }
    }

    /// Loads task shortcuts; missing file means none.
    pub fn load_tasks(&self) -> Result<TaskSet> {
        let path = self.base.join(TASK_FILE);
        match self.read_optional(&path)? {
            Some(text) => TaskSet::from_text(&text).map_err(|e| DaylogError::corrupt(&path, e)),
            None => Ok(TaskSet::new()),
        }
    }

    pub fn save_tasks(&self, tasks: &TaskSet) -> Result<()> {
        let path = self.base.join(TASK_FILE);
        fs::write(&path, tasks.to_text()).fs_context(&path)
    }
}
