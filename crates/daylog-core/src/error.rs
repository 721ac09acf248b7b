//! Error types for the daylog core library.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Comprehensive error type for all daylog operations.
#[derive(Error, Debug)]
pub enum DaylogError {
    /// Timestamp string does not match any accepted shape
    #[error("invalid time: {value}")]
    InvalidTime { value: String },
    /// Day string does not match `YYYY.MM.DD`
    #[error("invalid day: {value}")]
    InvalidDay { value: String },
    /// Day-file or marker-file line does not match the item grammar
    #[error("invalid item format: {line}")]
    InvalidItem { line: String },
    /// An interval mutation would leave finish at or before start
    #[error("finish {finish} is not after start {start}")]
    InvalidInterval { start: String, finish: String },
    /// Duration requested for an activity that is still running
    #[error("activity '{content}' has no finish time")]
    Unfinished { content: String },
    /// Query range with its start after its end
    #[error("range start {from} is after range end {to}")]
    InvalidRange { from: String, to: String },
    /// Indexed access past the end of a schedule group
    #[error("index {index} out of range for schedule of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    /// Operation requiring at least one recorded item found none
    #[error("schedule is empty")]
    EmptySchedule,
    /// A group's classification pattern failed to compile
    #[error("invalid pattern for group {group}: /{pattern}/: {source}")]
    InvalidPattern {
        group: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// Settings file line that is neither a section header nor key=value
    #[error("invalid setting at line {line}: {text}")]
    InvalidSetting { line: usize, text: String },
    /// Configuration file line that is not key=value
    #[error("invalid configuration at line {line}: {text}")]
    InvalidConfig { line: usize, text: String },
    /// Task file line that is not `name,level,content`
    #[error("invalid task: {line}")]
    InvalidTask { line: String },
    /// A persisted file exists but its contents are not usable
    #[error("corrupt file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: Box<DaylogError>,
    },
    /// File system operation errors other than "not found"
    #[error("file system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl DaylogError {
    /// Wraps a parse failure with the file it came from.
    pub fn corrupt(path: impl Into<PathBuf>, source: DaylogError) -> Self {
        DaylogError::Corrupt {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait mapping raw I/O results to [`DaylogError::FileSystem`]
/// with the offending path attached.
pub trait FsResultExt<T> {
    fn fs_context(self, path: &Path) -> Result<T>;
}

impl<T> FsResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &Path) -> Result<T> {
        self.map_err(|e| DaylogError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Result type alias for daylog operations
pub type Result<T> = std::result::Result<T, DaylogError>;
