//! Flat-file persistence for task lists.
//!
//! # Responsibility
//! - Define the store contract used by command execution.
//! - Mirror one `TaskList` into one UTF-8 text file, one task per line.
//!
//! # Invariants
//! - `save` is a full rewrite, never an append.
//! - A malformed line on load is skipped and reported, never fatal.
//! - I/O failures are returned to the caller, never swallowed.

use crate::model::task_list::TaskList;
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod file;

pub use file::FileTaskStore;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    CreateDir { path: PathBuf, source: io::Error },
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    /// Save refused because the initial load of `path` failed.
    SaveBlocked { path: PathBuf },
}

impl StorageError {
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::SaveBlocked { path } => path,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => {
                write!(f, "failed to create directory `{}`: {source}", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::SaveBlocked { path } => write!(
                f,
                "refusing to overwrite `{}` because it could not be loaded at startup",
                path.display()
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. }
            | Self::Read { source, .. }
            | Self::Write { source, .. } => Some(source),
            Self::SaveBlocked { .. } => None,
        }
    }
}

/// One persisted line that was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the source file.
    pub line_number: usize,
    pub reason: String,
}

/// Result of loading a store: decoded tasks plus skipped lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedRecord>,
}

/// Storage contract for one task list.
pub trait TaskStore {
    fn load(&self) -> StorageResult<LoadReport>;
    fn save(&self, tasks: &TaskList) -> StorageResult<()>;
    fn location(&self) -> &Path;
}
