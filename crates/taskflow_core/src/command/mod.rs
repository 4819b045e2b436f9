//! Parsed user intents and their execution.
//!
//! # Responsibility
//! - Define the closed set of commands produced by the parser.
//! - Pair each in-memory list with the store that mirrors it.
//!
//! # Invariants
//! - A command is immutable once parsed and is consumed by `execute`.
//! - Mutating commands save after mutating; bounds failures never mutate.
//! - `Exit` only signals the front-end; the core never stops the process.

use crate::model::task::{Task, TaskKind};
use crate::model::task_list::TaskList;
use crate::storage::{SkippedRecord, StorageError, StorageResult, TaskStore};

mod error;
mod execute;

pub use error::{CommandError, CommandResult, MissingArgument};
pub use execute::HELP_TEXT;

/// One parsed, executable intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Help,
    Add(Task),
    Delete(i64),
    Mark(i64),
    Unmark(i64),
    Find(String),
    /// Moves one task from the active list to the archive list.
    Archive(i64),
    ListArchive,
}

impl Command {
    /// Verb name used in logs.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Exit => "bye",
            Self::List => "list",
            Self::Help => "help",
            Self::Add(task) => match task.kind() {
                TaskKind::ToDo => "todo",
                TaskKind::Deadline { .. } => "deadline",
                TaskKind::Event { .. } => "event",
            },
            Self::Delete(_) => "delete",
            Self::Mark(_) => "mark",
            Self::Unmark(_) => "unmark",
            Self::Find(_) => "find",
            Self::Archive(_) => "archive",
            Self::ListArchive => "archived",
        }
    }
}

/// User-facing result of one executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    /// Set only by `Exit`; tells the front-end to stop its read loop.
    pub exit: bool,
}

impl Outcome {
    fn reply(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }
}

/// How the initial load of a `PersistedList` went.
#[derive(Debug)]
pub enum LoadStatus {
    Clean,
    /// Loaded, but some lines were malformed and skipped.
    Skipped(Vec<SkippedRecord>),
    /// Load failed; the list starts empty and saves are blocked.
    Failed(StorageError),
}

/// A task list together with the store that mirrors it on disk.
#[derive(Debug)]
pub struct PersistedList<S> {
    tasks: TaskList,
    store: S,
    save_blocked: bool,
}

impl<S: TaskStore> PersistedList<S> {
    /// Wraps an already-loaded list.
    pub fn new(tasks: TaskList, store: S) -> Self {
        Self {
            tasks,
            store,
            save_blocked: false,
        }
    }

    /// Loads the list from `store`.
    ///
    /// Never fails: an I/O error yields an empty list whose saves are refused
    /// until the process restarts, so the unreadable file is left untouched.
    pub fn open(store: S) -> (Self, LoadStatus) {
        match store.load() {
            Ok(report) => {
                let status = if report.skipped.is_empty() {
                    LoadStatus::Clean
                } else {
                    LoadStatus::Skipped(report.skipped)
                };
                (Self::new(TaskList::from(report.tasks), store), status)
            }
            Err(err) => {
                let list = Self {
                    tasks: TaskList::new(),
                    store,
                    save_blocked: true,
                };
                (list, LoadStatus::Failed(err))
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskList {
        &mut self.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_save_blocked(&self) -> bool {
        self.save_blocked
    }

    /// Writes the current list through the store.
    pub fn save(&self) -> StorageResult<()> {
        if self.save_blocked {
            return Err(StorageError::SaveBlocked {
                path: self.store.location().to_path_buf(),
            });
        }
        self.store.save(&self.tasks)
    }
}
