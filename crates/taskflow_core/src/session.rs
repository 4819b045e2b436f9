//! Request/response facade for front-ends.
//!
//! # Responsibility
//! - Own the active and archive lists with their stores.
//! - Turn one raw input line into one `Response`, whatever happens.
//!
//! # Invariants
//! - `handle` never panics and never returns an error; failures become
//!   `Response { ok: false, .. }`.
//! - Only `bye` sets `exit`; the front-end decides how to stop.
//! - Opening a session never fails; load problems become notices.

use crate::command::{CommandError, LoadStatus, PersistedList};
use crate::config::SessionConfig;
use crate::model::task_list::TaskList;
use crate::parser::parse;
use crate::storage::{FileTaskStore, TaskStore};
use log::{info, warn};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Envelope returned for every handled line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Human-readable confirmation, listing or error text.
    pub message: String,
    /// Whether the front-end should stop reading input.
    pub exit: bool,
    /// Stable error code on failure, e.g. `index_out_of_range`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

impl Response {
    fn success(message: impl Into<String>, exit: bool) -> Self {
        Self {
            ok: true,
            message: message.into(),
            exit,
            error_code: None,
        }
    }

    fn failure(err: &CommandError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            exit: false,
            error_code: Some(err.code()),
        }
    }
}

/// Startup problem worth showing to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// Some saved lines could not be read and were skipped.
    SkippedRecords { path: PathBuf, count: usize },
    /// The file could not be loaded; the list starts empty and is not saved.
    LoadFailed { path: PathBuf, error: String },
}

impl Display for SessionNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SkippedRecords { path, count } => write!(
                f,
                "Warning: skipped {count} unreadable line(s) in `{}`.",
                path.display()
            ),
            Self::LoadFailed { path, error } => write!(
                f,
                "Warning: could not load `{}` ({error}). Starting with an empty list; changes will not be saved to that file.",
                path.display()
            ),
        }
    }
}

/// One user's task session: active list, archive list, and their stores.
pub struct TaskSession<S: TaskStore = FileTaskStore> {
    active: PersistedList<S>,
    archive: PersistedList<S>,
}

impl TaskSession<FileTaskStore> {
    /// Opens both task files named by `config`.
    pub fn open(config: &SessionConfig) -> (Self, Vec<SessionNotice>) {
        Self::from_stores(
            FileTaskStore::new(config.tasks_path()),
            FileTaskStore::new(config.archive_path()),
        )
    }
}

impl<S: TaskStore> TaskSession<S> {
    /// Loads both lists from arbitrary stores.
    pub fn from_stores(active_store: S, archive_store: S) -> (Self, Vec<SessionNotice>) {
        let mut notices = Vec::new();
        let (active, status) = PersistedList::open(active_store);
        collect_notice(&mut notices, active.store(), status);
        let (archive, status) = PersistedList::open(archive_store);
        collect_notice(&mut notices, archive.store(), status);

        info!(
            "event=session_open module=session status=ok tasks={} archived={} notices={}",
            active.tasks().len(),
            archive.tasks().len(),
            notices.len()
        );
        (Self { active, archive }, notices)
    }

    /// Builds a session around already-loaded lists.
    pub fn new(active: PersistedList<S>, archive: PersistedList<S>) -> Self {
        Self { active, archive }
    }

    /// Parses and executes one line.
    pub fn handle(&mut self, raw_line: &str) -> Response {
        let result = parse(raw_line)
            .and_then(|command| command.execute(&mut self.active, &mut self.archive));
        match result {
            Ok(outcome) => Response::success(outcome.message, outcome.exit),
            Err(err) => {
                if let CommandError::Storage(storage_err) = &err {
                    warn!(
                        "event=session_handle module=session status=error error_code={} path={}",
                        err.code(),
                        storage_err.path().display()
                    );
                }
                Response::failure(&err)
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        self.active.tasks()
    }

    pub fn archive(&self) -> &TaskList {
        self.archive.tasks()
    }
}

fn collect_notice<S: TaskStore>(notices: &mut Vec<SessionNotice>, store: &S, status: LoadStatus) {
    let path = store.location().to_path_buf();
    match status {
        LoadStatus::Clean => {}
        LoadStatus::Skipped(skipped) => {
            warn!(
                "event=session_open module=session status=partial path={} skipped={}",
                path.display(),
                skipped.len()
            );
            notices.push(SessionNotice::SkippedRecords {
                path,
                count: skipped.len(),
            });
        }
        LoadStatus::Failed(err) => {
            warn!(
                "event=session_open module=session status=error path={} error={}",
                path.display(),
                err
            );
            notices.push(SessionNotice::LoadFailed {
                path,
                error: err.to_string(),
            });
        }
    }
}
