//! Core task-tracking logic for TaskFlow.
//! This crate is the single source of truth for task invariants; front-ends
//! only forward input lines and render responses.

pub mod command;
pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod session;
pub mod storage;

pub use command::{Command, CommandError, CommandResult, MissingArgument, Outcome, PersistedList};
pub use config::SessionConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{MalformedRecord, Task, TaskKind, TaskValidationError};
pub use model::task_list::{TaskList, TaskListError};
pub use parser::parse;
pub use session::{Response, SessionNotice, TaskSession};
pub use storage::{
    FileTaskStore, LoadReport, SkippedRecord, StorageError, StorageResult, TaskStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
