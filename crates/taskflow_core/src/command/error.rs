//! Error taxonomy for parsing and executing commands.
//!
//! Every variant is recoverable: the session turns it into a failure
//! response and the read loop continues.

use crate::model::task::TaskValidationError;
use crate::model::task_list::TaskListError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CommandResult<T> = Result<T, CommandError>;

const HELP_HINT: &str = "Please enter 'help' command to find out more.";

/// Required argument or marker that a verb was given without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingArgument {
    TodoDescription,
    DeadlineDescription,
    DeadlineDate,
    EventDescription,
    EventTimes,
    DeleteIndex,
    MarkIndex,
    UnmarkIndex,
    ArchiveIndex,
    FindKeyword,
}

impl Display for MissingArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::TodoDescription => "OOPS! The description of a todo cannot be left blank.",
            Self::DeadlineDescription => {
                "OOPS! The description of a deadline cannot be left blank."
            }
            Self::DeadlineDate => {
                "OOPS! The date/time for the deadline cannot be left blank (use `/by <date>`)."
            }
            Self::EventDescription => "OOPS! The description of an event cannot be left blank.",
            Self::EventTimes => {
                "OOPS! The start time and end time cannot be left blank (use `/from <start> /to <end>`)."
            }
            Self::DeleteIndex => "Please indicate the index of the task you want to delete.",
            Self::MarkIndex => "Please indicate the index of the task you want to mark as done.",
            Self::UnmarkIndex => {
                "Please indicate the index of the task you want to mark as not done."
            }
            Self::ArchiveIndex => "Please indicate the index of the task you want to archive.",
            Self::FindKeyword => "OOPS! The keyword to find cannot be left blank.",
        };
        f.write_str(message)
    }
}

#[derive(Debug)]
pub enum CommandError {
    /// First token is not a known verb. Holds the token as typed.
    UnknownCommand(String),
    MissingArgument(MissingArgument),
    /// Argument text that cannot be stored as one task line.
    InvalidArgument(TaskValidationError),
    /// Index argument is not an integer.
    InvalidNumber { verb: &'static str, value: String },
    /// Index outside `1..=size` for the targeted list.
    IndexOutOfRange { index: i64, size: usize },
    /// `find` matched nothing.
    KeywordNotFound(String),
    /// Reading or writing a task file failed.
    Storage(StorageError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(token) if token.is_empty() => write!(
                f,
                "Please enter a command.\nPlease enter 'help' for a list of valid commands."
            ),
            Self::UnknownCommand(token) => write!(
                f,
                "Sorry, I don't know what `{token}` means.\nPlease enter 'help' for a list of valid commands."
            ),
            Self::MissingArgument(missing) => write!(f, "{missing}\n{HELP_HINT}"),
            Self::InvalidArgument(err) => write!(f, "OOPS! The {err}.\n{HELP_HINT}"),
            Self::InvalidNumber { verb, value } => write!(
                f,
                "`{value}` is not a valid task number for `{verb}`.\n{HELP_HINT}"
            ),
            Self::IndexOutOfRange { index, size: 0 } => {
                write!(f, "Invalid index {index}. There are no tasks in this list.")
            }
            Self::IndexOutOfRange { index, size } => write!(
                f,
                "Invalid index {index}. Please provide a valid index within the range 1 to {size}."
            ),
            Self::KeywordNotFound(keyword) => {
                write!(f, "No tasks match the keyword `{keyword}`.")
            }
            Self::Storage(err) => write!(
                f,
                "Could not save your tasks: {err}\nYour changes are kept for this session."
            ),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for CommandError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TaskListError> for CommandError {
    fn from(value: TaskListError) -> Self {
        match value {
            TaskListError::IndexOutOfRange { index, size } => Self::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                size,
            },
        }
    }
}

impl CommandError {
    /// Stable machine-readable code for logs and JSON front-ends.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::MissingArgument(_) => "missing_argument",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::KeywordNotFound(_) => "keyword_not_found",
            Self::Storage(_) => "storage_io_failure",
        }
    }
}
