//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its three variants.
//! - Own the one-line textual form shared by the data file and the UI.
//!
//! # Invariants
//! - `description` is trimmed and never empty.
//! - A deadline carries exactly one non-empty `due` literal.
//! - An event carries non-empty `start` and `end` literals, in that order.
//! - No field contains a line break.
//! - `Task::from_line(task.to_line())` reproduces `task`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static RECORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([TDE])\]\[([ X])\] (.*)$").expect("valid record regex"));
static DEADLINE_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \(by: (.*)\)$").expect("valid deadline regex"));
static EVENT_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \(from: (.*?) to: (.*)\)$").expect("valid event regex"));

/// Variant-specific task data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain to-do without dates.
    ToDo,
    /// Task due by a date/time literal, echoed verbatim.
    Deadline { due: String },
    /// Task spanning a start and end literal.
    Event { start: String, end: String },
}

/// Validation failure for task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
    EmptyDueDate,
    EmptyEventTime,
    /// A field contains `\n` or `\r`.
    LineBreak,
    /// Field text embeds a separator, e.g. ` to: ` in an event start, so the
    /// saved line would decode into different fields.
    AmbiguousFields,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
            Self::EmptyDueDate => write!(f, "deadline date cannot be empty"),
            Self::EmptyEventTime => write!(f, "event start and end times cannot be empty"),
            Self::LineBreak => write!(f, "task text cannot contain line breaks"),
            Self::AmbiguousFields => write!(
                f,
                "task text embeds a `by:` or `to:` separator that would change how it is saved"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// A persisted line that does not decode into any known task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    pub line: String,
    pub reason: String,
}

impl Display for MalformedRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed task record: {}", self.reason)
    }
}

impl Error for MalformedRecord {}

/// One trackable item of work.
///
/// Serde output keeps the variant fields flattened next to the common ones,
/// and deserialization re-runs constructor validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    description: String,
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

#[derive(Deserialize)]
struct RawTask {
    description: String,
    #[serde(default)]
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskValidationError;

    fn try_from(value: RawTask) -> Result<Self, Self::Error> {
        let mut task = Task::new(value.description, value.kind)?;
        task.done = value.done;
        Ok(task)
    }
}

impl Task {
    /// Creates a not-done task after trimming and validating every field.
    pub fn new(description: impl AsRef<str>, kind: TaskKind) -> Result<Self, TaskValidationError> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        reject_line_breaks(description)?;

        let kind = match kind {
            TaskKind::ToDo => TaskKind::ToDo,
            TaskKind::Deadline { due } => {
                let due = due.trim();
                if due.is_empty() {
                    return Err(TaskValidationError::EmptyDueDate);
                }
                reject_line_breaks(due)?;
                let body = format!("{description} (by: {due})");
                if !decodes_to(&DEADLINE_BODY_RE, &body, &[description, due]) {
                    return Err(TaskValidationError::AmbiguousFields);
                }
                TaskKind::Deadline {
                    due: due.to_string(),
                }
            }
            TaskKind::Event { start, end } => {
                let (start, end) = (start.trim(), end.trim());
                if start.is_empty() || end.is_empty() {
                    return Err(TaskValidationError::EmptyEventTime);
                }
                reject_line_breaks(start)?;
                reject_line_breaks(end)?;
                let body = format!("{description} (from: {start} to: {end})");
                if !decodes_to(&EVENT_BODY_RE, &body, &[description, start, end]) {
                    return Err(TaskValidationError::AmbiguousFields);
                }
                TaskKind::Event {
                    start: start.to_string(),
                    end: end.to_string(),
                }
            }
        };

        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    pub fn todo(description: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        Self::new(description, TaskKind::ToDo)
    }

    pub fn deadline(
        description: impl AsRef<str>,
        due: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::new(description, TaskKind::Deadline { due: due.into() })
    }

    pub fn event(
        description: impl AsRef<str>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::new(
            description,
            TaskKind::Event {
                start: start.into(),
                end: end.into(),
            },
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Due literal for deadlines, `None` for other variants.
    pub fn due(&self) -> Option<&str> {
        match &self.kind {
            TaskKind::Deadline { due } => Some(due.as_str()),
            TaskKind::ToDo | TaskKind::Event { .. } => None,
        }
    }

    /// Single-letter variant tag used in the bracketed form.
    pub fn tag(&self) -> char {
        match self.kind {
            TaskKind::ToDo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Case-sensitive substring test against the description only.
    pub fn matches(&self, keyword: &str) -> bool {
        self.description.contains(keyword)
    }

    /// Renders the bracketed form, e.g. `[D][ ] submit report (by: Friday)`.
    pub fn to_line(&self) -> String {
        let flag = if self.done { 'X' } else { ' ' };
        match &self.kind {
            TaskKind::ToDo => format!("[T][{flag}] {}", self.description),
            TaskKind::Deadline { due } => {
                format!("[D][{flag}] {} (by: {due})", self.description)
            }
            TaskKind::Event { start, end } => {
                format!("[E][{flag}] {} (from: {start} to: {end})", self.description)
            }
        }
    }

    /// Decodes one persisted line produced by [`Task::to_line`].
    ///
    /// # Errors
    /// - Returns [`MalformedRecord`] when the variant/flag prefix is unknown,
    ///   the variant body does not match, or a decoded field is empty.
    pub fn from_line(line: &str) -> Result<Self, MalformedRecord> {
        let malformed = |reason: &str| MalformedRecord {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let captures = RECORD_RE
            .captures(line)
            .ok_or_else(|| malformed("unknown task prefix"))?;
        let body = &captures[3];

        let built = match &captures[1] {
            "T" => Self::todo(body),
            "D" => {
                let parts = DEADLINE_BODY_RE
                    .captures(body)
                    .ok_or_else(|| malformed("deadline without `(by: ...)` suffix"))?;
                Self::deadline(&parts[1], &parts[2])
            }
            "E" => {
                let parts = EVENT_BODY_RE
                    .captures(body)
                    .ok_or_else(|| malformed("event without `(from: ... to: ...)` suffix"))?;
                Self::event(&parts[1], &parts[2], &parts[3])
            }
            _ => return Err(malformed("unknown task prefix")),
        };

        let mut task = built.map_err(|err| malformed(&err.to_string()))?;
        if &captures[2] == "X" {
            task.mark_done();
        }
        Ok(task)
    }
}

fn reject_line_breaks(value: &str) -> Result<(), TaskValidationError> {
    if value.contains(['\n', '\r']) {
        return Err(TaskValidationError::LineBreak);
    }
    Ok(())
}

/// Whether `pattern` splits `body` back into exactly `fields`.
fn decodes_to(pattern: &Regex, body: &str, fields: &[&str]) -> bool {
    pattern.captures(body).is_some_and(|captures| {
        fields
            .iter()
            .enumerate()
            .all(|(offset, field)| &captures[offset + 1] == *field)
    })
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}
