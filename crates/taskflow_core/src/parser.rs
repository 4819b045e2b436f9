//! Free-text input parsing.
//!
//! # Responsibility
//! - Turn one input line into a `Command`, validating its shape first.
//! - Map lowercase verbs to parse functions through one static table.
//!
//! # Invariants
//! - Verbs match case-insensitively; arguments keep their case.
//! - Shape errors are reported here, never deferred to execution.
//! - Event text is split on `/from` or `/to` wherever they occur, so a
//!   description containing either marker is mis-segmented. This matches
//!   how saved input has always been read and is kept as is.

use crate::command::{Command, CommandError, CommandResult, MissingArgument};
use crate::model::task::{Task, TaskValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

type ParseFn = fn(&str) -> CommandResult<Command>;

const DEADLINE_MARKER: &str = "/by ";

static EVENT_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/from|/to").expect("valid event marker regex"));

static VERB_TABLE: Lazy<HashMap<&'static str, ParseFn>> = Lazy::new(|| {
    let entries: [(&'static str, ParseFn); 12] = [
        ("bye", parse_exit),
        ("list", parse_list),
        ("help", parse_help),
        ("archived", parse_list_archive),
        ("delete", parse_delete),
        ("mark", parse_mark),
        ("unmark", parse_unmark),
        ("archive", parse_archive),
        ("todo", parse_todo),
        ("deadline", parse_deadline),
        ("event", parse_event),
        ("find", parse_find),
    ];
    entries.into_iter().collect()
});

#[cfg(test)]
fn supported_verbs() -> Vec<&'static str> {
    let mut verbs = VERB_TABLE.keys().copied().collect::<Vec<_>>();
    verbs.sort_unstable();
    verbs
}

/// Parses one raw input line.
///
/// # Errors
/// - `UnknownCommand` when the first token is not a known verb (an empty line
///   reports an empty token).
/// - `MissingArgument` / `InvalidNumber` when the remainder has the wrong shape.
pub fn parse(raw_line: &str) -> CommandResult<Command> {
    let line = raw_line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let parse_fn = VERB_TABLE
        .get(verb.to_lowercase().as_str())
        .ok_or_else(|| CommandError::UnknownCommand(verb.to_string()))?;
    parse_fn(rest)
}

/// Splits a deadline remainder on the first `/by ` marker.
///
/// Returns the raw `(description, due)` segments, untrimmed.
pub fn split_deadline(rest: &str) -> Option<(&str, &str)> {
    rest.split_once(DEADLINE_MARKER)
}

/// Splits an event remainder on every `/from` or `/to` marker and keeps the
/// first three raw segments `[description, start, end]`.
///
/// Returns `None` when fewer than three segments exist.
pub fn split_event(rest: &str) -> Option<[&str; 3]> {
    let mut segments = EVENT_MARKER_RE.split(rest);
    let description = segments.next()?;
    let start = segments.next()?;
    let end = segments.next()?;
    Some([description, start, end])
}

// Trailing text after argument-free verbs is ignored.
fn parse_exit(_: &str) -> CommandResult<Command> {
    Ok(Command::Exit)
}

fn parse_list(_: &str) -> CommandResult<Command> {
    Ok(Command::List)
}

fn parse_help(_: &str) -> CommandResult<Command> {
    Ok(Command::Help)
}

fn parse_list_archive(_: &str) -> CommandResult<Command> {
    Ok(Command::ListArchive)
}

fn parse_todo(rest: &str) -> CommandResult<Command> {
    let task = Task::todo(rest).map_err(|err| {
        argument_error(
            err,
            MissingArgument::TodoDescription,
            MissingArgument::TodoDescription,
        )
    })?;
    Ok(Command::Add(task))
}

fn parse_deadline(rest: &str) -> CommandResult<Command> {
    if rest.trim().is_empty() {
        return Err(CommandError::MissingArgument(
            MissingArgument::DeadlineDescription,
        ));
    }
    let (description, due) = split_deadline(rest).ok_or(CommandError::MissingArgument(
        MissingArgument::DeadlineDate,
    ))?;
    let task = Task::deadline(description, due).map_err(|err| {
        argument_error(
            err,
            MissingArgument::DeadlineDescription,
            MissingArgument::DeadlineDate,
        )
    })?;
    Ok(Command::Add(task))
}

fn parse_event(rest: &str) -> CommandResult<Command> {
    if rest.trim().is_empty() {
        return Err(CommandError::MissingArgument(
            MissingArgument::EventDescription,
        ));
    }
    let [description, start, end] = split_event(rest).ok_or(CommandError::MissingArgument(
        MissingArgument::EventTimes,
    ))?;
    let task = Task::event(description, start, end).map_err(|err| {
        argument_error(
            err,
            MissingArgument::EventDescription,
            MissingArgument::EventTimes,
        )
    })?;
    Ok(Command::Add(task))
}

fn parse_find(rest: &str) -> CommandResult<Command> {
    let keyword = rest.trim();
    if keyword.is_empty() {
        return Err(CommandError::MissingArgument(MissingArgument::FindKeyword));
    }
    Ok(Command::Find(keyword.to_string()))
}

fn parse_delete(rest: &str) -> CommandResult<Command> {
    parse_index(rest, "delete", MissingArgument::DeleteIndex).map(Command::Delete)
}

fn parse_mark(rest: &str) -> CommandResult<Command> {
    parse_index(rest, "mark", MissingArgument::MarkIndex).map(Command::Mark)
}

fn parse_unmark(rest: &str) -> CommandResult<Command> {
    parse_index(rest, "unmark", MissingArgument::UnmarkIndex).map(Command::Unmark)
}

fn parse_archive(rest: &str) -> CommandResult<Command> {
    parse_index(rest, "archive", MissingArgument::ArchiveIndex).map(Command::Archive)
}

fn parse_index(rest: &str, verb: &'static str, missing: MissingArgument) -> CommandResult<i64> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(CommandError::MissingArgument(missing));
    }
    value
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidNumber {
            verb,
            value: value.to_string(),
        })
}

fn argument_error(
    err: TaskValidationError,
    description: MissingArgument,
    time: MissingArgument,
) -> CommandError {
    match err {
        TaskValidationError::EmptyDescription => CommandError::MissingArgument(description),
        TaskValidationError::EmptyDueDate | TaskValidationError::EmptyEventTime => {
            CommandError::MissingArgument(time)
        }
        TaskValidationError::LineBreak | TaskValidationError::AmbiguousFields => {
            CommandError::InvalidArgument(err)
        }
    }
}
