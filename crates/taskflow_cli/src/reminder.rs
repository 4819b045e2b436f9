//! Startup reminders for deadlines that are overdue or due soon.
//!
//! Due dates are free text in the core; only literals that happen to parse
//! as a calendar date/time get a reminder. Everything else is skipped.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use taskflow_core::TaskList;

pub const REMINDER_WINDOW_DAYS: i64 = 3;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %I:%M%p", "%Y-%m-%d %H:%M", "%d/%m/%Y %H%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// 1-based position in the active list.
    pub index: usize,
    pub line: String,
    pub overdue: bool,
}

/// Parses a due literal; a bare date counts as the end of that day.
pub fn parse_due(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(23, 59, 0))
        })
}

/// Not-done deadlines that are overdue or due within the reminder window.
pub fn due_soon(tasks: &TaskList, now: NaiveDateTime) -> Vec<Reminder> {
    let horizon = now + Duration::days(REMINDER_WINDOW_DAYS);
    tasks
        .list()
        .into_iter()
        .filter(|(_, task)| !task.is_done())
        .filter_map(|(index, task)| {
            let due = parse_due(task.due()?)?;
            (due <= horizon).then(|| Reminder {
                index,
                line: task.to_line(),
                overdue: due < now,
            })
        })
        .collect()
}

pub fn render(reminders: &[Reminder]) -> Option<String> {
    if reminders.is_empty() {
        return None;
    }
    let lines = reminders
        .iter()
        .map(|reminder| {
            let label = if reminder.overdue { "OVERDUE" } else { "due soon" };
            format!("{}.{} [{label}]", reminder.index, reminder.line)
        })
        .collect::<Vec<_>>();
    Some(format!("Reminder:\n{}", lines.join("\n")))
}
