use super::{Command, CommandError, CommandResult, Outcome, PersistedList};
use crate::model::task::Task;
use crate::storage::TaskStore;
use log::info;

/// Fixed command table printed by `help`.
pub const HELP_TEXT: &str = "\
Here are the commands you can use:
bye: Terminate the program.
list: Display the list of tasks.
mark <index>: Mark a task as done.
unmark <index>: Mark a task as not done.
delete <index>: Delete a task.
todo <description>: Add a todo task.
deadline <description> /by <dueDate>: Add a deadline task.
event <description> /from <startDate> /to <endDate>: Add an event task.
find <keyword>: Find tasks whose description contains the keyword.
archive <index>: Move a task to the archive.
archived: Display the archived tasks.
help: Show this list of commands.";

const GOODBYE: &str = "Goodbye. Have a great day ahead!";

impl Command {
    /// Runs this command against the active and archive lists.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when an index is outside the targeted list.
    /// - `KeywordNotFound` when `find` matches nothing.
    /// - `Storage` when saving fails after the in-memory change was applied.
    pub fn execute<S: TaskStore>(
        self,
        active: &mut PersistedList<S>,
        archive: &mut PersistedList<S>,
    ) -> CommandResult<Outcome> {
        let verb = self.verb();
        let result = self.run(active, archive);
        match &result {
            Ok(_) => info!(
                "event=command_execute module=command status=ok verb={} tasks={} archived={}",
                verb,
                active.tasks().len(),
                archive.tasks().len()
            ),
            Err(err) => info!(
                "event=command_execute module=command status=error verb={} error_code={}",
                verb,
                err.code()
            ),
        }
        result
    }

    fn run<S: TaskStore>(
        self,
        active: &mut PersistedList<S>,
        archive: &mut PersistedList<S>,
    ) -> CommandResult<Outcome> {
        match self {
            Self::Exit => Ok(Outcome {
                message: GOODBYE.to_string(),
                exit: true,
            }),
            Self::Help => Ok(Outcome::reply(HELP_TEXT)),
            Self::List => Ok(Outcome::reply(render_listing(
                "Here are the tasks in your list:",
                "Your task list is empty.",
                active.tasks().iter(),
            ))),
            Self::ListArchive => Ok(Outcome::reply(render_listing(
                "Here are the tasks in your archive:",
                "Your archive is empty.",
                archive.tasks().iter(),
            ))),
            Self::Add(task) => {
                let line = task.to_line();
                active.tasks_mut().add(task);
                active.save()?;
                Ok(Outcome::reply(format!(
                    "Got it. I've added this task:\n  {line}\nNow you have {} in the list.",
                    count_tasks(active.tasks().len())
                )))
            }
            Self::Delete(index) => {
                let position = to_position(index, active.tasks().len())?;
                let removed = active.tasks_mut().delete(position)?;
                active.save()?;
                Ok(Outcome::reply(format!(
                    "Noted. I've removed this task:\n  {removed}\nNow you have {} in the list.",
                    count_tasks(active.tasks().len())
                )))
            }
            Self::Mark(index) => {
                let position = to_position(index, active.tasks().len())?;
                let line = active.tasks_mut().mark(position)?.to_line();
                active.save()?;
                Ok(Outcome::reply(format!(
                    "Nice! I've marked this task as done:\n  {line}"
                )))
            }
            Self::Unmark(index) => {
                let position = to_position(index, active.tasks().len())?;
                let line = active.tasks_mut().unmark(position)?.to_line();
                active.save()?;
                Ok(Outcome::reply(format!(
                    "OK, I've marked this task as not done yet:\n  {line}"
                )))
            }
            Self::Find(keyword) => {
                let matches = active.tasks().find_by_keyword(&keyword);
                if matches.is_empty() {
                    return Err(CommandError::KeywordNotFound(keyword));
                }
                Ok(Outcome::reply(render_listing(
                    "Here are the matching tasks in your list:",
                    "",
                    matches.into_iter(),
                )))
            }
            Self::Archive(index) => {
                let position = to_position(index, active.tasks().len())?;
                let moved = active
                    .tasks()
                    .get(position)
                    .cloned()
                    .ok_or(CommandError::IndexOutOfRange {
                        index,
                        size: active.tasks().len(),
                    })?;
                let line = moved.to_line();

                // Archive copy is on disk before the active list drops the task.
                archive.tasks_mut().add(moved);
                if let Err(err) = archive.save() {
                    let last = archive.tasks().len();
                    archive.tasks_mut().delete(last)?;
                    return Err(err.into());
                }
                active.tasks_mut().delete(position)?;
                active.save()?;
                Ok(Outcome::reply(format!(
                    "Archived this task:\n  {line}\nNow you have {} in the list and {} in the archive.",
                    count_tasks(active.tasks().len()),
                    count_tasks(archive.tasks().len())
                )))
            }
        }
    }
}

fn to_position(index: i64, size: usize) -> CommandResult<usize> {
    usize::try_from(index).map_err(|_| CommandError::IndexOutOfRange { index, size })
}

fn count_tasks(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

fn render_listing<'a>(
    heading: &str,
    empty: &str,
    tasks: impl Iterator<Item = &'a Task>,
) -> String {
    let lines = tasks
        .enumerate()
        .map(|(position, task)| format!("{}.{task}", position + 1))
        .collect::<Vec<_>>();
    if lines.is_empty() {
        return empty.to_string();
    }
    format!("{heading}\n{}", lines.join("\n"))
}
