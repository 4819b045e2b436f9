use std::cell::{Cell, RefCell};
use std::io;
use std::path::{Path, PathBuf};
use taskflow_core::command::LoadStatus;
use taskflow_core::{
    parse, CommandError, LoadReport, PersistedList, StorageError, StorageResult, Task, TaskList,
    TaskStore,
};

/// In-memory store that records saves and can be told to fail.
#[derive(Default)]
struct MemoryStore {
    path: PathBuf,
    saved: RefCell<Vec<String>>,
    fail_load: bool,
    fail_save: Cell<bool>,
}

impl MemoryStore {
    fn named(name: &str) -> Self {
        Self {
            path: PathBuf::from(name),
            ..Self::default()
        }
    }

    fn last_saved(&self) -> Option<String> {
        self.saved.borrow().last().cloned()
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> StorageResult<LoadReport> {
        if self.fail_load {
            return Err(StorageError::Read {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(LoadReport::default())
    }

    fn save(&self, tasks: &TaskList) -> StorageResult<()> {
        if self.fail_save.get() {
            return Err(StorageError::Write {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            });
        }
        let content = tasks
            .iter()
            .map(|task| format!("{}\n", task.to_line()))
            .collect::<String>();
        self.saved.borrow_mut().push(content);
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

struct Lists {
    active: PersistedList<MemoryStore>,
    archive: PersistedList<MemoryStore>,
}

impl Lists {
    fn new() -> Self {
        Self {
            active: PersistedList::new(TaskList::new(), MemoryStore::named("tasks.txt")),
            archive: PersistedList::new(TaskList::new(), MemoryStore::named("archive.txt")),
        }
    }

    fn run(&mut self, line: &str) -> Result<String, CommandError> {
        parse(line)?
            .execute(&mut self.active, &mut self.archive)
            .map(|outcome| outcome.message)
    }
}

#[test]
fn add_commands_append_and_save() {
    let mut lists = Lists::new();

    let message = lists.run("todo buy milk").unwrap();
    assert_eq!(
        message,
        "Got it. I've added this task:\n  [T][ ] buy milk\nNow you have 1 task in the list."
    );
    lists.run("event team sync /from Mon 6pm /to 7pm").unwrap();

    assert_eq!(lists.active.tasks().len(), 2);
    assert_eq!(
        lists.active.store().last_saved().unwrap(),
        "[T][ ] buy milk\n[E][ ] team sync (from: Mon 6pm to: 7pm)\n"
    );
}

#[test]
fn delete_with_valid_index_removes_task() {
    let mut lists = Lists::new();
    lists.run("todo smtg").unwrap();
    lists.run("event meeting /from Monday 6pm /to 7pm").unwrap();
    lists.run("deadline ip /by 2024-02-05 06:00pm").unwrap();

    let message = lists.run("delete 2").unwrap();

    assert!(message.contains("[E][ ] meeting (from: Monday 6pm to: 7pm)"));
    assert!(message.ends_with("Now you have 2 tasks in the list."));
    let remaining = lists
        .active
        .tasks()
        .iter()
        .map(|task| task.description())
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec!["smtg", "ip"]);
}

#[test]
fn out_of_range_index_fails_without_mutation_or_save() {
    let mut lists = Lists::new();
    lists.run("todo smtg").unwrap();
    let saves_before = lists.active.store().saved.borrow().len();

    for line in ["delete 0", "mark 2", "unmark -1", "archive 5"] {
        let err = lists.run(line).unwrap_err();
        assert!(
            matches!(err, CommandError::IndexOutOfRange { size: 1, .. }),
            "unexpected error for `{line}`: {err:?}"
        );
    }

    assert_eq!(lists.active.tasks().len(), 1);
    assert!(!lists.active.tasks().get(1).unwrap().is_done());
    assert_eq!(lists.active.store().saved.borrow().len(), saves_before);
}

#[test]
fn mark_and_unmark_report_updated_task() {
    let mut lists = Lists::new();
    lists.run("todo read book").unwrap();

    assert_eq!(
        lists.run("mark 1").unwrap(),
        "Nice! I've marked this task as done:\n  [T][X] read book"
    );
    assert_eq!(
        lists.run("unmark 1").unwrap(),
        "OK, I've marked this task as not done yet:\n  [T][ ] read book"
    );
}

#[test]
fn list_numbers_tasks_or_reports_empty() {
    let mut lists = Lists::new();
    assert_eq!(lists.run("list").unwrap(), "Your task list is empty.");

    lists.run("todo a").unwrap();
    lists.run("todo b").unwrap();
    assert_eq!(
        lists.run("list").unwrap(),
        "Here are the tasks in your list:\n1.[T][ ] a\n2.[T][ ] b"
    );
}

#[test]
fn find_lists_matches_or_fails_with_keyword_not_found() {
    let mut lists = Lists::new();
    lists.run("todo read book").unwrap();
    lists.run("todo buy milk").unwrap();
    lists.run("deadline return book /by Sunday").unwrap();

    assert_eq!(
        lists.run("find book").unwrap(),
        "Here are the matching tasks in your list:\n1.[T][ ] read book\n2.[D][ ] return book (by: Sunday)"
    );

    let err = lists.run("find Sunday").unwrap_err();
    assert!(matches!(err, CommandError::KeywordNotFound(ref keyword) if keyword == "Sunday"));
}

#[test]
fn archive_moves_task_and_saves_both_lists() {
    let mut lists = Lists::new();
    lists.run("todo a").unwrap();
    lists.run("todo b").unwrap();

    let message = lists.run("archive 1").unwrap();

    assert!(message.ends_with("Now you have 1 task in the list and 1 task in the archive."));
    assert_eq!(lists.active.store().last_saved().unwrap(), "[T][ ] b\n");
    assert_eq!(lists.archive.store().last_saved().unwrap(), "[T][ ] a\n");
    assert_eq!(
        lists.run("archived").unwrap(),
        "Here are the tasks in your archive:\n1.[T][ ] a"
    );
}

#[test]
fn save_failure_keeps_memory_ahead_of_disk() {
    let mut lists = Lists::new();
    lists.active.store().fail_save.set(true);

    let err = lists.run("todo buy milk").unwrap_err();

    assert!(matches!(err, CommandError::Storage(StorageError::Write { .. })));
    assert_eq!(err.code(), "storage_io_failure");
    assert_eq!(lists.active.tasks().len(), 1);
    assert!(lists.active.store().last_saved().is_none());
}

#[test]
fn failed_load_blocks_saves() {
    let store = MemoryStore {
        fail_load: true,
        ..MemoryStore::named("tasks.txt")
    };
    let (mut active, status) = PersistedList::open(store);
    assert!(matches!(status, LoadStatus::Failed(StorageError::Read { .. })));
    assert!(active.is_save_blocked());

    active.tasks_mut().add(Task::todo("kept in memory").unwrap());
    let err = active.save().unwrap_err();

    assert!(matches!(err, StorageError::SaveBlocked { .. }));
    assert!(active.store().last_saved().is_none());
}

#[test]
fn exit_signals_front_end_without_saving() {
    let mut lists = Lists::new();
    let outcome = parse("bye")
        .unwrap()
        .execute(&mut lists.active, &mut lists.archive)
        .unwrap();

    assert!(outcome.exit);
    assert!(lists.active.store().last_saved().is_none());
}

#[test]
fn failed_archive_save_leaves_active_list_and_file_untouched() {
    let mut lists = Lists::new();
    lists.run("todo keep me").unwrap();
    let saves_before = lists.active.store().saved.borrow().len();
    lists.archive.store().fail_save.set(true);

    let err = lists.run("archive 1").unwrap_err();

    assert!(matches!(err, CommandError::Storage(StorageError::Write { .. })));
    assert_eq!(lists.active.store().saved.borrow().len(), saves_before);
    assert_eq!(lists.active.store().last_saved().unwrap(), "[T][ ] keep me\n");
    assert_eq!(lists.active.tasks().len(), 1);
    assert!(lists.archive.tasks().is_empty());
}

#[test]
fn blocked_archive_refuses_move() {
    let store = MemoryStore {
        fail_load: true,
        ..MemoryStore::named("archive.txt")
    };
    let (archive, _) = PersistedList::open(store);
    let mut lists = Lists {
        archive,
        ..Lists::new()
    };
    lists.run("todo keep me").unwrap();

    let err = lists.run("archive 1").unwrap_err();

    assert!(matches!(err, CommandError::Storage(StorageError::SaveBlocked { .. })));
    assert_eq!(lists.active.tasks().len(), 1);
    assert_eq!(lists.active.store().last_saved().unwrap(), "[T][ ] keep me\n");

    // Later saves of the active list still carry the task.
    lists.run("todo another").unwrap();
    assert_eq!(
        lists.active.store().last_saved().unwrap(),
        "[T][ ] keep me\n[T][ ] another\n"
    );
}

#[test]
fn multi_line_or_ambiguous_text_is_rejected_before_saving() {
    let mut lists = Lists::new();

    for line in ["todo first\nsecond", "event x /from a to: b /to c"] {
        let err = lists.run(line).unwrap_err();
        assert!(
            matches!(err, CommandError::InvalidArgument(_)),
            "unexpected result for `{line}`: {err:?}"
        );
        assert_eq!(err.code(), "invalid_argument");
    }

    assert!(lists.active.tasks().is_empty());
    assert!(lists.active.store().last_saved().is_none());
}

#[test]
fn add_verbs_follow_task_kind() {
    for (line, verb) in [
        ("todo a", "todo"),
        ("deadline a /by b", "deadline"),
        ("event a /from b /to c", "event"),
        ("archived", "archived"),
    ] {
        assert_eq!(parse(line).unwrap().verb(), verb);
    }
}
