use taskflow_core::parser::{split_deadline, split_event};
use taskflow_core::{parse, Command, CommandError, MissingArgument, Task};

fn missing(line: &str) -> MissingArgument {
    match parse(line) {
        Err(CommandError::MissingArgument(which)) => which,
        other => panic!("expected MissingArgument for `{line}`, got {other:?}"),
    }
}

#[test]
fn simple_verbs_are_case_insensitive() {
    assert_eq!(parse("bye").unwrap(), Command::Exit);
    assert_eq!(parse("LIST").unwrap(), Command::List);
    assert_eq!(parse("  Help  ").unwrap(), Command::Help);
    assert_eq!(parse("archived").unwrap(), Command::ListArchive);
}

#[test]
fn unknown_verb_is_reported_as_typed() {
    let err = parse("Blah 1 2").unwrap_err();
    assert!(matches!(err, CommandError::UnknownCommand(ref token) if token == "Blah"));
    assert!(err.to_string().contains("'help'"));
}

#[test]
fn empty_line_is_unknown_command() {
    assert!(matches!(
        parse("   ").unwrap_err(),
        CommandError::UnknownCommand(ref token) if token.is_empty()
    ));
}

#[test]
fn todo_requires_description() {
    assert_eq!(missing("todo"), MissingArgument::TodoDescription);
    assert_eq!(missing("todo    "), MissingArgument::TodoDescription);
    assert_eq!(
        parse("todo buy milk").unwrap(),
        Command::Add(Task::todo("buy milk").unwrap())
    );
}

#[test]
fn deadline_splits_on_first_by_marker() {
    assert_eq!(
        split_deadline("submit report /by 2024-02-05 06:00pm"),
        Some(("submit report ", "2024-02-05 06:00pm"))
    );

    let command = parse("deadline submit report /by 2024-02-05 06:00pm").unwrap();
    let Command::Add(task) = command else {
        panic!("expected Add");
    };
    assert_eq!(task.description(), "submit report");
    assert_eq!(task.due(), Some("2024-02-05 06:00pm"));
}

#[test]
fn deadline_shape_errors() {
    assert_eq!(missing("deadline"), MissingArgument::DeadlineDescription);
    assert_eq!(missing("deadline submit report"), MissingArgument::DeadlineDate);
    assert_eq!(missing("deadline submit report /by"), MissingArgument::DeadlineDate);
    assert_eq!(missing("deadline submit report /by   "), MissingArgument::DeadlineDate);
    assert_eq!(missing("deadline /by Friday"), MissingArgument::DeadlineDescription);
}

#[test]
fn event_splits_into_three_segments() {
    assert_eq!(
        split_event("team sync /from Mon 6pm /to 7pm"),
        Some(["team sync ", " Mon 6pm ", " 7pm"])
    );

    assert_eq!(
        parse("event team sync /from Mon 6pm /to 7pm").unwrap(),
        Command::Add(Task::event("team sync", "Mon 6pm", "7pm").unwrap())
    );
}

#[test]
fn event_marker_inside_description_missegments() {
    // "/to" inside the description is treated as a marker.
    assert_eq!(
        parse("event go /tokyo trip /from Mon /to Fri").unwrap(),
        Command::Add(Task::event("go", "kyo trip", "Mon").unwrap())
    );
}

#[test]
fn event_shape_errors() {
    assert_eq!(missing("event"), MissingArgument::EventDescription);
    assert_eq!(missing("event team sync"), MissingArgument::EventTimes);
    assert_eq!(missing("event team sync /from Mon 6pm"), MissingArgument::EventTimes);
    assert_eq!(missing("event team sync /from  /to 7pm"), MissingArgument::EventTimes);
    assert_eq!(missing("event /from Mon /to Tue"), MissingArgument::EventDescription);
}

#[test]
fn index_verbs_parse_integers() {
    assert_eq!(parse("mark 1").unwrap(), Command::Mark(1));
    assert_eq!(parse("UNMARK 2").unwrap(), Command::Unmark(2));
    assert_eq!(parse("delete 3").unwrap(), Command::Delete(3));
    assert_eq!(parse("archive 4").unwrap(), Command::Archive(4));
    assert_eq!(parse("delete -1").unwrap(), Command::Delete(-1));
}

#[test]
fn index_verbs_report_missing_and_invalid_numbers() {
    assert_eq!(missing("mark"), MissingArgument::MarkIndex);
    assert_eq!(missing("unmark "), MissingArgument::UnmarkIndex);
    assert_eq!(missing("delete"), MissingArgument::DeleteIndex);
    assert_eq!(missing("archive"), MissingArgument::ArchiveIndex);

    let err = parse("mark first").unwrap_err();
    assert!(matches!(
        err,
        CommandError::InvalidNumber { verb: "mark", ref value } if value == "first"
    ));
}

#[test]
fn find_requires_keyword_and_trims_it() {
    assert_eq!(missing("find"), MissingArgument::FindKeyword);
    assert_eq!(parse("find  book ").unwrap(), Command::Find("book".to_string()));
}
