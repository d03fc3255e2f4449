use tasker_core::db::open_db_in_memory;
use tasker_core::{
    export_csv, CompletionOutcome, ExportError, NewTask, SqliteTaskRepository, TaskRepository,
    TaskService,
};

#[test]
fn export_of_empty_store_writes_only_the_header() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let count = export_csv(&repo, &path).unwrap();
    assert_eq!(count, 0);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.starts_with("ID,Title,Description,Done,Created At,Completed At"));
}

#[test]
fn quoted_fields_roundtrip_through_a_standard_reader() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let title = "A, \"B\", C";
    let description = "first line\nsecond, line";
    repo.create_task(&NewTask::new(title).with_description(description))
        .unwrap();
    repo.create_task(&NewTask::new("日本語タイトル")).unwrap();

    export_csv(&repo, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][1], title);
    assert_eq!(&records[0][2], description);
    assert_eq!(&records[1][1], "日本語タイトル");
}

#[test]
fn completed_at_field_is_empty_until_done_then_formatted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let open_id = repo.create_task(&NewTask::new("open")).unwrap();
    let done_id = repo.create_task(&NewTask::new("done")).unwrap();
    repo.mark_done(done_id).unwrap();

    export_csv(&repo, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    let open_row = records
        .iter()
        .find(|r| r[0] == open_id.to_string())
        .unwrap();
    assert_eq!(&open_row[3], "false");
    assert_eq!(&open_row[5], "");

    let done_row = records
        .iter()
        .find(|r| r[0] == done_id.to_string())
        .unwrap();
    assert_eq!(&done_row[3], "true");
    assert_timestamp_format(&done_row[5]);
    assert_timestamp_format(&done_row[4]);
}

#[test]
fn export_overwrites_previous_destination_file() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    std::fs::write(&path, "stale data that must disappear\nmore stale data\n").unwrap();

    export_csv(&repo, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("stale"));
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn export_to_bad_destination_fails_with_target_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = export_csv(&repo, "/definitely/not/a/real/dir/tasks.csv").unwrap_err();
    assert!(matches!(err, ExportError::Target { .. }));
}

#[test]
fn scenario_create_complete_export() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let milk_id = service.add_task("Buy milk", "").unwrap();
    service.add_task("Walk dog", "").unwrap();

    let tasks = service.list_tasks().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Buy milk");
    assert_eq!(tasks[1].title, "Walk dog");

    match service.complete_task(milk_id).unwrap() {
        CompletionOutcome::Completed(task) => assert!(task.completed_at.is_some()),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let tasks = service.list_tasks().unwrap();
    assert!(tasks[0].done);
    assert!(tasks[0].completed_at.is_some());
    assert!(!tasks[1].done);
    assert!(tasks[1].completed_at.is_none());

    let repo = SqliteTaskRepository::new(&conn);
    let count = export_csv(&repo, &path).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&records[0][1], "Buy milk");
    assert_eq!(&records[0][3], "true");
    assert!(!records[0][5].is_empty());
    assert_eq!(&records[1][1], "Walk dog");
    assert_eq!(&records[1][3], "false");
    assert!(records[1][5].is_empty());
}

fn assert_timestamp_format(value: &str) {
    assert_eq!(value.len(), 19, "unexpected timestamp layout: {value}");
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| panic!("timestamp `{value}` does not match YYYY-MM-DD HH:MM:SS"));
}
