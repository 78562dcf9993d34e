use todo_core::{NewTask, Task, TaskValidationError};

#[test]
fn new_task_starts_open_with_equal_timestamps() {
    let task = NewTask::new("catch a coelacanth", 1_700_000_000_000);

    assert_eq!(task.text, "catch a coelacanth");
    assert!(!task.completed);
    assert_eq!(task.created_at, task.updated_at);
    assert_eq!(task.validate(), Ok(()));
}

#[test]
fn task_serialization_uses_camel_case_fields() {
    let task = Task {
        id: 3,
        text: "pay off loan".to_string(),
        completed: true,
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_360_000,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["text"], "pay off loan");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_360_000_i64);
    assert!(json.get("created_at").is_none());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn empty_text_error_message_is_user_facing() {
    assert_eq!(
        TaskValidationError::EmptyText.to_string(),
        "Todo text cannot be empty"
    );
}
