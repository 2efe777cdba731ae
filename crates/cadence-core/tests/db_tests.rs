use cadence_core::{
    params::{
        CompleteSprint, CreateEpic, CreateSprint, CreateTask, GetBacklog, GetBoard, MoveChange,
        MoveTask, SetLabels,
    },
    Backlog, BoardFilter, Database, HistoryField, Priority, TrackerError,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn add_task(db: &mut Database, project_id: u64, title: &str) -> u64 {
    db.create_task(&CreateTask {
        project_id,
        title: title.to_string(),
        ..Default::default()
    })
    .expect("Failed to create task")
    .id
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_get_missing_project_is_none() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_project(42).expect("Query failed").is_none());
}

#[test]
fn test_operations_on_missing_project_fail() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.create_task(&CreateTask {
        project_id: 99,
        title: "Orphan".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(TrackerError::ProjectNotFound { id: 99 })));

    let result = db.board(&GetBoard {
        project_id: 99,
        ..Default::default()
    });
    assert!(matches!(result, Err(TrackerError::ProjectNotFound { .. })));
}

#[test]
fn test_positions_stay_contiguous_through_move_sequences() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Moves").expect("Failed to create project");
    let statuses = db.list_statuses(project.id).expect("Failed to list statuses");
    let (todo, doing) = (statuses[0].id, statuses[1].id);

    let ids: Vec<u64> = (0..5)
        .map(|i| add_task(&mut db, project.id, &format!("T{i}")))
        .collect();

    // A mix of reorders and cross-column moves.
    let moves = [
        (ids[4], vec![MoveChange::Position { index: 0 }]),
        (ids[0], vec![MoveChange::Status { status_id: doing }]),
        (
            ids[2],
            vec![
                MoveChange::Status { status_id: doing },
                MoveChange::Position { index: 0 },
            ],
        ),
        (ids[3], vec![MoveChange::Position { index: 99 }]),
        (ids[2], vec![MoveChange::Status { status_id: todo }]),
    ];
    for (task_id, changes) in moves {
        db.move_task(&MoveTask {
            task_id,
            user_id: 1,
            changes,
        })
        .expect("Failed to move task");
    }

    let board = db
        .board(&GetBoard {
            project_id: project.id,
            ..Default::default()
        })
        .expect("Failed to assemble board");

    for column in &board.columns {
        let positions: Vec<u32> = column.tasks.iter().map(|t| t.position).collect();
        let expected: Vec<u32> = (0..positions.len() as u32).collect();
        assert_eq!(positions, expected, "column {}", column.status.name);
    }
}

#[test]
fn test_position_index_clamps_to_column_length() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Clamp").expect("Failed to create project");
    let a = add_task(&mut db, project.id, "A");
    let b = add_task(&mut db, project.id, "B");

    let moved = db
        .move_task(&MoveTask {
            task_id: a,
            user_id: 1,
            changes: vec![MoveChange::Position { index: 50 }],
        })
        .expect("Failed to move task");
    assert_eq!(moved.position, 1);

    let first = db.get_task(b).expect("Failed to get task").unwrap();
    assert_eq!(first.position, 0);
}

#[test]
fn test_move_to_foreign_status_is_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let ours = db.create_project("Ours").expect("Failed to create project");
    let theirs = db.create_project("Theirs").expect("Failed to create project");
    let task = add_task(&mut db, ours.id, "Homebody");

    let foreign = db.list_statuses(theirs.id).expect("Failed to list statuses")[0].id;
    let result = db.move_task(&MoveTask {
        task_id: task,
        user_id: 1,
        changes: vec![MoveChange::Status { status_id: foreign }],
    });
    assert!(matches!(result, Err(TrackerError::StatusNotFound { .. })));
}

#[test]
fn test_board_filters_combine_with_and() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Filters").expect("Failed to create project");
    let sprint = db
        .create_sprint(&CreateSprint {
            project_id: project.id,
            name: "Sprint".to_string(),
            ..Default::default()
        })
        .expect("Failed to create sprint");

    db.create_task(&CreateTask {
        project_id: project.id,
        title: "In sprint, assigned".to_string(),
        sprint_id: Some(sprint.id),
        assignee_id: Some(7),
        ..Default::default()
    })
    .expect("Failed to create task");
    db.create_task(&CreateTask {
        project_id: project.id,
        title: "In sprint, unassigned".to_string(),
        sprint_id: Some(sprint.id),
        ..Default::default()
    })
    .expect("Failed to create task");
    add_task(&mut db, project.id, "Loose");

    let board = db
        .board(&GetBoard {
            project_id: project.id,
            filter: BoardFilter {
                sprint_id: Some(sprint.id),
                assignee_id: Some(7),
                ..Default::default()
            },
        })
        .expect("Failed to assemble board");

    let visible: usize = board.columns.iter().map(|c| c.tasks.len()).sum();
    assert_eq!(visible, 1);
    assert_eq!(board.columns[0].tasks[0].title, "In sprint, assigned");
    // Every column still renders, filtered or not.
    assert_eq!(board.columns.len(), 3);
}

#[test]
fn test_backlog_orders_by_epic_priority_position() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Order").expect("Failed to create project");
    let epic = db
        .create_epic(&CreateEpic {
            project_id: project.id,
            code: "CAD-1".to_string(),
            title: "Epic".to_string(),
            color: None,
        })
        .expect("Failed to create epic");

    db.create_task(&CreateTask {
        project_id: project.id,
        title: "Epic low".to_string(),
        epic_id: Some(epic.id),
        priority: Some(Priority::Low),
        ..Default::default()
    })
    .expect("Failed to create task");
    db.create_task(&CreateTask {
        project_id: project.id,
        title: "Epic critical".to_string(),
        epic_id: Some(epic.id),
        priority: Some(Priority::Critical),
        ..Default::default()
    })
    .expect("Failed to create task");
    db.create_task(&CreateTask {
        project_id: project.id,
        title: "No epic".to_string(),
        priority: Some(Priority::Critical),
        ..Default::default()
    })
    .expect("Failed to create task");

    let backlog = db
        .backlog(&GetBacklog {
            project_id: project.id,
            group_by_epic: false,
        })
        .expect("Failed to assemble backlog");

    match backlog {
        Backlog::Flat { tasks, total } => {
            assert_eq!(total, 3);
            let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
            assert_eq!(titles, vec!["Epic critical", "Epic low", "No epic"]);
            // Tasks in an epic come back hydrated.
            assert_eq!(tasks[0].epic.as_ref().unwrap().code, "CAD-1");
        }
        Backlog::Grouped { .. } => panic!("Expected flat backlog"),
    }
}

#[test]
fn test_sprint_window_must_be_ordered() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Dates").expect("Failed to create project");

    let result = db.create_sprint(&CreateSprint {
        project_id: project.id,
        name: "Backwards".to_string(),
        start_date: Some("2026-03-13".parse().unwrap()),
        end_date: Some("2026-03-02".parse().unwrap()),
        ..Default::default()
    });
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));
}

#[test]
fn test_second_sprint_cannot_start_while_one_is_active() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Guard").expect("Failed to create project");

    let mut sprints = Vec::new();
    for name in ["One", "Two"] {
        sprints.push(
            db.create_sprint(&CreateSprint {
                project_id: project.id,
                name: name.to_string(),
                ..Default::default()
            })
            .expect("Failed to create sprint")
            .id,
        );
    }

    db.start_sprint(sprints[0]).expect("Failed to start sprint");

    let result = db.start_sprint(sprints[1]);
    assert!(matches!(result, Err(TrackerError::Conflict { .. })));

    // Restarting the active sprint is also a conflict.
    let result = db.start_sprint(sprints[0]);
    assert!(matches!(result, Err(TrackerError::Conflict { .. })));

    // The failed start left both sprints untouched.
    let one = db.get_sprint(sprints[0]).expect("Query failed").unwrap();
    let two = db.get_sprint(sprints[1]).expect("Query failed").unwrap();
    assert_eq!(one.status, cadence_core::SprintStatus::Active);
    assert_eq!(two.status, cadence_core::SprintStatus::Planning);
    assert!(two.started_at.is_none());
}

#[test]
fn test_complete_sprint_validates_carry_target() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Carry").expect("Failed to create project");
    let sprint = db
        .create_sprint(&CreateSprint {
            project_id: project.id,
            name: "Sprint".to_string(),
            ..Default::default()
        })
        .expect("Failed to create sprint");
    db.start_sprint(sprint.id).expect("Failed to start sprint");

    let result = db.complete_sprint(&CompleteSprint {
        sprint_id: sprint.id,
        move_incomplete_to: Some(sprint.id),
        user_id: 1,
    });
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));

    let result = db.complete_sprint(&CompleteSprint {
        sprint_id: sprint.id,
        move_incomplete_to: Some(999),
        user_id: 1,
    });
    assert!(matches!(result, Err(TrackerError::SprintNotFound { id: 999 })));
}

#[test]
fn test_carry_over_records_sprint_history() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("History").expect("Failed to create project");
    let sprint = db
        .create_sprint(&CreateSprint {
            project_id: project.id,
            name: "Sprint".to_string(),
            ..Default::default()
        })
        .expect("Failed to create sprint");

    let task = db
        .create_task(&CreateTask {
            project_id: project.id,
            title: "Unfinished".to_string(),
            sprint_id: Some(sprint.id),
            ..Default::default()
        })
        .expect("Failed to create task");

    db.start_sprint(sprint.id).expect("Failed to start sprint");
    db.complete_sprint(&CompleteSprint {
        sprint_id: sprint.id,
        move_incomplete_to: None,
        user_id: 3,
    })
    .expect("Failed to complete sprint");

    let moved = db.get_task(task.id).expect("Failed to get task").unwrap();
    assert_eq!(moved.sprint_id, None);

    let history = db.get_task_history(task.id).expect("Failed to get history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].field, HistoryField::Sprint);
    assert_eq!(history[0].user_id, 3);
    assert_eq!(history[0].old_value.as_deref(), Some(sprint.id.to_string().as_str()));
    assert_eq!(history[0].new_value, None);
}

#[test]
fn test_complete_sprint_detaches_cross_project_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let home = db.create_project("Home").expect("Failed to create project");
    let away = db.create_project("Away").expect("Failed to create project");
    let sprint = db
        .create_sprint(&CreateSprint {
            project_id: home.id,
            name: "Shared".to_string(),
            ..Default::default()
        })
        .expect("Failed to create sprint");

    // A task from another project can sit on the sprint; completion must
    // still carry it off, not leave it pinned to a completed sprint.
    let visitor = db
        .create_task(&CreateTask {
            project_id: away.id,
            title: "Visitor".to_string(),
            sprint_id: Some(sprint.id),
            ..Default::default()
        })
        .expect("Failed to create task");

    db.start_sprint(sprint.id).expect("Failed to start sprint");
    let (_, report) = db
        .complete_sprint(&CompleteSprint {
            sprint_id: sprint.id,
            move_incomplete_to: None,
            user_id: 1,
        })
        .expect("Failed to complete sprint");
    assert_eq!(report.incomplete_tasks, 1);

    let moved = db.get_task(visitor.id).expect("Failed to get task").unwrap();
    assert_eq!(moved.sprint_id, None);

    let history = db.get_task_history(visitor.id).expect("Failed to get history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].field, HistoryField::Sprint);
}

#[test]
fn test_labels_with_commas_are_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Labels").expect("Failed to create project");

    let result = db.create_task(&CreateTask {
        project_id: project.id,
        title: "Tagged".to_string(),
        labels: vec!["ui,backend".to_string()],
        ..Default::default()
    });
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));

    let task = add_task(&mut db, project.id, "Plain");
    let result = db.set_labels(&SetLabels {
        task_id: task,
        labels: vec!["a,b".to_string()],
        user_id: 1,
    });
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));

    let fetched = db.get_task(task).expect("Failed to get task").unwrap();
    assert!(fetched.labels.is_empty());
}

#[test]
fn test_get_task_hydrates_labels_and_counts() {
    let (_temp_file, mut db) = create_test_db();
    let project = db.create_project("Hydrate").expect("Failed to create project");

    let parent = db
        .create_task(&CreateTask {
            project_id: project.id,
            title: "Parent".to_string(),
            labels: vec!["ui".to_string(), "api".to_string()],
            ..Default::default()
        })
        .expect("Failed to create task");
    db.create_task(&CreateTask {
        project_id: project.id,
        title: "Child".to_string(),
        parent_id: Some(parent.id),
        ..Default::default()
    })
    .expect("Failed to create subtask");

    let task = db.get_task(parent.id).expect("Failed to get task").unwrap();
    assert_eq!(task.labels, vec!["api".to_string(), "ui".to_string()]);
    assert_eq!(task.subtask_count, 1);
}
