use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn cadence_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_create_project_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "project",
            "create",
            "Test Project",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project with ID: 1"))
        .stdout(predicate::str::contains("Test Project"));
}

#[test]
fn test_cli_project_statuses_show_seeded_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Workflow"])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "statuses", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do"))
        .stdout(predicate::str::contains("[default]"))
        .stdout(predicate::str::contains("Done"))
        .stdout(predicate::str::contains("[done]"));
}

#[test]
fn test_cli_task_lands_on_board() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Board"])
        .assert()
        .success();
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "create",
            "1",
            "Write the parser",
            "--points",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1"));

    cadence_cmd()
        .args(["--database-file", db_arg, "board", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## To Do (1)"))
        .stdout(predicate::str::contains("Write the parser"));
}

#[test]
fn test_cli_move_task_between_columns() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Moves"])
        .assert()
        .success();
    cadence_cmd()
        .args(["--database-file", db_arg, "task", "create", "1", "Roaming"])
        .assert()
        .success();

    // Status 2 is the seeded "In Progress" column.
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "move",
            "1",
            "--status",
            "2",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "board", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## In Progress (1)"));

    cadence_cmd()
        .args(["--database-file", db_arg, "task", "history", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do -> In Progress"));
}

#[test]
fn test_cli_move_rejects_sprint_and_backlog_together() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "task",
            "move",
            "1",
            "--sprint",
            "2",
            "--backlog",
        ])
        .assert()
        .failure();
}

#[test]
fn test_cli_show_missing_task_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "task",
            "show",
            "42",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task 42 not found"));
}

#[test]
fn test_cli_sprint_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Lifecycle"])
        .assert()
        .success();
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "sprint",
            "create",
            "1",
            "Sprint 1",
            "--start",
            "2026-03-02",
            "--end",
            "2026-03-13",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sprint with ID: 1"))
        .stdout(predicate::str::contains("planning"));

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "create",
            "1",
            "Estimated",
            "--sprint",
            "1",
            "--points",
            "5",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "sprint", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active"))
        .stdout(predicate::str::contains("Planned points: 5"));

    // Starting it again conflicts.
    cadence_cmd()
        .args(["--database-file", db_arg, "sprint", "start", "1"])
        .assert()
        .failure();

    cadence_cmd()
        .args(["--database-file", db_arg, "sprint", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed sprint 'Sprint 1'"))
        .stdout(predicate::str::contains("Returned to backlog: 1 tasks"));
}

#[test]
fn test_cli_burndown_json_output() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Charts"])
        .assert()
        .success();
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "sprint",
            "create",
            "1",
            "Charted",
            "--start",
            "2026-03-02",
            "--end",
            "2026-03-04",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "--json", "sprint", "burndown", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\""))
        .stdout(predicate::str::contains("\"ideal\""))
        .stdout(predicate::str::contains("2026-03-02"));
}

#[test]
fn test_cli_board_json_output() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Json"])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "--json", "board", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"columns\""))
        .stdout(predicate::str::contains("\"isDefault\": true"));
}

#[test]
fn test_cli_backlog_grouped_by_epic() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Grouped"])
        .assert()
        .success();
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "epic",
            "create",
            "1",
            "CAD-1",
            "Onboarding",
        ])
        .assert()
        .success();
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "create",
            "1",
            "Signup form",
            "--epic",
            "1",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "backlog", "1", "--by-epic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## CAD-1 Onboarding"))
        .stdout(predicate::str::contains("Signup form"))
        .stdout(predicate::str::contains("## Unassigned"));
}

#[test]
fn test_cli_velocity_empty_project() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "project", "create", "Fresh"])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "sprint", "velocity", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Velocity: 0.0"));
}
