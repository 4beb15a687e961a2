//! End-to-end CLI smoke tests running the real binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tbx(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("--data-dir").arg(data_dir.path()).arg("--yes");
    cmd
}

#[test]
fn help_lists_all_command_groups() {
    Command::cargo_bin("tbx")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("bookmark"))
        .stdout(predicate::str::contains("note"))
        .stdout(predicate::str::contains("notepad"))
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn task_lifecycle() {
    let dir = TempDir::new().unwrap();

    tbx(&dir)
        .args(["task", "add", "write the report", "--deadline", "2030-01-01"])
        .args(["--difficulty", "3", "--implementation", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task created"))
        .stdout(predicate::str::contains("write the report"));

    tbx(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 task(s)"))
        .stdout(predicate::str::contains("write the report"));

    // no such id: user error, exit 2
    tbx(&dir)
        .args(["task", "toggle", "12345"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("12345"));
}

#[test]
fn task_ratings_are_bounded() {
    let dir = TempDir::new().unwrap();
    tbx(&dir)
        .args(["task", "add", "t", "--deadline", "2030-01-01"])
        .args(["--difficulty", "9"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("difficulty"));
}

#[test]
fn bookmark_add_normalizes_the_url() {
    let dir = TempDir::new().unwrap();
    tbx(&dir)
        .args(["bookmark", "add", "docs", "docs.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://docs.example.com"));
}

#[test]
fn note_lifecycle() {
    let dir = TempDir::new().unwrap();

    tbx(&dir)
        .args(["note", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id"));

    tbx(&dir)
        .args(["note", "edit", "1", "--content", "remember the milk"])
        .assert()
        .success();

    // title derived from the content
    tbx(&dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remember the milk"));

    tbx(&dir)
        .args(["note", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remember the milk"));

    tbx(&dir)
        .args(["note", "list", "--search", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no notes match"));
}

#[test]
fn note_edit_appends_lines_from_stdin() {
    let dir = TempDir::new().unwrap();
    tbx(&dir).args(["note", "new"]).assert().success();

    tbx(&dir)
        .args(["note", "edit", "1"])
        .write_stdin("first line\nsecond line\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("lines appended: 2"));

    tbx(&dir)
        .args(["note", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first line"))
        .stdout(predicate::str::contains("second line"));
}

#[test]
fn configured_default_sort_applies_to_a_first_run() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tbx.toml"), "default_sort = \"priority\"\n").unwrap();

    tbx(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sorted by priority"));
}

#[test]
fn layout_set_works_before_any_other_data_exists() {
    let dir = TempDir::new().unwrap();
    tbx(&dir)
        .args([
            "layout", "set", "notebook-area", "bookmarks-area", "tasks-area",
            "ocr-area", "notepad-area", "translator-area",
        ])
        .assert()
        .success();

    tbx(&dir)
        .args(["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. notebook-area"));
}

#[test]
fn layout_rejects_incomplete_orders() {
    let dir = TempDir::new().unwrap();
    tbx(&dir)
        .args(["layout", "set", "tasks-area", "notebook-area"])
        .assert()
        .failure()
        .code(2);

    tbx(&dir)
        .args(["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tasks-area"));
}

#[test]
fn export_then_import_round_trip() {
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("backup.json");

    tbx(&dir)
        .args(["task", "add", "t", "--deadline", "2030-01-01"])
        .assert()
        .success();

    tbx(&dir)
        .arg("export")
        .arg("--output")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("backup written"));

    tbx(&dir).arg("reset").assert().success();

    tbx(&dir)
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("backup applied"))
        .stdout(predicate::str::contains("tasks: 1"));
}

#[test]
fn import_of_garbage_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("junk.json");
    std::fs::write(&file, "not json at all").unwrap();

    tbx(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn usage_reports_counts() {
    let dir = TempDir::new().unwrap();
    tbx(&dir)
        .args(["bookmark", "add", "b", "example.com"])
        .assert()
        .success();

    tbx(&dir)
        .arg("usage")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookmarks: 1"));
}

#[test]
fn json_mode_emits_the_envelope() {
    let dir = TempDir::new().unwrap();
    let output = tbx(&dir)
        .args(["--json", "task", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["schema_version"], "tbx.v1");
    assert_eq!(value["command"], "task list");
    assert_eq!(value["status"], "success");
    assert!(value["data"]["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn json_mode_errors_carry_kind_and_code() {
    let dir = TempDir::new().unwrap();
    let output = tbx(&dir)
        .args(["--json", "note", "show", "7"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], 2);
    assert_eq!(value["error"]["kind"], "user_error");
}

#[test]
fn quiet_mode_prints_nothing_on_success() {
    let dir = TempDir::new().unwrap();
    tbx(&dir)
        .args(["--quiet", "note", "new"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
