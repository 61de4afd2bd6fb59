use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::Path;

fn classdesk(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("classdesk").unwrap();
    cmd.env("CLASSDESK_HOME", home).env_remove("CLASSDESK_LOG");
    cmd
}

fn logged_in() -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    classdesk(temp_dir.path())
        .args(["login", "--email", "ram@example.com", "--password", "secret1"])
        .assert()
        .success();
    temp_dir
}

#[test]
fn list_requires_login() {
    let temp_dir = tempfile::tempdir().unwrap();

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "You must be logged in to manage students",
        ))
        .stdout(predicate::str::contains("classdesk login"))
        .stdout(predicate::str::contains("Jeeva").not());

    // refused before the directory was touched, so nothing was seeded
    assert!(!temp_dir.path().join("storage.json").exists());
}

#[test]
fn first_list_shows_default_students() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID"))
        .stdout(predicate::str::contains("Jeeva Kumar"))
        .stdout(predicate::str::contains("ram@example.com"))
        .stdout(predicate::str::contains("Priya Sharma"))
        .stdout(predicate::str::contains("arun.das@example.com"));

    let storage = std::fs::read_to_string(temp_dir.path().join("storage.json")).unwrap();
    assert!(storage.contains("classdesk.students"));
}

#[test]
fn no_command_lists_students() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Jeeva Kumar"));
}

#[test]
fn add_assigns_next_id_and_search_finds_it() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["add", "Meena Iyer", "meena@example.com", "95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student added (005): Meena Iyer"));

    classdesk(temp_dir.path())
        .args(["search", "MEENA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("005"))
        .stdout(predicate::str::contains("meena@example.com"))
        .stdout(predicate::str::contains("Jeeva").not());
}

#[test]
fn search_with_no_match_says_so() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["list", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No students match \"zzz\"."))
        .stdout(predicate::str::contains("NAME").not());
}

#[test]
fn add_reports_every_invalid_field() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["add", "  ", "", "ninety"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Name is required"))
        .stdout(predicate::str::contains("Email is required"))
        .stdout(predicate::str::contains("Attendance must be a whole number"));

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("005").not());
}

#[test]
fn attendance_is_not_clamped() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["add", "Odd One", "odd@example.com", "-5"])
        .assert()
        .success();

    classdesk(temp_dir.path())
        .args(["search", "odd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-5%"));
}

#[test]
fn edit_changes_only_that_student() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["edit", "002", "Ramesh", "ramesh@example.com", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student updated (002): Ramesh"));

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ramesh@example.com"))
        .stdout(predicate::str::contains("Jeeva Kumar"));
}

#[test]
fn edit_unknown_id_fails() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["edit", "999", "Nobody", "nobody@example.com", "50"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No student with id 999"));
}

#[test]
fn delete_with_yes_skips_prompt() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["delete", "001", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student deleted (001): Jeeva Kumar"))
        .stdout(predicate::str::contains("[Y] To delete").not());

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jeeva").not());
}

#[test]
fn delete_prompt_can_be_refused() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["rm", "003"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Y] To delete:"))
        .stdout(predicate::str::contains("Operation cancelled."));

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Priya Sharma"));
}

#[test]
fn delete_prompt_accepts_capital_y() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["delete", "003"])
        .write_stdin("Y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Student deleted (003): Priya Sharma"));
}

#[test]
fn delete_unknown_id_never_prompts() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["delete", "999"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No student with id 999"))
        .stdout(predicate::str::contains("[Y] To delete").not());
}

#[test]
fn confirm_delete_can_be_turned_off() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["config", "confirm-delete", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirm-delete set to false"));

    classdesk(temp_dir.path())
        .args(["delete", "004"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student deleted (004): Arun Das"));
}

#[test]
fn corrupt_student_list_is_replaced_with_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("storage.json"),
        r#"{
  "classdesk.students": "[{\"id\": \"001\"",
  "classdesk.user": "{\"email\":\"ram@example.com\",\"name\":\"ram\"}"
}"#,
    )
    .unwrap();

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored student list was unreadable"))
        .stdout(predicate::str::contains("Arun Das"));

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("unreadable").not());
}

#[test]
fn unreadable_storage_file_is_set_aside() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = temp_dir.path().join("storage.json");
    std::fs::write(&storage, "{truncated").unwrap();

    classdesk(temp_dir.path())
        .args(["help", "add"])
        .assert()
        .success();
    classdesk(temp_dir.path())
        .args(["strength", "abcdefgh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password strength: weak"));
    // neither command opened the store
    assert_eq!(std::fs::read_to_string(&storage).unwrap(), "{truncated");

    classdesk(temp_dir.path())
        .args(["login", "--email", "ram@example.com", "--password", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, ram"))
        .stderr(predicate::str::contains("storage file is not valid JSON"));

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("storage.json.bak")).unwrap(),
        "{truncated"
    );

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jeeva Kumar"));
}

#[test]
fn compact_layout_persists() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .arg("compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compact view on"));

    classdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("001 Jeeva Kumar 92%"))
        .stdout(predicate::str::contains("EMAIL").not());
}

#[test]
fn verbose_logs_to_stderr_only() {
    let temp_dir = logged_in();

    classdesk(temp_dir.path())
        .args(["list", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dispatch"))
        .stdout(predicate::str::contains("dispatch").not());
}
