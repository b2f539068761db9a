//! Integration tests for the wlog binary.
//!
//! These tests drive the interactive menu through stdin and verify:
//! - Workout entry and persistence
//! - Input validation and re-prompting
//! - Report output over the stored history

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "date,exercise_name,kind,sets,reps,weight,duration_minutes";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from any real user config
fn cli(temp_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wlog"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.join("config"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn store_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("workouts.csv")
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal workout log with progress reports",
        ));
}

#[test]
fn test_startup_creates_store_with_header() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));

    assert_eq!(fs::read_to_string(&store).unwrap(), format!("{}\n", HEADER));
}

#[test]
fn test_data_dir_flag() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .write_stdin("3\n")
        .assert()
        .success();

    assert!(data_dir.join("workouts.csv").exists());
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--store")
        .arg(store_path(&temp_dir))
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_invalid_menu_choice() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--store")
        .arg(store_path(&temp_dir))
        .write_stdin("9\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice."));
}

#[test]
fn test_add_resistance_workout() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin("1\n2024-03-01\nBench Press\nn\n3\n10\n50\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved workout"));

    let content = fs::read_to_string(&store).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec![HEADER, "2024-03-01,Bench Press,resistance,3,10,50,"]);
}

#[test]
fn test_add_cardio_defaults_to_today() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin("1\n\nRun\ny\n30\n3\n")
        .assert()
        .success();

    let content = fs::read_to_string(&store).unwrap();
    assert!(content.contains(&format!("{},Run,cardio,,,,30", today)));
}

#[test]
fn test_invalid_input_is_reprompted() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin("1\n03/01/2024\n2024-03-01\n\nSquat\nn\nthree\n0\n5\n5\n-20\n100\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("date must be YYYY-MM-DD"))
        .stdout(predicate::str::contains("exercise name is required"))
        .stdout(predicate::str::contains("sets must be a whole number"))
        .stdout(predicate::str::contains("sets must be at least 1"))
        .stdout(predicate::str::contains("weight must not be negative"))
        .stdout(predicate::str::contains("Saved workout"));

    let content = fs::read_to_string(&store).unwrap();
    assert!(content.contains("2024-03-01,Squat,resistance,5,5,100,"));
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_report_on_empty_log() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--store")
        .arg(store_path(&temp_dir))
        .write_stdin("2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet."));
}

#[test]
fn test_report_views() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);
    fs::write(
        &store,
        format!(
            "{}\n\
             2024-03-01,Bench Press,resistance,3,10,100,\n\
             2024-03-04,Bench Press,resistance,1,1,120,\n\
             2024-03-02,Run,cardio,,,,30\n\
             2024-03-05,Run,cardio,,,,45\n",
            HEADER
        ),
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin("2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout frequency per exercise:"))
        .stdout(predicate::str::contains("  Bench Press  2"))
        .stdout(predicate::str::contains("  Run          2"))
        .stdout(predicate::str::contains("  Bench Press  3120"))
        .stdout(predicate::str::contains("  Bench Press  120 (2024-03-04)"))
        .stdout(predicate::str::contains("Total cardio duration (minutes): 75"))
        .stdout(predicate::str::contains("Workout Frequency per Exercise"))
        .stdout(predicate::str::contains("Total Volume per Exercise"));
}

#[test]
fn test_report_skips_malformed_rows() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);
    fs::write(
        &store,
        format!(
            "{}\n\
             2024-03-01,Deadlift,resistance,1,5,140,\n\
             2024-03-02,Deadlift,resistance,1,5,heavy,\n",
            HEADER
        ),
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin("2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 1 malformed row(s)"))
        .stdout(predicate::str::contains("line 3"))
        .stdout(predicate::str::contains("  Deadlift  1"));
}

#[test]
fn test_added_workouts_appear_in_report() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin(
            "1\n2024-03-01\nSquat\nn\n3\n10\n50\n\
             1\n2024-03-01\nSquat\nn\n3\n10\n50\n\
             2\n3\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("  Squat  2"))
        .stdout(predicate::str::contains("  Squat  3000"));
}

#[test]
fn test_non_utf8_input_is_reprompted() {
    let temp_dir = setup_test_dir();
    let store = store_path(&temp_dir);

    cli(temp_dir.path())
        .arg("--store")
        .arg(&store)
        .write_stdin(b"1\n2024-03-01\nSqu\xffat\nSquat\nn\n3\n10\n50\n3\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("input is not valid UTF-8"))
        .stdout(predicate::str::contains("Saved workout"));

    let content = fs::read_to_string(&store).unwrap();
    assert!(content.contains("2024-03-01,Squat,resistance,3,10,50,"));
}

#[test]
fn test_unusable_store_fails_at_startup() {
    let temp_dir = setup_test_dir();

    // A directory cannot hold the workout log
    cli(temp_dir.path())
        .arg("--store")
        .arg(temp_dir.path())
        .write_stdin("3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not open workout log"));
}
