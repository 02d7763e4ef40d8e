use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn lanes(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lanes").unwrap();
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("LANES_FILE")
        .env_remove("LANES_DEBUG_LOG");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn seed(dir: &TempDir, lists: &str, items: usize) -> String {
    let file = dir.path().join("board.json");
    let path = file.to_str().unwrap().to_string();
    lanes(dir)
        .args([
            "seed",
            "--lists",
            lists,
            "--items",
            &items.to_string(),
            "--output",
            &path,
        ])
        .assert()
        .success();
    path
}

fn write_trace(dir: &TempDir, samples: Value) -> String {
    let file = dir.path().join("trace.json");
    fs::write(&file, samples.to_string()).unwrap();
    file.to_str().unwrap().to_string()
}

fn sample(x: f64, y: f64, pressed: bool, timestamp_ms: u64) -> Value {
    serde_json::json!({
        "x": x,
        "y": y,
        "buttons": if pressed { "pressed" } else { "released" },
        "timestamp_ms": timestamp_ms,
    })
}

mod seed_tests {
    use super::*;

    #[test]
    fn test_seed_writes_board() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("seeded.json");

        let output = lanes(&dir)
            .args([
                "seed",
                "--lists",
                "Todo,Done",
                "--items",
                "4",
                "--output",
                file.to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["lists"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["lists"][1]["name"], "Done");
        assert_eq!(json["data"]["lists"][1]["items"], 4);

        let board: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(board["lists"][0]["items"][3]["title"], "Todo task 4");
    }

    #[test]
    fn test_seed_rejects_empty_list_name() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("seeded.json");

        lanes(&dir)
            .args(["seed", "--lists", "Todo,,Done", "--output", file.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("List names must not be empty"));
        assert!(!Path::new(&file).exists());
    }
}

mod window_tests {
    use super::*;

    #[test]
    fn test_window_reports_materialized_rows() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "Todo", 1000);

        let output = lanes(&dir)
            .args([
                file.as_str(),
                "window",
                "--list",
                "Todo",
                "--scroll",
                "500",
                "--viewport",
                "100",
                "--item-height",
                "10",
                "--buffer",
                "2",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let data = &json["data"];
        assert_eq!(data["item_count"], 1000);
        assert_eq!(data["extent"], 10000.0);
        assert_eq!(data["start"], 40);
        assert_eq!(data["end"], 70);
        let materialized = data["materialized"].as_array().unwrap();
        assert_eq!(materialized.len(), 30);
        assert_eq!(materialized[0], 40);
        assert_eq!(materialized[29], 69);
    }

    #[test]
    fn test_window_on_empty_list() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "Todo", 0);

        let output = lanes(&dir)
            .args([file.as_str(), "window", "--list", "Todo", "--viewport", "10"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["extent"], 0.0);
        assert!(json["data"]["materialized"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_window_rejects_invalid_viewport() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "Todo", 10);

        lanes(&dir)
            .args([file.as_str(), "window", "--list", "Todo", "--viewport", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid geometry"));
    }

    #[test]
    fn test_window_unknown_list() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "Todo", 10);

        lanes(&dir)
            .args([file.as_str(), "window", "--list", "Later", "--viewport", "10"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("List not found: Later"));
    }
}

mod replay_tests {
    use super::*;

    #[test]
    fn test_replay_reorders_within_list() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "A,B", 3);
        let trace = write_trace(
            &dir,
            serde_json::json!([
                sample(50.0, 75.0, true, 0),
                sample(50.0, 175.0, true, 10),
                sample(50.0, 175.0, false, 20),
            ]),
        );

        let output = lanes(&dir)
            .args([
                file.as_str(),
                "--item-height",
                "50",
                "replay",
                "--trace",
                &trace,
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let data = &json["data"];
        assert_eq!(data["samples"], 3);
        assert_eq!(data["moves"].as_array().unwrap().len(), 1);
        assert_eq!(data["moves"][0]["origin_index"], 1);
        assert_eq!(data["moves"][0]["target_index"], 2);
        assert_eq!(
            data["lists"][0]["items"],
            serde_json::json!(["A task 1", "A task 3", "A task 2"])
        );
        assert_eq!(data["events"][0]["event"], "drag_started");
    }

    #[test]
    fn test_replay_moves_across_lists() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "A,B", 3);
        let trace = write_trace(
            &dir,
            serde_json::json!([
                sample(50.0, 25.0, true, 0),
                sample(150.0, 10.0, true, 10),
                sample(150.0, 10.0, false, 20),
            ]),
        );

        let output = lanes(&dir)
            .args([
                file.as_str(),
                "--item-height",
                "50",
                "replay",
                "--trace",
                &trace,
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let data = &json["data"];
        assert_eq!(
            data["lists"][0]["items"],
            serde_json::json!(["A task 2", "A task 3"])
        );
        assert_eq!(
            data["lists"][1]["items"],
            serde_json::json!(["A task 1", "B task 1", "B task 2", "B task 3"])
        );
    }

    #[test]
    fn test_replay_release_outside_cancels() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "A", 2);
        let trace = write_trace(
            &dir,
            serde_json::json!([
                sample(50.0, 25.0, true, 0),
                sample(500.0, 25.0, true, 10),
                sample(500.0, 25.0, false, 20),
            ]),
        );

        let output = lanes(&dir)
            .args([
                file.as_str(),
                "--item-height",
                "50",
                "replay",
                "--trace",
                &trace,
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let data = &json["data"];
        assert!(data["moves"].as_array().unwrap().is_empty());
        assert_eq!(
            data["lists"][0]["items"],
            serde_json::json!(["A task 1", "A task 2"])
        );
        let last = data["events"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(last["event"], "cancelled");
    }

    #[test]
    fn test_replay_invalid_trace() {
        let dir = tempdir().unwrap();
        let file = seed(&dir, "A", 2);
        let trace = dir.path().join("trace.json");
        fs::write(&trace, "not json").unwrap();

        lanes(&dir)
            .args([file.as_str(), "replay", "--trace", trace.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid pointer trace"));
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_board_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing.json");

        let output = lanes(&dir)
            .args([file.to_str().unwrap(), "window", "--list", "A", "--viewport", "5"])
            .assert()
            .failure()
            .get_output()
            .stderr
            .clone();

        let json = parse_json_output(&output);
        assert!(!json["success"].as_bool().unwrap());
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Cannot read board file"));
    }

    #[test]
    fn test_window_requires_file() {
        let dir = tempdir().unwrap();
        lanes(&dir)
            .args(["window", "--list", "A", "--viewport", "5"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("FILE is required"));
    }

    #[test]
    fn test_completions() {
        let dir = tempdir().unwrap();
        lanes(&dir)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lanes"));
    }
}
