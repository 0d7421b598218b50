use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_storm-genesis"))
        .args(args)
        .output()
        .expect("failed to launch storm-genesis")
}

fn records(output: &Output) -> Vec<Value> {
    String::from_utf8(output.stdout.clone())
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
        .collect()
}

#[test]
fn emits_one_record_per_basin_year() {
    let output = run(&["--seed", "7", "--years", "3", "--basin", "NA", "--basin", "WP"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let records = records(&output);
    assert_eq!(records.len(), 6);
    for record in &records {
        let storms = record["storm_count"].as_u64().expect("storm count") as usize;
        for column in ["months", "days", "hours"] {
            assert_eq!(record[column].as_array().expect(column).len(), storms);
        }
    }
    assert_eq!(records[0]["basin"], "NA");
    assert_eq!(records[0]["basin_index"], 1);
    assert_eq!(records[1]["basin"], "WP");
    assert_eq!(records[5]["year"], 2);
}

#[test]
fn seeded_runs_are_reproducible() {
    let args = ["--seed", "2024", "--years", "2", "--direct"];
    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(records(&first).len(), 12, "every basin is sampled by default");
}

#[test]
fn unknown_basin_is_rejected() {
    let output = run(&["--basin", "XX"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("XX"), "stderr: {stderr}");
}

#[test]
fn missing_data_directory_fails() {
    let output = run(&["--data-dir", "/nonexistent/storm-genesis-tables"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load genesis tables"), "stderr: {stderr}");
}
