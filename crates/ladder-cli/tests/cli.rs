//! End-to-end tests of the `ladder` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const POSITIONS: &str = "\
position_id,security_id,security_name,fund_code,asset_type,closing_date,maturity_date,coupon_rate,coupon_frequency,redemption_value,position_quantity
SCENARIO,BBG000SCEN,SCEN 4 12/31/27,F100,Corporate Bonds,2024-12-31,2027-12-31,4.0,2,100,1000000
";

const LIABILITIES: &str = "\
as_of_date,group_name,period,series,value
2024-12-31,Par,1,Guaranteed Liabilities,-100000
2024-12-31,Par,5,Premium Cashflows,5000
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn ladder() -> Command {
    let mut cmd = Command::cargo_bin("ladder").unwrap();
    cmd.env_remove("LADDER_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn positions(dir: &TempDir) -> PathBuf {
    write(dir, "positions.csv", POSITIONS)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_schedule_csv() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);

    ladder()
        .args(["-f", "csv", "schedule", "-p", arg(&positions)])
        .assert()
        .success()
        .stdout(predicate::str::contains("position_id,date,kind"))
        .stdout(predicate::str::contains("SCENARIO,2025-06-30,coupon"))
        .stdout(predicate::str::contains("1020000.00"));
}

#[test]
fn test_buckets_json_by_year() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);

    let output = ladder()
        .args(["-f", "json", "buckets", "-p", arg(&positions), "--totals"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["period"], 1);
    assert_eq!(rows[0]["value"], "40000.00");
    assert_eq!(rows[3]["value"], "1020000.00");
}

#[test]
fn test_buckets_month_drill_down() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);

    ladder()
        .args([
            "-f",
            "csv",
            "buckets",
            "-p",
            arg(&positions),
            "--period",
            "month",
            "--securities",
            "--select",
            "36",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("36,SCENARIO"))
        .stdout(predicate::str::contains("2025-06-30").not());
}

#[test]
fn test_ladder_with_liabilities() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);
    let liabilities = write(&dir, "liabilities.csv", LIABILITIES);

    ladder()
        .args([
            "-f",
            "csv",
            "ladder",
            "-p",
            arg(&positions),
            "-r",
            "2024-12-31",
            "--liabilities",
            arg(&liabilities),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Period,Asset Cashflows,Guaranteed Liabilities,Premium Cashflows,Net,Cumulative",
        ))
        .stdout(predicate::str::contains("1,40000.00,-100000.00,0.00,-60000.00,-60000.00"))
        .stdout(predicate::str::contains("5,0.00,0.00,5000.00,5000.00,1045000.00"));
}

#[test]
fn test_ladder_fills_empty_periods() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);
    let liabilities = write(
        &dir,
        "liabilities.csv",
        "as_of_date,group_name,period,series,value\n2024-12-31,Par,7,Guaranteed Liabilities,-1000\n",
    );

    ladder()
        .args([
            "-f",
            "csv",
            "ladder",
            "-p",
            arg(&positions),
            "-r",
            "2024-12-31",
            "--liabilities",
            arg(&liabilities),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("5,0.00,0.00,0.00,1140000.00"))
        .stdout(predicate::str::contains("6,0.00,0.00,0.00,1140000.00"))
        .stdout(predicate::str::contains("7,0.00,-1000.00,-1000.00,1139000.00"));
}

#[test]
fn test_ladder_json_in_thousands() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);

    let output = ladder()
        .args(["-f", "json", "ladder", "-p", arg(&positions), "--unit", "thousands"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let ladder: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ladder["series_names"][0], "Asset Cashflows");
    assert_eq!(ladder["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn test_matrix_to_file() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);
    let out = dir.path().join("matrix.csv");

    ladder()
        .args(["matrix", "-p", arg(&positions), "--output", arg(&out)])
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    let header = text.lines().next().unwrap();
    assert!(header.starts_with("position_id,fund_code"));
    assert!(header.contains(",2024-12,"));
    assert!(header.ends_with(",2027-12"));
    assert!(text.contains("1020000.00"));
}

#[test]
fn test_config_file_sets_month_axis() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);
    let config = write(&dir, "ladder.toml", "bucket_mode = \"month\"\n");

    ladder()
        .args(["-f", "csv", "-c", arg(&config), "buckets", "-p", arg(&positions)])
        .assert()
        .success()
        .stdout(predicate::str::contains("36,"))
        .stdout(predicate::str::contains("1020000.00"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_invalid_reference_date() {
    let dir = TempDir::new().unwrap();
    let positions = positions(&dir);

    ladder()
        .args(["buckets", "-p", arg(&positions), "-r", "31/12/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_missing_positions_file() {
    ladder()
        .args(["schedule", "-p", "/nonexistent/positions.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_empty_positions_file() {
    let dir = TempDir::new().unwrap();
    let empty = write(
        &dir,
        "empty.csv",
        "position_id,closing_date,maturity_date\n",
    );

    ladder()
        .args(["schedule", "-p", arg(&empty)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No positions found"));
}
