use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// `emi` pointed at an isolated data directory
fn emi(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("emi").unwrap();
    cmd.env("EMI_PLANNER_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ===========================================================================
// validate / simulate / summary
// ===========================================================================

#[test]
fn test_validate_ok() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(emi(&dir).args(["validate", "--input", &fixture("plan.json")]));
    assert_eq!(v["valid"], true);
    assert!(v["message"].is_null());
}

#[test]
fn test_validate_reports_first_violation_only() {
    let dir = TempDir::new().unwrap();
    // Split and tenure are both wrong; the split is reported
    let v = json_stdout(emi(&dir).args(["validate", "--input", &fixture("invalid_split.json")]));
    assert_eq!(v["valid"], false);
    assert_eq!(v["kind"], "percentage-imbalance");
    assert_eq!(
        v["message"],
        "Bank and own-funds percentages must add up to 100"
    );
}

#[test]
fn test_validate_minimal_prints_message() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["validate", "--output", "minimal", "--input", &fixture("invalid_split.json")])
        .assert()
        .success()
        .stdout("Bank and own-funds percentages must add up to 100\n");
}

#[test]
fn test_simulate_envelope() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(emi(&dir).args(["simulate", "--input", &fixture("plan.json")]));
    assert_eq!(v["result"]["yearlyAvg"].as_array().unwrap().len(), 7);
    assert_eq!(v["result"]["monthlyAvg"].as_array().unwrap().len(), 84);
    assert_eq!(v["assumptions"]["months_simulated"], 84);
    assert!(v["warnings"][0].as_str().unwrap().contains("GST"));
}

#[test]
fn test_simulate_single_schedule() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(emi(&dir).args([
        "simulate",
        "--schedule",
        "yearly",
        "--input",
        &fixture("plan.json"),
    ]));
    let rows = v["result"].as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["period"], 1);
}

#[test]
fn test_simulate_rejects_invalid_plan() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["simulate", "--input", &fixture("invalid_split.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plan"));
}

#[test]
fn test_summary_from_yaml() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(emi(&dir).args(["summary", "--input", &fixture("bank_only.yaml")]));
    let result = &v["result"];
    assert_eq!(result["loanLabel"], "Solar rooftop & inverter");
    assert_eq!(result["excludeOwnColumns"], true);
    assert_eq!(result["profitLoss"].as_array().unwrap().len(), 2);
}

#[test]
fn test_plan_from_stdin() {
    let dir = TempDir::new().unwrap();
    let plan = std::fs::read_to_string(fixture("plan.json")).unwrap();
    let v = json_stdout(emi(&dir).arg("validate").write_stdin(plan));
    assert_eq!(v["valid"], true);
}

#[test]
fn test_missing_plan_is_an_error() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No plan given"));
}

#[test]
fn test_table_output() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["summary", "--output", "table", "--input", &fixture("plan.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("bankLevelEmi"))
        .stdout(predicate::str::contains("profitLoss:"))
        .stdout(predicate::str::contains("Warnings:"));
}

// ===========================================================================
// edit / new
// ===========================================================================

#[test]
fn test_edit_applies_in_order() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(emi(&dir).args([
        "edit",
        "--input",
        &fixture("plan.json"),
        "--edits",
        &fixture("edits.json"),
    ]));
    assert_eq!(v["loanTenure"], 5);
    assert!(v.get("gstPercentage").is_none());
    assert_eq!(v["expenses"].as_array().unwrap().len(), 3);
    assert_eq!(v["expenses"][2]["name"], "Marketing");
}

#[test]
fn test_new_template_fails_validation_on_loan_type() {
    let dir = TempDir::new().unwrap();
    let template = emi(&dir).arg("new").output().unwrap().stdout;
    let v = json_stdout(emi(&dir).arg("validate").write_stdin(template));
    assert_eq!(v["valid"], false);
    assert_eq!(v["kind"], "selection-missing");
}

// ===========================================================================
// export
// ===========================================================================

#[test]
fn test_export_latex_to_stdout() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["export", "--input", &fixture("bank_only.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r"\documentclass"))
        .stdout(predicate::str::contains(r"Solar rooftop \& inverter"))
        .stdout(predicate::str::contains("Own Repayment").not())
        .stdout(predicate::str::contains(r"\end{document}"));
}

#[test]
fn test_export_csv_yearly() {
    let dir = TempDir::new().unwrap();
    let output = emi(&dir)
        .args(["export", "--format", "csv", "--input", &fixture("bank_only.yaml")])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Year,Revenue,Expenses,Loan Amount,Loan Repayment,Loan Interest,P/L"
    );
    // 60000 principal + 11100 interest; P/L = 114000 - (71100 + 11100 / 2 + 8400)
    assert_eq!(lines[1], "1,114000,8400,120000,71100,11100,28950");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.tex");
    let v = json_stdout(emi(&dir).args([
        "export",
        "--monthly",
        "--input",
        &fixture("plan.json"),
        "--out",
        out.to_str().unwrap(),
    ]));
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(v["bytes"], written.len());
    assert!(written.contains("Monthly Schedule"));
}

#[test]
fn test_export_refuses_invalid_plan() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["export", "--input", &fixture("invalid_split.json")])
        .assert()
        .failure();
}

// ===========================================================================
// plans store
// ===========================================================================

#[test]
fn test_plans_round_trip_through_store() {
    let dir = TempDir::new().unwrap();

    let saved = json_stdout(emi(&dir).args(["plans", "save", "--input", &fixture("plan.json")]));
    let id = saved["id"].as_str().unwrap().to_string();
    assert!(id.ends_with('Z'));

    let listed = json_stdout(emi(&dir).args(["plans", "list"]));
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["loanType"], "term");

    // Saved plans feed any plan-consuming command
    let v = json_stdout(emi(&dir).args(["validate", "--saved", &id]));
    assert_eq!(v["valid"], true);

    json_stdout(emi(&dir).args(["plans", "delete", &id]));
    let listed = json_stdout(emi(&dir).args(["plans", "list"]));
    assert!(listed.as_array().unwrap().is_empty());
}

#[test]
fn test_plans_save_refuses_invalid_plan() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["plans", "save", "--input", &fixture("invalid_split.json")])
        .assert()
        .failure();
    assert!(!dir.path().join("saved_plans.json").exists());
}

#[test]
fn test_plans_load_unknown_id() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .args(["plans", "load", "2020-01-01T00:00:00.000Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Saved plan not found"));
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();
    json_stdout(emi(&env_dir).args([
        "plans",
        "save",
        "--data-dir",
        flag_dir.path().to_str().unwrap(),
        "--input",
        &fixture("plan.json"),
    ]));
    assert!(flag_dir.path().join("saved_plans.json").exists());
    assert!(!env_dir.path().join("saved_plans.json").exists());
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    emi(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("emi "));
}
