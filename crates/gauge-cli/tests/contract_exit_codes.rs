use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const PASSING_SCRIPT: &str = r#"
version: 1
events:
  - main: { item: 0, answer: "yes" }
  - advance
  - main: { item: 1, answer: "no" }
  - advance
  - main: { item: 2, answer: "no" }
  - advance
  - main: { item: 3, answer: "yes" }
  - advance
  - main: { item: 4, answer: "no" }
  - advance
  - main: { item: 5, answer: "no" }
  - advance
  - main: { item: 6, answer: "yes" }
"#;

fn gauge() -> Command {
    let mut cmd = Command::cargo_bin("gauge").unwrap();
    cmd.env_remove("GAUGE_CATALOG").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_validate_builtin_catalog() {
    gauge()
        .args(["validate", "--catalog", "builtin:home-safety"])
        .assert()
        .success()
        .stdout(predicate::str::contains("home-safety"))
        .stdout(predicate::str::contains("sha256:"));
}

#[test]
fn test_validate_json_reports_item_count() {
    let out = gauge()
        .args(["validate", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["valid"], true);
    assert_eq!(v["items"], 7);
}

#[test]
fn test_invalid_catalog_exits_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        r#"
name: bad
version: "1"
items:
  - id: a
    title: A?
    on_yes: { pass_condition: all-yes }
    on_no: { pass_condition: pass-direct }
"#,
    )
    .unwrap();

    gauge()
        .args(["validate", "--catalog"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("all-yes"));
}

#[test]
fn test_unknown_builtin_suggests_name() {
    gauge()
        .args(["show", "--catalog", "builtin:home-safty"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Did you mean 'home-safety'?"));
}

#[test]
fn test_replay_all_passing_exits_zero() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("answers.yaml");
    fs::write(&script, PASSING_SCRIPT).unwrap();

    gauge()
        .current_dir(dir.path())
        .args(["replay", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 7 passed, 0 failed, 0 pending"));
}

#[test]
fn test_replay_incomplete_exits_one_and_exports_json() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("answers.yaml");
    let out = dir.path().join("report.json");
    fs::write(
        &script,
        "version: 1\nevents:\n  - main: { item: 0, answer: \"no\" }\n",
    )
    .unwrap();

    gauge()
        .current_dir(dir.path())
        .args(["replay", "--format", "json", "--script"])
        .arg(&script)
        .arg("--output")
        .arg(&out)
        .assert()
        .code(1);

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["catalog"], "home-safety");
    assert_eq!(v["complete"], false);
    assert_eq!(v["summary"]["pending"], 7);
    assert!(v["catalog_digest"].as_str().unwrap().starts_with("sha256:"));
    assert_eq!(v["results"][0]["main_answer"], "no");
}

#[test]
fn test_replay_sub_answers_across_a_chained_layer() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("answers.yaml");
    let out = dir.path().join("report.json");
    fs::write(
        &script,
        r#"
version: 1
events:
  - main: { item: 0, answer: "yes" }
  - advance
  - main: { item: 1, answer: "yes" }
  - sub: { item: 1, index: 0, answer: "yes" }
  - sub: { item: 1, index: 1, answer: "no" }
  - sub: { item: 1, index: 1, answer: "no" }
  - sub: { item: 1, depth: 1, index: 0, answer: "yes" }
  - sub: { item: 1, depth: 1, index: 1, answer: "yes" }
"#,
    )
    .unwrap();

    gauge()
        .current_dir(dir.path())
        .args(["replay", "--format", "json", "--script"])
        .arg(&script)
        .arg("--output")
        .arg(&out)
        .assert()
        .code(1);

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["results"][1]["verdict"], "pass");
    assert_eq!(
        v["results"][1]["trail"],
        serde_json::json!([["yes", "no"], ["yes", "yes"]])
    );
}

#[test]
fn test_rejected_script_exits_three() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("answers.yaml");
    fs::write(
        &script,
        "version: 1\nevents:\n  - main: { item: 0, answer: \"yes\" }\n  - navigate: { target: 4 }\n",
    )
    .unwrap();

    gauge()
        .current_dir(dir.path())
        .args(["replay", "--format", "csv", "--script"])
        .arg(&script)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("step 2"))
        .stdout(predicate::str::contains("0,smoke-alarms,"));
}

#[test]
fn test_config_file_sets_catalog_and_format() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("mini.yaml"),
        r#"
name: mini
version: "1"
items:
  - id: only
    title: Only?
    on_yes: { pass_condition: pass-direct }
    on_no: { pass_condition: fail-direct }
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("gauge.yaml"),
        "version: 1\ncatalog: mini.yaml\noutput:\n  format: csv\n",
    )
    .unwrap();
    let script = dir.path().join("answers.yaml");
    fs::write(
        &script,
        "version: 1\nevents:\n  - main: { item: 0, answer: \"no\" }\n",
    )
    .unwrap();

    gauge()
        .current_dir(dir.path())
        .args(["replay", "--script"])
        .arg(&script)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0,only,Only?,no,,fail"));
}

#[test]
fn test_version() {
    gauge()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_writes_config_once() {
    let dir = tempdir().unwrap();
    gauge().current_dir(dir.path()).arg("init").assert().success();
    let written = fs::read_to_string(dir.path().join("gauge.yaml")).unwrap();
    assert!(written.contains("builtin:home-safety"));

    gauge().current_dir(dir.path()).arg("init").assert().code(2);
    gauge()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
