//! End-to-end runs of the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

const RULES_TOML: &str = r#"
[[rule]]
id = "4f9f0e2e-8f3b-4d26-9b87-01b39a2f8f10"
name = "back the favorite"
market = "1x2"
action = "recommend_most_probable"
priority = 5

[[rule.conditions]]
field = "max_prob_1x2"
operator = ">="
value = 0.60
"#;

const MATCHES_JSON: &str = r#"[
  {
    "id": "fixture-1",
    "home_team": "Alaves",
    "away_team": "Betis",
    "odds": { "1x2": [1.40, 4.50, 7.00] }
  }
]"#;

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rules.toml"), RULES_TOML).unwrap();
    std::fs::write(dir.path().join("matches.json"), MATCHES_JSON).unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            r#"
[logging]
level = "warn"
format = "pretty"

[stores]
rules = "{}"
matches = "{}"
"#,
            dir.path().join("rules.toml").display(),
            dir.path().join("matches.json").display(),
        ),
    )
    .unwrap();
    dir
}

#[test]
fn help_lists_the_subcommands() {
    Command::cargo_bin("matchedge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("evaluate"))
        .stdout(predicate::str::contains("matrix"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn check_config_accepts_a_valid_file() {
    let dir = workspace();
    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["check", "config", "-c"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn check_config_rejects_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[model]\nmax_goals = 99\n").unwrap();

    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["check", "config", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_goals"));
}

#[test]
fn missing_config_file_fails_cleanly() {
    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["check", "config", "-c", "/nonexistent/config.toml"])
        .assert()
        .failure();
}

#[test]
fn rules_lists_the_configured_rules() {
    let dir = workspace();
    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["rules", "-c"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("back the favorite"))
        .stdout(predicate::str::contains("recommend_most_probable"))
        .stdout(predicate::str::contains("max_prob_1x2 >= 0.6"));
}

#[test]
fn evaluate_prints_a_recommendation_table() {
    let dir = workspace();
    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["evaluate", "-c"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Alaves - Betis"))
        .stdout(predicate::str::contains("back the favorite"));
}

#[test]
fn evaluate_json_emits_machine_readable_reports() {
    let dir = workspace();
    let output = Command::cargo_bin("matchedge")
        .unwrap()
        .args(["evaluate", "--json", "-c"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let reports: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let report = &reports.as_array().unwrap()[0];
    assert_eq!(report["match_id"], "fixture-1");
    assert_eq!(report["recommendations"][0]["market"], "1x2");
    assert_eq!(report["confidence"]["tier"], "medium");
}

#[test]
fn matrix_prints_the_scoreline_grid() {
    let dir = workspace();
    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["matrix"])
        .arg("fixture-1")
        .args(["-c"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Scoreline grid"))
        .stdout(predicate::str::contains("most likely"));
}

#[test]
fn matrix_for_an_unknown_match_fails() {
    let dir = workspace();
    Command::cargo_bin("matchedge")
        .unwrap()
        .args(["matrix", "nonexistent", "-c"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent"));
}
