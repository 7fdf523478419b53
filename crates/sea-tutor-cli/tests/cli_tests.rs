//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command running inside `dir` with no user-level config visible.
fn sea_tutor(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sea-tutor").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("SEA_TUTOR_PAPER_SHAPE")
        .env_remove("SEA_TUTOR_ATTEMPT_LOG")
        .env_remove("SEA_TUTOR_SEED")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn skills_lists_catalog() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .arg("skills")
        .assert()
        .success()
        .stdout(predicate::str::contains("std5_triangle_third_angle"))
        .stdout(predicate::str::contains("core_addition"))
        .stdout(predicate::str::contains("14 skills"));
}

#[test]
fn generate_prints_question_json() {
    let dir = TempDir::new().unwrap();
    let output = sea_tutor(&dir)
        .args(["generate", "--skill", "std4_simplify_fractions", "--seed", "3", "--count", "2"])
        .args(["--section", "II", "--marks", "2", "--difficulty", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let questions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 2);
    for q in questions {
        assert_eq!(q["skill_id"], "std4_simplify_fractions");
        assert_eq!(q["section"], "II");
        assert_eq!(q["marks"], 2);
        assert_eq!(q["difficulty"], 3);
        assert_eq!(q["correct_answer"]["type"], "fraction");
    }
}

#[test]
fn generate_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let output = sea_tutor(&dir)
            .args(["generate", "--skill", "core_add_sub", "--seed", "99"])
            .output()
            .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        v[0]["prompt_text"].as_str().unwrap().to_string()
    };
    assert_eq!(run(), run());
}

#[test]
fn generate_unknown_skill_falls_back() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["generate", "--skill", "std9_calculus", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"skill_id\": \"core_addition\""))
        .stderr(predicate::str::contains("Unknown skill"));
}

#[test]
fn check_accepts_equivalent_fraction() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["check", "--answer", r#"{"type":"fraction","numerator":1,"denominator":2}"#])
        .args(["--input", "2/4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_correct\":true"))
        .stdout(predicate::str::contains("Correct!"));
}

#[test]
fn check_gives_guidance_for_bad_time() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["check", "--answer", r#"{"type":"time_hhmm","value":"9:05"}"#])
        .args(["--input", "nine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_correct\":false"))
        .stdout(predicate::str::contains("Enter time like 3:05."));
}

#[test]
fn check_rejects_malformed_spec() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["check", "--answer", "{not json", "--input", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: invalid answer spec JSON"));
}

#[test]
fn paper_writes_json_and_html() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["paper", "--seed", "7", "--output", "out/paper.json"])
        .args(["--html", "out/paper.html", "--answer-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("35 questions, 60 marks"))
        .stdout(predicate::str::contains("Section III: 5 questions, 20 marks"));

    let json = std::fs::read_to_string(dir.path().join("out/paper.json")).unwrap();
    let paper: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(paper["questions"].as_array().unwrap().len(), 35);
    assert_eq!(paper["total_marks"], 60);

    let html = std::fs::read_to_string(dir.path().join("out/paper.html")).unwrap();
    assert!(html.contains("Answer key"));
}

#[test]
fn paper_defaults_to_output_dir() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["paper", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sea-tutor-papers"));

    let written: Vec<_> = std::fs::read_dir(dir.path().join("sea-tutor-papers"))
        .unwrap()
        .collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn init_then_validate_and_compose() {
    let dir = TempDir::new().unwrap();

    sea_tutor(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sea-tutor.toml"))
        .stdout(predicate::str::contains("Created papers/sea.toml"));

    assert!(dir.path().join("sea-tutor.toml").exists());
    assert!(dir.path().join("papers/sea.toml").exists());

    sea_tutor(&dir)
        .args(["validate", "--shape", "papers/sea.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 sections, 35 questions, 60 marks"))
        .stdout(predicate::str::contains("Paper shape valid."));

    // The config written by init points `paper_shape` at papers/sea.toml.
    sea_tutor(&dir)
        .args(["paper", "--seed", "2", "--output", "p.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SEA simulator"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir).arg("init").assert().success();
    sea_tutor(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("odd.toml"),
        r#"
name = "Odd"

[[sections]]
name = "A"
count = 2
skills = ["std9_calculus"]
"#,
    )
    .unwrap();

    sea_tutor(&dir)
        .args(["validate", "--shape", "odd.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[A] WARNING: unknown skill"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn oversized_shape_is_capped_not_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("huge.toml"),
        r#"
name = "Huge"

[[sections]]
name = "A"
count = 3000000000
marks_each = 4294967295
skills = ["core_addition"]
"#,
    )
    .unwrap();

    sea_tutor(&dir)
        .args(["validate", "--shape", "huge.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sections, 200 questions, 4000 marks"))
        .stdout(predicate::str::contains("will be capped"));

    sea_tutor(&dir)
        .args(["paper", "--shape", "huge.toml", "--seed", "4", "--output", "huge.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("200 questions, 4000 marks"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["validate", "--shape", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn log_then_stats() {
    let dir = TempDir::new().unwrap();
    let answer = r#"{"type":"numeric","value":12}"#;

    sea_tutor(&dir)
        .args(["log", "--session", "s1", "--question", "q1", "--input", "12"])
        .args(["--answer", answer, "--skill", "core_add_sub", "--time-spent", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"));

    sea_tutor(&dir)
        .args(["log", "--session", "s1", "--question", "q2", "--input", "13"])
        .args(["--answer", answer, "--skill", "core_add_sub", "--used-example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not quite. Try again."));

    let log = dir.path().join("sea-tutor-data/attempts.jsonl");
    let content = std::fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 2);

    sea_tutor(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 attempts, 1 correct (50.0%)"))
        .stdout(predicate::str::contains("examples 1"))
        .stdout(predicate::str::contains("core_add_sub"));
}

#[test]
fn log_respects_env_override() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .env("SEA_TUTOR_ATTEMPT_LOG", "custom/log.jsonl")
        .args(["log", "--session", "s", "--question", "q", "--input", "1/2"])
        .args(["--answer", r#"{"type":"fraction","numerator":1,"denominator":2}"#])
        .assert()
        .success();
    assert!(dir.path().join("custom/log.jsonl").exists());
}

#[test]
fn stats_on_empty_log() {
    let dir = TempDir::new().unwrap();
    sea_tutor(&dir)
        .args(["stats", "--log", "missing.jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No attempts recorded"));
}
