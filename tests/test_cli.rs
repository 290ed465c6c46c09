use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_writes_config() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");

    let mut cmd = Command::cargo_bin("sporogen").unwrap();
    cmd.arg("init")
        .arg("--output")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote starting configuration"));

    assert!(config_path.exists());
    let text = std::fs::read_to_string(&config_path).unwrap();
    assert!(text.contains("\"organism\": \"bryophyte\""));
}

#[test]
fn test_init_rejects_unknown_mode() {
    let mut cmd = Command::cargo_bin("sporogen").unwrap();
    cmd.arg("init")
        .arg("--life-cycle")
        .arg("tardigrade")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown life-cycle mode"))
        .stderr(predicate::str::contains("wright-fisher"));
}

#[test]
fn test_generate_to_stdout() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("init")
        .arg("--output")
        .arg(&config_path)
        .assert()
        .success();

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("initializeSLiMModelType(\"nonWF\")"))
        .stdout(predicate::str::contains("reproduction(p1)"));
}

#[test]
fn test_generate_writes_file() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");
    let script_path = temp.path().join("model.slim");

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("init")
        .arg("--output")
        .arg(&config_path)
        .arg("--life-cycle")
        .arg("pteridophyte-heterosporous")
        .assert()
        .success();

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .arg("--output")
        .arg(&script_path)
        .assert()
        .success();

    let script = std::fs::read_to_string(&script_path).unwrap();
    assert!(script.contains("spo_megaspores_per"));
}

#[test]
fn test_generate_seed_is_reproducible() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("init")
        .arg("--output")
        .arg(&config_path)
        .assert()
        .success();

    let run = || {
        let out = Command::cargo_bin("sporogen")
            .unwrap()
            .arg("generate")
            .arg("--config")
            .arg(&config_path)
            .arg("--seed")
            .arg("11")
            .output()
            .unwrap();
        String::from_utf8(out.stdout).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_validate_reports_stats() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("init")
        .arg("--output")
        .arg(&config_path)
        .assert()
        .success();

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("validate")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("Genome length: 20000 bp"));
}

#[test]
fn test_validate_rejects_malformed_config() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    Command::cargo_bin("sporogen")
        .unwrap()
        .arg("validate")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing"));
}
