use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_lifecycle_commands() {
    Command::cargo_bin("tfh")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("destroy"))
        .stdout(predicate::str::contains("output"));
}

#[test]
fn test_validate_missing_dir_is_a_setup_error() {
    Command::cargo_bin("tfh")
        .unwrap()
        .args(["validate", "--dir", "/definitely/not/a/real/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration directory not found"));
}

#[test]
fn test_malformed_var_is_rejected_at_parse_time() {
    Command::cargo_bin("tfh")
        .unwrap()
        .args(["apply", "--var", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}
