use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn scanplate() -> Command {
    let mut cmd = Command::cargo_bin("scanplate").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_match_from_args() {
    scanplate()
        .args(["{a:i}-{b:i}", "12-34"])
        .assert()
        .success()
        .stdout("{\"a\":\"12\",\"b\":\"34\"}\n");
}

#[test]
fn test_keys_are_sorted() {
    scanplate()
        .args(["{z}:{a}", "1:2"])
        .assert()
        .success()
        .stdout("{\"a\":\"2\",\"z\":\"1\"}\n");
}

#[test]
fn test_no_match_exit_code() {
    scanplate()
        .args(["{a:i}-{b:i}", "abc"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("input does not match template"))
        .stderr(predicate::str::contains("1 of 1 inputs did not match"));
}

#[test]
fn test_invalid_template_exit_code() {
    scanplate()
        .args(["{field1", "anything"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing closing bracket"));

    scanplate()
        .args(["{n:i:abc}", "123"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid token length 'abc'"));
}

#[test]
fn test_inputs_from_stdin_keep_order() {
    scanplate()
        .arg("{key}={value:u}")
        .write_stdin("port=8080\r\nhost=example\nretries=3\n")
        .assert()
        .code(1)
        .stdout("{\"key\":\"port\",\"value\":\"8080\"}\n{\"key\":\"retries\",\"value\":\"3\"}\n")
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("\"host=example\""));
}

#[test]
fn test_inputs_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "2024-01-31").unwrap();
    writeln!(file, "1999-12-01").unwrap();

    scanplate()
        .args(["{y:u:4}-{m:u:2}-{d:u:2}", "--sequential", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            "{\"d\":\"31\",\"m\":\"01\",\"y\":\"2024\"}\n{\"d\":\"01\",\"m\":\"12\",\"y\":\"1999\"}\n",
        );
}

#[test]
fn test_missing_input_file() {
    scanplate()
        .args(["{x}", "--file", "/nonexistent/scanplate-inputs.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn test_explain() {
    scanplate()
        .args(["--explain", "Hello, {name}!{_:u:3}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("literal \"Hello, \""))
        .stdout(predicate::str::contains("name"))
        .stdout(predicate::str::contains("[0, +∞)"))
        .stdout(predicate::str::contains("[3, 3]"));
}

#[test]
fn test_max_steps() {
    let input = "x".repeat(40);
    scanplate()
        .args(["{a}{b}{c}{d}!", input.as_str(), "--max-steps", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("search gave up after 5 steps"));
}

#[test]
fn test_anonymous_fields_not_printed() {
    scanplate()
        .args(["{_}:{}:{v}", "a:b:c"])
        .assert()
        .success()
        .stdout("{\"v\":\"c\"}\n");
}
