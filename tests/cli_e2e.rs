//! End-to-end CLI tests for chatshare.
//!
//! These tests run the actual binary with various arguments and check its
//! output.
//!
//! # Test Categories
//!
//! - **Parse**: each dialect via CLI, output formats, word budget, spans
//! - **Reconcile**: ids survive an edit across two invocations
//! - **Convert / Trim**: the smaller subcommands
//! - **Error handling**: proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const BRACKETED: &str = "[1/15/24, 10:30 AM] Alice: Hello there
[1/15/24, 10:31 AM] Bob: Hi
[1/15/24, 10:32 AM] Alice: How are you";

const BRACKETED_EDITED: &str = "[1/15/24, 10:30 AM] Alice: Hello there!
[1/15/24, 10:31 AM] Bob: Hi
[1/15/24, 10:32 AM] Alice: How are you
[1/15/24, 10:33 AM] Bob: Great";

const COMMA: &str = "Alice, [15.01.24 10:30]: Hello
Bob, [15.01.24 10:31]: Hi, how are you?";

const GENERIC_EXPORT: &str = "Alice
1 Jan, 9:00
Hello
Profile Image
Bob
1 Jan, 9:01
Hi";

/// Creates a temporary directory with one fixture per dialect.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("bracketed.txt"), BRACKETED).unwrap();
    fs::write(dir.path().join("edited.txt"), BRACKETED_EDITED).unwrap();
    fs::write(dir.path().join("comma.txt"), COMMA).unwrap();
    fs::write(dir.path().join("generic_export.txt"), GENERIC_EXPORT).unwrap();
    fs::write(dir.path().join("noise.txt"), "just some words\nwith no chat in them").unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    dir
}

fn chatshare_cmd() -> Command {
    Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_chatshare")))
}

fn path_str(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn read_messages(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).unwrap();
    let value: Value = serde_json::from_str(&content).unwrap();
    value.as_array().unwrap().clone()
}

fn stdout_messages(output: &std::process::Output) -> Vec<Value> {
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    value.as_array().unwrap().clone()
}

// ============================================================================
// Parse
// ============================================================================

mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_to_stdout() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt")])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"sender\": \"Alice\""))
            .stdout(predicate::str::contains("Hello there"));
    }

    #[test]
    fn test_parse_stdout_is_pure_json() {
        let dir = setup_fixtures();

        let output = chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt")])
            .output()
            .unwrap();

        assert!(output.status.success());
        let messages = stdout_messages(&output);
        assert_eq!(messages.len(), 3);
        assert!(messages[0]["id"].as_str().unwrap().contains('-'));
    }

    #[test]
    fn test_parse_to_file() {
        let dir = setup_fixtures();
        let output = dir.path().join("out.json");

        chatshare_cmd()
            .args([
                "parse",
                &path_str(&dir, "bracketed.txt"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("bracketed"));

        assert_eq!(read_messages(&output).len(), 3);
    }

    #[test]
    fn test_parse_comma_dialect() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "comma.txt")])
            .assert()
            .success()
            .stdout(predicate::str::contains("Hi, how are you?"));
    }

    #[test]
    fn test_parse_generic_export() {
        let dir = setup_fixtures();
        let output = dir.path().join("out.json");

        chatshare_cmd()
            .args([
                "parse",
                &path_str(&dir, "generic_export.txt"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Converted"));

        let messages = read_messages(&output);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["sender"], "Bob");
    }

    #[test]
    fn test_parse_csv_format() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt"), "-f", "csv", "--no-ids"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Timestamp;Sender;Message"));
    }

    #[test]
    fn test_parse_format_from_extension() {
        let dir = setup_fixtures();
        let output = dir.path().join("out.jsonl");

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt"), "-o", output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("JSONL"));

        assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_parse_text_format() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "generic_export.txt"), "-f", "text"])
            .assert()
            .success()
            .stdout("[1 Jan, 9:00] Alice: Hello\n[1 Jan, 9:01] Bob: Hi\n");
    }

    #[test]
    fn test_parse_text_format_refuses_lossy_messages() {
        let dir = setup_fixtures();
        let input = dir.path().join("lossy.txt");
        fs::write(&input, "Alice, [9:00]: look\n[photo]\nBob, [9:01]: nice").unwrap();

        chatshare_cmd()
            .args(["parse", input.to_str().unwrap(), "-f", "text"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be rendered"));
    }

    #[test]
    fn test_parse_max_words() {
        let dir = setup_fixtures();

        let output = chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt"), "--max-words", "3"])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(stdout_messages(&output).len(), 2);
    }

    #[test]
    fn test_parse_spans() {
        let dir = setup_fixtures();

        let output = chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt"), "--spans"])
            .output()
            .unwrap();

        let messages = stdout_messages(&output);
        assert_eq!(messages[0]["originalIndex"], 0);
        assert!(messages[1]["originalLength"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_parse_restricted_dialects() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "comma.txt"), "--dialect", "bracketed,generic"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not recognise"));
    }
}

// ============================================================================
// Reconcile
// ============================================================================

mod reconcile_tests {
    use super::*;

    fn parse_to(dir: &TempDir, input: &str, output: &PathBuf) {
        chatshare_cmd()
            .args(["parse", &path_str(dir, input), "-o", output.to_str().unwrap()])
            .assert()
            .success();
    }

    #[test]
    fn test_reconcile_keeps_ids() {
        let dir = setup_fixtures();
        let old = dir.path().join("old.json");
        let new = dir.path().join("new.json");
        parse_to(&dir, "bracketed.txt", &old);

        chatshare_cmd()
            .args([
                "reconcile",
                old.to_str().unwrap(),
                &path_str(&dir, "edited.txt"),
                "-o",
                new.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains("2 exact"))
            .stderr(predicate::str::contains("1 positional"))
            .stderr(predicate::str::contains("1 new"));

        let before = read_messages(&old);
        let after = read_messages(&new);
        assert_eq!(after.len(), 4);
        for i in 0..3 {
            assert_eq!(after[i]["id"], before[i]["id"]);
        }
        assert_ne!(after[3]["id"], before[0]["id"]);
    }

    #[test]
    fn test_reconcile_against_raw_text() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args([
                "reconcile",
                &path_str(&dir, "bracketed.txt"),
                &path_str(&dir, "edited.txt"),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Great"));
    }

    #[test]
    fn test_reconcile_unparseable_new_text() {
        let dir = setup_fixtures();
        let old = dir.path().join("old.json");
        parse_to(&dir, "bracketed.txt", &old);

        chatshare_cmd()
            .args(["reconcile", old.to_str().unwrap(), &path_str(&dir, "noise.txt")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not recognise"));
    }
}

// ============================================================================
// Convert / Trim
// ============================================================================

mod convert_tests {
    use super::*;

    #[test]
    fn test_convert_generic_export() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["convert", &path_str(&dir, "generic_export.txt")])
            .assert()
            .success()
            .stdout("[1 Jan, 9:00] Alice: Hello\n[1 Jan, 9:01] Bob: Hi\n");
    }

    #[test]
    fn test_convert_passthrough() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["convert", &path_str(&dir, "bracketed.txt")])
            .assert()
            .success()
            .stdout(predicate::str::contains("[1/15/24, 10:30 AM] Alice: Hello there"))
            .stderr(predicate::str::contains("Not a generic web export"));
    }

    #[test]
    fn test_convert_to_file() {
        let dir = setup_fixtures();
        let output = dir.path().join("converted.txt");

        chatshare_cmd()
            .args([
                "convert",
                &path_str(&dir, "generic_export.txt"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        assert!(fs::read_to_string(&output).unwrap().starts_with("[1 Jan, 9:00] Alice"));
    }
}

mod trim_tests {
    use super::*;

    #[test]
    fn test_trim_raw_text() {
        let dir = setup_fixtures();

        let output = chatshare_cmd()
            .args(["trim", &path_str(&dir, "bracketed.txt"), "--max-words", "2"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let messages = stdout_messages(&output);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["message"], "Hello there");
    }

    #[test]
    fn test_trim_requires_budget() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["trim", &path_str(&dir, "bracketed.txt")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--max-words"));
    }
}

// ============================================================================
// Error handling
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_unparseable_input() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "noise.txt")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not recognise"));
    }

    #[test]
    fn test_empty_input() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "empty.txt")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not recognise"));
    }

    #[test]
    fn test_missing_file() {
        chatshare_cmd()
            .args(["parse", "/nonexistent/chat.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_unknown_output_extension() {
        let dir = setup_fixtures();

        chatshare_cmd()
            .args(["parse", &path_str(&dir, "bracketed.txt"), "-o", &path_str(&dir, "out.xml")])
            .assert()
            .failure()
            .stderr(predicate::str::contains(".xml"));
    }

    #[test]
    fn test_help() {
        chatshare_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("reconcile"))
            .stdout(predicate::str::contains("EXAMPLES"));
    }
}
