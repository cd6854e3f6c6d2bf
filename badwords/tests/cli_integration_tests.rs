// badwords/tests/cli_integration_tests.rs
//! Command-line integration tests for the `badwords` executable.
//!
//! Each test runs the binary inside a fresh temporary directory with
//! `XDG_CONFIG_HOME` pointed at it, so no configuration file from the host
//! leaks into the run. Stdout is never a terminal here, so output is plain.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

fn badwords(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("badwords")?;
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("BADWORDS_CONFIG")
        .env("RUST_LOG", "debug");
    Ok(cmd)
}

#[test]
fn test_scan_finds_obfuscated_words() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\nipsum\n")?;

    badwords(&dir)?
        .args(["scan", "--dictionary"])
        .arg(format!("{}:2", words.display()))
        .write_stdin("L0rem 1psum dolor.")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("L0rem (risk 2)"))
        .stdout(predicate::str::contains("1psum (risk 2)"))
        .stdout(predicate::str::contains("Found 2 match(es), highest risk level 2."));
    Ok(())
}

#[test]
fn test_clean_input_exits_zero() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\n")?;

    badwords(&dir)?
        .args(["scan", "-D"])
        .arg(&words)
        .write_stdin("nothing to see here")
        .assert()
        .success()
        .stdout(predicate::str::contains("No bad words found."));
    Ok(())
}

#[test]
fn test_no_fail_keeps_exit_zero() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\n")?;

    badwords(&dir)?
        .args(["scan", "--no-fail", "-D"])
        .arg(&words)
        .write_stdin("lorem")
        .assert()
        .success()
        .stdout(predicate::str::contains("lorem"));
    Ok(())
}

#[test]
fn test_json_output_with_several_dictionaries() -> Result<()> {
    let dir = TempDir::new()?;
    let mild = write_file(dir.path(), "mild.csv", "lorem\n")?;
    let severe = write_file(dir.path(), "severe.yaml", "- ipsum\n")?;
    let input = write_file(dir.path(), "input.txt", "Lorem ipsum dolor.")?;

    let output = badwords(&dir)?
        .args(["scan", "--format", "json", "--input"])
        .arg(&input)
        .arg("-D")
        .arg(format!("{}:1", mild.display()))
        .arg("-D")
        .arg(format!("{}:3", severe.display()))
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["content"], "Lorem ipsum dolor.");
    assert_eq!(json["clean"], false);
    assert_eq!(json["risk_level"], 3);
    assert_eq!(json["matches"][0]["text"], "Lorem");
    assert_eq!(json["matches"][0]["risk_level"], 1);
    assert_eq!(json["matches"][1]["text"], "ipsum");
    assert_eq!(json["matches"][1]["risk_level"], 3);
    assert_eq!(json["dictionaries"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_html_output_escapes_and_highlights() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.yml", "- word: ipsum\n")?;

    badwords(&dir)?
        .args(["scan", "--format", "html", "-D"])
        .arg(format!("{}:2", words.display()))
        .write_stdin("<b>ipsum</b>")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "&lt;b&gt;<span class=\"badword risk-level-2\">ipsum</span>&lt;/b&gt;",
        ));
    Ok(())
}

#[test]
fn test_whitelist_suppresses_matches() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "bass\n")?;

    badwords(&dir)?
        .args(["scan", "--whitelist", "bass,grass", "-D"])
        .arg(&words)
        .write_stdin("Bass guitar")
        .assert()
        .success()
        .stdout(predicate::str::contains("No bad words found."));
    Ok(())
}

#[test]
fn test_whole_words_flag() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "ass\n")?;

    badwords(&dir)?
        .args(["scan", "--whole-words", "-D"])
        .arg(&words)
        .write_stdin("a classic assessment")
        .assert()
        .success();

    // Per-row flags in the CSV take precedence over the default.
    let loose = write_file(dir.path(), "loose.csv", "ass,0,0\n")?;
    badwords(&dir)?
        .args(["scan", "--whole-words", "-D"])
        .arg(&loose)
        .write_stdin("a classic assessment")
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_local_config_file_is_picked_up() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "bass\n")?;

    // The standard preset would match the leet spelling.
    badwords(&dir)?
        .args(["scan", "-D"])
        .arg(&words)
        .write_stdin("ba$$")
        .assert()
        .code(1);

    // An empty rule set only matches the literal word.
    write_file(dir.path(), "badwords.yaml", "rules: []\n")?;
    badwords(&dir)?
        .args(["scan", "-D"])
        .arg(&words)
        .write_stdin("ba$$")
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_config_command_prints_standard_preset() -> Result<()> {
    let dir = TempDir::new()?;

    badwords(&dir)?
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("type: character"))
        .stdout(predicate::str::contains("type: boundary"));
    Ok(())
}

#[test]
fn test_config_command_with_explicit_file() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_file(dir.path(), "custom.yaml", "whitelist:\n  - Grass\n")?;

    badwords(&dir)?
        .args(["config", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("grass"))
        .stdout(predicate::str::contains("type: character").not());
    Ok(())
}

#[test]
fn test_invalid_config_exits_with_error() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\n")?;
    let config = write_file(dir.path(), "bad.yaml", "rules:\n  - type: nonsense\n")?;

    badwords(&dir)?
        .args(["scan", "--config"])
        .arg(&config)
        .arg("-D")
        .arg(&words)
        .write_stdin("lorem")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ERROR: Failed to load configuration"));
    Ok(())
}

#[test]
fn test_repeated_dictionary_warns() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\n")?;

    badwords(&dir)?
        .args(["scan", "-D"])
        .arg(format!("{}:1", words.display()))
        .arg("-D")
        .arg(format!("{}:2", words.display()))
        .write_stdin("lorem")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("lorem (risk 1)"))
        .stderr(predicate::str::contains("WARNING: Dictionary"))
        .stderr(predicate::str::contains("will be ignored."));
    Ok(())
}

#[test]
fn test_missing_dictionary_exits_with_error() -> Result<()> {
    let dir = TempDir::new()?;

    badwords(&dir)?
        .args(["scan", "-D", "missing.csv"])
        .write_stdin("lorem")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot use dictionary missing.csv"));
    Ok(())
}

#[test]
fn test_malformed_dictionary_row_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\nipsum,maybe\n")?;

    badwords(&dir)?
        .args(["scan", "-D"])
        .arg(&words)
        .write_stdin("lorem")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("row 2"));
    Ok(())
}

#[test]
fn test_empty_input_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let words = write_file(dir.path(), "words.csv", "lorem\n")?;

    badwords(&dir)?
        .args(["scan", "-D"])
        .arg(&words)
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nothing to scan"));
    Ok(())
}

#[test]
fn test_missing_dictionary_argument_is_a_usage_error() -> Result<()> {
    let dir = TempDir::new()?;

    badwords(&dir)?
        .arg("scan")
        .write_stdin("lorem")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--dictionary"));
    Ok(())
}
