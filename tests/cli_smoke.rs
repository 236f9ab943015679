use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Helper to get an env-isolated Command for the `cc-statusline` binary.
// Config and usage snapshot paths point into `dir` so the test never sees
// (or touches) the invoking user's real files.
fn statusline(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cc-statusline").expect("binary exists");
    cmd.env("CC_STATUSLINE_CONFIG", dir.path().join("config.json"));
    cmd.env("CC_STATUSLINE_USAGE_FILE", dir.path().join("usage.json"));
    cmd.env_remove("NO_COLOR");
    cmd
}

fn snapshot(dir: &TempDir) -> String {
    serde_json::json!({
        "session_id": "test-session",
        "transcript_path": dir.path().join("transcript.jsonl"),
        "cwd": dir.path(),
        "model": {"id": "claude-sonnet-4-5", "display_name": "Sonnet 4.5"},
        "workspace": {"current_dir": dir.path(), "project_dir": dir.path()},
        "version": "2.0.1",
        "output_style": {"name": "default"}
    })
    .to_string()
}

// -----------------------------------------------------------------------
// Basic CLI
// -----------------------------------------------------------------------

#[test]
fn help_shows_description() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status line renderer"));
}

#[test]
fn version_shows_semver() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

// -----------------------------------------------------------------------
// Render
// -----------------------------------------------------------------------

#[test]
fn render_default_config_prints_two_lines() {
    let dir = TempDir::new().unwrap();
    let output = statusline(&dir)
        .arg("--no-color")
        .write_stdin(snapshot(&dir))
        .output()
        .expect("render runs");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "two-line mode by default: {stdout}");
    // No transcript yet: zero tokens, zero percent.
    assert!(lines[1].contains("Context: 0 0%"), "{stdout}");
    // Sonnet is the default model and is hidden by default.
    assert!(!stdout.contains("Sonnet"), "{stdout}");
}

#[test]
fn render_reads_transcript_tokens() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transcript.jsonl"),
        r#"{"message":{"usage":{"input_tokens":2000,"cache_read_input_tokens":90000}}}"#,
    )
    .unwrap();

    statusline(&dir)
        .arg("--no-color")
        .write_stdin(snapshot(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("92k"))
        .stdout(predicate::str::contains("46%"));
}

#[test]
fn render_shows_usage_window_with_bar() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("usage.json"),
        r#"{"five_hour": {"utilization": 42, "resets_at": "not-a-date"}}"#,
    )
    .unwrap();

    statusline(&dir)
        .arg("--no-color")
        .write_stdin(snapshot(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("5h:"))
        .stdout(predicate::str::contains("42%"))
        .stdout(predicate::str::contains("(N/A)"));
}

#[test]
fn render_honors_one_line_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"oneLine": true}"#).unwrap();

    let output = statusline(&dir)
        .arg("--no-color")
        .write_stdin(snapshot(&dir))
        .output()
        .expect("render runs");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    // Joined line plus the blank spacer.
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].contains("Context:"), "{stdout}");
    assert!(lines[1].is_empty(), "{stdout}");
}

#[test]
fn render_malformed_stdin_degrades_to_error_line() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("--no-color")
        .write_stdin("not json at all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("Check statusline configuration"));
}

#[test]
fn render_broken_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ definitely broken").unwrap();

    statusline(&dir)
        .arg("--no-color")
        .write_stdin(snapshot(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("Context:"));
}

#[test]
fn render_without_color_flag_emits_ansi() {
    let dir = TempDir::new().unwrap();
    let output = statusline(&dir)
        .write_stdin(snapshot(&dir))
        .output()
        .expect("render runs");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('\x1b'), "colored output expected: {stdout:?}");
}

#[test]
fn render_explicit_subcommand_matches_default() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["render", "--no-color"])
        .write_stdin(snapshot(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("Context:"));
}

// -----------------------------------------------------------------------
// Config
// -----------------------------------------------------------------------

#[test]
fn config_get_reads_defaults_when_no_file_exists() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "get", "limits.color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blue"));
}

#[test]
fn config_set_then_get_round_trips() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "set", "limits.color", "red"])
        .assert()
        .success();

    statusline(&dir)
        .args(["config", "get", "limits.color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("red"));

    // Sibling values keep their defaults in the saved file.
    statusline(&dir)
        .args(["config", "get", "limits.progressBarLength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));
}

#[test]
fn config_set_rejects_invalid_enum_value() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "set", "limits.color", "magenta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limits.color"));

    // Nothing was saved.
    statusline(&dir)
        .args(["config", "get", "limits.color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blue"));
}

#[test]
fn config_set_rejects_invalid_bar_length() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "set", "limits.progressBarLength", "7"])
        .assert()
        .failure();
}

#[test]
fn config_get_unknown_path_fails() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "get", "git.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("git.nope"));
}

#[test]
fn config_show_prints_full_tree() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pathDisplayMode"))
        .stdout(predicate::str::contains("progressBarLength"));
}

#[test]
fn config_path_prints_override_location() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn config_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["config", "set", "oneLine", "true"])
        .assert()
        .success();
    statusline(&dir)
        .args(["config", "reset"])
        .assert()
        .success();
    statusline(&dir)
        .args(["config", "get", "oneLine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn config_import_rejects_invalid_tree() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"pathDisplayMode": "bogus"}"#).unwrap();

    statusline(&dir)
        .args(["config", "import"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pathDisplayMode"));
}

#[test]
fn config_export_import_round_trips() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("exported.json");

    statusline(&dir)
        .args(["config", "set", "separator", "→"])
        .assert()
        .success();
    statusline(&dir)
        .args(["config", "export"])
        .arg(&exported)
        .assert()
        .success();
    statusline(&dir)
        .args(["config", "reset"])
        .assert()
        .success();
    statusline(&dir)
        .args(["config", "import"])
        .arg(&exported)
        .assert()
        .success();
    statusline(&dir)
        .args(["config", "get", "separator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("→"));
}

// -----------------------------------------------------------------------
// Preview
// -----------------------------------------------------------------------

#[test]
fn preview_prints_bar_matrix() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress Bar Preview"))
        .stdout(predicate::str::contains("15-cell bars"))
        .stdout(predicate::str::contains("100%"));
}
