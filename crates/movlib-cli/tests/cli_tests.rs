use std::{fs, path::PathBuf, process::{Command, Output}};
use tempfile::TempDir;

/// Writes `content` to `name` inside a fresh temporary directory.
///
/// # Panics
/// Panics if the temporary directory or file creation fails.
fn setup_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    (path, temp_dir)
}

fn movlib(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_movlib"))
        .args(args)
        .output()
        .expect("Failed to run movlib")
}

#[test]
fn test_check_clean_source() {
    let (path, _dir) = setup_file("main.mov", "START:\n  r1 = r2 ? r3 # copy\n");
    let output = movlib(&["check", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("ok (7 tokens)"));
}

#[test]
fn test_check_reports_non_ascii() {
    let (path, _dir) = setup_file("bad.mov", "r1 = r2 é\n");
    let output = movlib(&["check", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("only ASCII supported outside comments"), "stderr: {}", stderr);
}

#[test]
fn test_check_invalid_utf8_inside_comment() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("bytes.mov");
    fs::write(&path, b"r1 = r2 # \xff\xfe\nr3 = r1\n").expect("Failed to write test file");
    let output = movlib(&["check", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_verbose_logs_command_progress() {
    let (path, _dir) = setup_file("main.mov", "r1 = r2\n");
    let quiet = movlib(&["check", path.to_str().unwrap()]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("Checking"));

    let verbose = movlib(&["-vv", "check", path.to_str().unwrap()]);
    assert!(verbose.status.success());
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("Checking"), "stderr: {}", stderr);
}

#[test]
fn test_check_reports_stray_byte_position() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("stray.mov");
    fs::write(&path, b"# \xff\xfe\nr3\n\x80").expect("Failed to write test file");
    let output = movlib(&["tokens", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("2:1..2:3\tIdentifier\tr3"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("only ASCII supported outside comments"));
}

#[test]
fn test_tokens_lists_each_token() {
    let (path, _dir) = setup_file("main.mov", "r1 = r2\n");
    let output = movlib(&["tokens", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "1:1..1:3\tIdentifier\tr1");
    assert_eq!(lines[1], "1:4..1:5\tMove\t");
}

#[test]
fn test_missing_source_file() {
    let output = movlib(&["check", "/definitely/not/here.mov"]);
    assert!(!output.status.success());
}

#[test]
fn test_machine_lists_slots() {
    let (path, _dir) = setup_file(
        "machine.toml",
        r#"
name = "cpu0"

[[slot]]
name = "r1"
kind = "register"

[[slot]]
name = "LOCK"
kind = "pin"

[[slot]]
name = "INC"
kind = "rom"
contents = [1, 2, 3]
"#,
    );
    let output = movlib(&["machine", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("machine cpu0 (3 slots)"));
    assert!(stdout.contains("r1\trw--\tint\tready"));
    assert!(stdout.contains("LOCK\trw--\tint\tempty"));
    assert!(stdout.contains("INC\tr-R-\tint\tready"));
}

#[test]
fn test_machine_rejects_duplicate_slots() {
    let (path, _dir) = setup_file(
        "machine.toml",
        "[[slot]]\nname = \"r1\"\nkind = \"register\"\n\n[[slot]]\nname = \"r1\"\nkind = \"ram\"\nlength = 4\n",
    );
    let output = movlib(&["machine", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("declared more than once"));
}
