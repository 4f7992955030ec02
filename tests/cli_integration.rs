//! Integration tests for the `todo` CLI.
//!
//! Each test creates a temp directory with its own HOME and config dir, runs
//! `todo` as a subprocess, and verifies stdout and/or file contents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A scratch environment: `work/` is the working directory, `home/` is HOME.
struct Sandbox {
    tmp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("work")).unwrap();
        fs::create_dir_all(tmp.path().join("home")).unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        Sandbox { tmp }
    }

    fn work(&self) -> PathBuf {
        self.tmp.path().join("work")
    }

    fn store(&self) -> PathBuf {
        self.work().join(".todo")
    }

    fn write_store(&self, content: &str) {
        fs::write(self.store(), content).unwrap();
    }

    fn read_store(&self) -> String {
        fs::read_to_string(self.store()).unwrap()
    }

    fn write_config(&self, content: &str) {
        let dir = self.tmp.path().join("config/todo");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), content).unwrap();
    }

    fn command(&self, dir: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_todo"));
        cmd.args(args)
            .current_dir(dir)
            .env("HOME", self.tmp.path().join("home"))
            .env("XDG_CONFIG_HOME", self.tmp.path().join("config"))
            .env_remove("VISUAL")
            .env_remove("EDITOR")
            .env_remove("TODO_LOG")
            .stdin(Stdio::null());
        cmd
    }

    /// Run against this sandbox's store explicitly
    fn run(&self, args: &[&str]) -> Output {
        let store = self.store();
        let mut full = vec!["-f", store.to_str().unwrap()];
        full.extend_from_slice(args);
        self.command(&self.work(), &full).output().expect("failed to run todo")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "todo {:?} failed:\nstdout: {}\nstderr: {}",
                args,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let store = self.store();
        let mut full = vec!["-f", store.to_str().unwrap()];
        full.extend_from_slice(args);
        let mut child = self
            .command(&self.work(), &full)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn todo");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn test_list_default_shows_both_classes() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[X] b\nnotes\n[ ] c\n");

    let out = sb.run_ok(&[]);
    assert_eq!(out, "todo:\n  1. a\n  2. c\ndone:\n  1. b\n");
}

#[test]
fn test_list_count_bounds_each_class() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[ ] b\n[X] c\n[X] d\n");

    let out = sb.run_ok(&["list", "1"]);
    assert_eq!(out, "todo:\n  1. a\ndone:\n  1. c\n");
}

#[test]
fn test_list_single_class() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[X] b\n");

    assert_eq!(sb.run_ok(&["list", "--done"]), "done:\n  1. b\n");
    assert_eq!(sb.run_ok(&["ls", "-t", "5"]), "todo:\n  1. a\n");
}

#[test]
fn test_list_uses_config_limit() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[ ] b\n[ ] c\n");
    sb.write_config("[list]\nlimit = 2\n");

    assert_eq!(sb.run_ok(&["list", "--todo"]), "todo:\n  1. a\n  2. b\n");
}

#[test]
fn test_list_json() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[X] b\n");

    let out = sb.run_ok(&["--json", "list"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["todo"][0]["rank"], 1);
    assert_eq!(value["todo"][0]["text"], "a");
    assert_eq!(value["done"][0]["text"], "b");
}

#[test]
fn test_list_rejects_malformed_count() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n");

    for bad in ["3x", "0", "abc"] {
        let output = sb.run(&["list", bad]);
        assert_eq!(output.status.code(), Some(2), "count {:?}", bad);
        assert!(stderr(&output).contains("positive number"));
    }
}

#[test]
fn test_list_missing_store_fails() {
    let sb = Sandbox::new();
    let output = sb.run(&["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("could not open"));
}

// ---------------------------------------------------------------------------
// Toggling
// ---------------------------------------------------------------------------

#[test]
fn test_done_moves_item_to_top() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[ ] b\n[ ] c\n");

    let out = sb.run_ok(&["done", "2"]);
    assert_eq!(out, "done: b\n");
    assert_eq!(sb.read_store(), "[X] b\n[ ] a\n[ ] c\n");
}

#[test]
fn test_undo_moves_item_to_bottom() {
    let sb = Sandbox::new();
    sb.write_store("[X] a\n[ ] b\n[X] c\n");

    let out = sb.run_ok(&["reopen", "1"]);
    assert_eq!(out, "reopened: a\n");
    assert_eq!(sb.read_store(), "[ ] b\n[X] c\n[ ] a\n");
}

#[test]
fn test_done_out_of_range() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n[ ] b\n");

    let output = sb.run(&["done", "5"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("no todo item #5"));
    assert_eq!(sb.read_store(), "[ ] a\n[ ] b\n");
}

#[test]
fn test_done_in_store_with_latin1_notes() {
    let sb = Sandbox::new();
    fs::write(sb.store(), b"caf\xe9 notes\n[ ] a\n[ ] cr\xe8me\n").unwrap();

    assert_eq!(sb.run_ok(&["list", "--todo"]), "todo:\n  1. a\n  2. cr\u{FFFD}me\n");
    assert_eq!(sb.run_ok(&["done", "1"]), "done: a\n");
    assert_eq!(
        fs::read(sb.store()).unwrap(),
        b"[X] a\ncaf\xe9 notes\n[ ] cr\xe8me\n"
    );
}

#[test]
fn test_done_rejects_bad_rank_before_touching_store() {
    let sb = Sandbox::new();
    let output = sb.run(&["done", "1a"]);
    assert_eq!(output.status.code(), Some(2));
    // The store doesn't exist; the argument error comes first
    assert!(!stderr(&output).contains("could not open"));
}

// ---------------------------------------------------------------------------
// Adding
// ---------------------------------------------------------------------------

#[test]
fn test_add_arguments() {
    let sb = Sandbox::new();
    sb.write_store("[X] old\n");

    let out = sb.run_ok(&["add", "buy milk", "call mom"]);
    assert_eq!(out, "added 2 items\n");
    assert_eq!(sb.read_store(), "[X] old\n[ ] buy milk\n[ ] call mom\n");
}

#[test]
fn test_add_from_stdin() {
    let sb = Sandbox::new();

    let output = sb.run_with_input(&["add"], "x\n\ny\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sb.read_store(), "[ ] x\n[ ] y\n");
}

#[test]
fn test_add_arguments_and_stdin() {
    let sb = Sandbox::new();

    let output = sb.run_with_input(&["add", "--stdin", "first"], "second\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sb.read_store(), "[ ] first\n[ ] second\n");
}

#[test]
fn test_add_multiline_argument() {
    let sb = Sandbox::new();
    sb.run_ok(&["add", "one\n\ntwo"]);
    assert_eq!(sb.read_store(), "[ ] one\n[ ] two\n");
}

// ---------------------------------------------------------------------------
// Store discovery
// ---------------------------------------------------------------------------

#[test]
fn test_store_found_in_ancestor() {
    let sb = Sandbox::new();
    sb.write_store("[ ] from work\n");
    let nested = sb.work().join("a/b/c");
    fs::create_dir_all(&nested).unwrap();

    let output = sb.command(&nested, &["list", "--todo"]).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "todo:\n  1. from work\n"
    );
}

#[test]
fn test_path_prints_resolved_store() {
    let sb = Sandbox::new();
    sb.write_store("");
    let nested = sb.work().join("deep");
    fs::create_dir_all(&nested).unwrap();

    let output = sb.command(&nested, &["path"]).output().unwrap();
    assert!(output.status.success());
    let printed = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(
        fs::canonicalize(printed).unwrap(),
        fs::canonicalize(sb.store()).unwrap()
    );
}

/// Run in the work dir with no `-f` and HOME unset
fn run_homeless(sb: &Sandbox, args: &[&str], input: &str) -> Output {
    let mut child = sb
        .command(&sb.work(), args)
        .env_remove("HOME")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn todo");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

/// Stores above the temp dir would be picked up instead of the fallbacks
fn outside_any_store(sb: &Sandbox) -> bool {
    todo::io::locate::find_upward(&sb.work()).is_none()
}

#[test]
fn test_add_without_home_creates_store_in_working_dir() {
    let sb = Sandbox::new();
    if !outside_any_store(&sb) {
        return;
    }

    let output = run_homeless(&sb, &["add", "buy milk"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sb.read_store(), "[ ] buy milk\n");

    let output = run_homeless(&sb, &["add"], "from pipe\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sb.read_store(), "[ ] buy milk\n[ ] from pipe\n");
}

#[test]
fn test_list_without_home_is_a_locate_error() {
    let sb = Sandbox::new();
    if !outside_any_store(&sb) {
        return;
    }

    let output = run_homeless(&sb, &["list"], "");
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("HOME is not set"));

    let output = run_homeless(&sb, &["done", "1"], "");
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_bad_rank_without_home_is_an_argument_error() {
    let sb = Sandbox::new();
    if !outside_any_store(&sb) {
        return;
    }

    for args in [&["done", "abc"][..], &["undo", "0"], &["list", "2x"]] {
        let output = run_homeless(&sb, args, "");
        assert_eq!(output.status.code(), Some(2), "args {:?}", args);
        assert!(stderr(&output).contains("positive number"));
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn test_edit_runs_editor_with_store_path() {
    let sb = Sandbox::new();
    sb.write_store("[ ] a\n");
    let store = sb.store();

    let output = sb
        .command(&sb.work(), &["-f", store.to_str().unwrap(), "edit"])
        .env("EDITOR", "true")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = sb
        .command(&sb.work(), &["-f", store.to_str().unwrap(), "edit"])
        .env("EDITOR", "false")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("editor 'false' exited"));
}
