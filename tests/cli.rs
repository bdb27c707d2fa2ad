use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SEPARATOR: &str = "//----------------------------------------\n";

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn codeagg(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codeagg").expect("Failed to find codeagg binary");
    cmd.current_dir(dir)
        .env_remove("CODEAGG_ROOT")
        .env_remove("CODEAGG_OUTPUT");
    cmd
}

#[test]
fn default_run_aggregates_root_and_subdirectories() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), b"const a = 1;\n");
    write_file(&temp.path().join("b.txt"), b"not included");
    write_file(&temp.path().join("components/c.js"), b"export const c = 3;");

    codeagg(temp.path())
        .assert()
        .success()
        .stdout("Aggregated code written to aggregated_code.txt\n");

    let output = fs::read_to_string(temp.path().join("aggregated_code.txt")).unwrap();
    let expected = format!(
        "./a.js\n{sep}const a = 1;\n\n\n./components/c.js\n{sep}export const c = 3;\n\n",
        sep = SEPARATOR
    );
    assert_eq!(output, expected);
}

#[test]
fn missing_subdirectories_are_not_errors() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("redux/store.js"), b"store");

    codeagg(temp.path()).assert().success();

    let output = fs::read_to_string(temp.path().join("aggregated_code.txt")).unwrap();
    assert_eq!(output, format!("./redux/store.js\n{}store\n\n", SEPARATOR));
}

#[test]
fn empty_project_writes_empty_output() {
    let temp = tempdir().unwrap();

    codeagg(temp.path()).assert().success();

    let output = fs::read_to_string(temp.path().join("aggregated_code.txt")).unwrap();
    assert!(output.is_empty());
}

#[test]
fn rerun_overwrites_previous_output() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), b"first");

    codeagg(temp.path()).assert().success();
    write_file(&temp.path().join("a.js"), b"second");
    codeagg(temp.path()).assert().success();

    let output = fs::read_to_string(temp.path().join("aggregated_code.txt")).unwrap();
    assert!(!output.contains("first"));
    assert_eq!(output.matches(SEPARATOR).count(), 1);
}

#[test]
fn invalid_utf8_bytes_are_dropped() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), b"ok\xff\xfe!");

    codeagg(temp.path()).assert().success();

    let output = fs::read_to_string(temp.path().join("aggregated_code.txt")).unwrap();
    assert!(output.contains("ok!"));
}

#[test]
fn options_override_defaults() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/b.ts"), b"b");
    write_file(&temp.path().join("src/a.ts"), b"a");
    write_file(&temp.path().join("src/skip.js"), b"js");

    codeagg(temp.path())
        .args([
            "--subdirs",
            "src",
            "--extension",
            ".ts",
            "--output",
            "bundle.txt",
            "--sorted",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle.txt"));

    let output = fs::read_to_string(temp.path().join("bundle.txt")).unwrap();
    let expected = format!(
        "./src/a.ts\n{sep}a\n\n./src/b.ts\n{sep}b\n\n",
        sep = SEPARATOR
    );
    assert_eq!(output, expected);
}

#[test]
fn config_file_in_working_directory_is_used() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join(".codeagg.toml"),
        b"[general]\noutput = \"from_config.txt\"\n\n[collector]\nsubdirectories = [\"lib\"]\n",
    );
    write_file(&temp.path().join("lib/x.js"), b"x");

    codeagg(temp.path()).assert().success();

    let output = fs::read_to_string(temp.path().join("from_config.txt")).unwrap();
    assert!(output.starts_with("./lib/x.js\n"));
}

#[test]
fn dry_run_lists_files_without_writing() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), b"a");
    write_file(&temp.path().join("pages/index.js"), b"i");

    codeagg(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout("./a.js\n./pages/index.js\n");

    assert!(!temp.path().join("aggregated_code.txt").exists());
}

#[test]
fn dry_run_json_listing() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("components/c.js"), b"c");

    let assert = codeagg(temp.path())
        .args(["--dry-run", "--format", "json"])
        .assert()
        .success();

    let value: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["path"], "./components/c.js");
    assert_eq!(entries[0]["origin"]["subdirectory"], "components");
}

#[test]
fn init_config_creates_file_once() {
    let temp = tempdir().unwrap();

    codeagg(temp.path())
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .codeagg.toml"));

    let content = fs::read_to_string(temp.path().join(".codeagg.toml")).unwrap();
    assert!(content.contains("[collector]"));

    codeagg(temp.path())
        .arg("--init-config")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn conflicting_verbosity_flags_fail() {
    let temp = tempdir().unwrap();

    codeagg(temp.path())
        .args(["--verbose", "--quiet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot use both --verbose and --quiet"));
}

#[test]
fn missing_root_fails() {
    let temp = tempdir().unwrap();

    codeagg(temp.path())
        .args(["--root", "does-not-exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Root directory does not exist"));
}

#[test]
fn unparsable_explicit_config_fails() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("custom.toml"), b"[collector\n");

    codeagg(temp.path())
        .args(["--config", "custom.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn unparsable_implicit_config_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join(".codeagg.toml"), b"not = [valid");
    write_file(&temp.path().join("a.js"), b"a");

    codeagg(temp.path()).assert().success();

    assert!(temp.path().join("aggregated_code.txt").exists());
}

/// Remove all permissions; returns false when the file stays readable.
#[cfg(unix)]
fn make_unreadable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
    fs::read(path).is_err()
}

#[cfg(unix)]
#[test]
fn unreadable_source_aborts_by_default() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("locked.js"), b"secret");

    // Privileged users can still read the file.
    if !make_unreadable(&temp.path().join("locked.js")) {
        return;
    }

    codeagg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("❌ Error"))
        .stderr(predicate::str::contains("Cannot read source file"));
}

#[cfg(unix)]
#[test]
fn keep_going_skips_unreadable_source() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("locked.js"), b"secret");
    write_file(&temp.path().join("components/ok.js"), b"ok");

    if !make_unreadable(&temp.path().join("locked.js")) {
        return;
    }

    codeagg(temp.path())
        .arg("--keep-going")
        .assert()
        .success()
        .stdout("Aggregated code written to aggregated_code.txt\n")
        .stderr(predicate::str::contains("Skipped 1 unreadable file"))
        .stderr(predicate::str::contains("./locked.js"));

    let output = fs::read_to_string(temp.path().join("aggregated_code.txt")).unwrap();
    assert_eq!(output, format!("./components/ok.js\n{}ok\n\n", SEPARATOR));
}
