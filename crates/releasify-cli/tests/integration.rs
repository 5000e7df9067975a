#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn releasify(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("releasify").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, yaml: &str) {
    std::fs::write(dir.path().join("releasify.yaml"), yaml).unwrap();
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

#[test]
fn missing_config_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    releasify(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Using releasify.yaml"))
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn parse_error_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "actions: [ {action: mkdir\n");
    releasify(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("parse error"));
}

#[test]
fn defaulted_settings_are_warned_about() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "actions: []\n");
    releasify(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning! manual-resolve was not specified, defaulting to true.",
        ))
        .stdout(predicate::str::contains("No actions were declared."));
}

#[test]
fn explicit_config_path_sets_working_directory() {
    let dir = TempDir::new().unwrap();
    let release = dir.path().join("release");
    std::fs::create_dir_all(release.join("dist")).unwrap();
    std::fs::write(
        release.join("pack.yaml"),
        "working-directory: dist\nactions:\n  - {action: touch, path: stamp}\n",
    )
    .unwrap();

    releasify(&dir)
        .arg("release/pack.yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Working in"));

    assert!(release.join("dist/stamp").is_file());
    assert!(!dir.path().join("stamp").exists());
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn mkdir_touch_delete_leaves_nothing_behind() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "manual-resolve: true
actions:
  - {action: mkdir, path: out}
  - {action: touch, path: out/marker}
  - {action: delete, path: out}
",
    );
    releasify(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 succeeded, 0 skipped, 0 rejected, 0 prompt(s)"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn unknown_action_is_skipped_and_copy_still_runs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.bin"), "bin").unwrap();
    write_config(
        &dir,
        "actions:
  - {action: rename, src: app.bin, dst: renamed.bin}
  - {action: copy, src: app.bin, dst: dist.bin}
",
    );
    releasify(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("action does not exist: rename").count(2))
        .stdout(predicate::str::contains("1 succeeded, 0 skipped, 1 rejected"));

    assert!(dir.path().join("dist.bin").is_file());
    assert!(!dir.path().join("renamed.bin").exists());
}

#[test]
fn move_and_copy_trees() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("build/bin")).unwrap();
    std::fs::write(dir.path().join("build/bin/app"), "app").unwrap();
    write_config(
        &dir,
        "actions:
  - {action: copy, src: build, dst: backup}
  - {action: move, src: build, dst: release}
",
    );
    releasify(&dir).assert().success();

    assert!(!dir.path().join("build").exists());
    assert!(dir.path().join("backup/bin/app").is_file());
    assert!(dir.path().join("release/bin/app").is_file());
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn auto_skip_does_not_prompt() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "manual-resolve: false
actions:
  - {action: delete, path: missing}
  - {action: touch, path: after}
",
    );
    releasify(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("There was an error executing"))
        .stdout(predicate::str::contains("Use \"retry\"").not())
        .stdout(predicate::str::contains("1 succeeded, 1 skipped, 0 rejected, 0 prompt(s)"));

    assert!(dir.path().join("after").exists());
}

#[test]
fn retry_then_skip_counts_attempts() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "actions:\n  - {action: delete, path: missing}\n");
    releasify(&dir)
        .write_stdin("retry\nRETRY\nskip\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(attempt 3)"))
        .stdout(predicate::str::contains("Use \"retry\", or \"skip\"").count(3))
        .stdout(predicate::str::contains("0 succeeded, 1 skipped, 0 rejected, 3 prompt(s)"));
}

#[test]
fn closed_stdin_skips() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "actions:\n  - {action: mkdir, path: a/b}\n");
    releasify(&dir)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"));
}

#[test]
fn missing_destination_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a"), "a").unwrap();
    write_config(
        &dir,
        "actions:\n  - {action: move, src: a}\n  - {action: touch, path: never}\n",
    );
    releasify(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a 'dst' path"));

    assert!(!dir.path().join("never").exists());
}

// ---------------------------------------------------------------------------
// Self-removal
// ---------------------------------------------------------------------------

#[test]
fn keep_self_overrides_remove_self() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "remove-self: true\nactions: []\n");
    releasify(&dir)
        .arg("--keep-self")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed own executable").not());

    assert!(assert_cmd::cargo::cargo_bin("releasify").exists());
}
