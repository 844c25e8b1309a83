use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn repackage_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("repackage").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_end_to_end_rename_and_move() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child("src/main/java/com/fxstore/model/Entry.java")
        .write_str("package com.fxstore.model;\n\npublic class Entry {}\n")
        .unwrap();
    temp_dir
        .child("src/test/java/com/fxstore/model/EntryTest.java")
        .write_str("package com.fxstore.model;\n\nimport com.fxstore.api.FxCodec;\n")
        .unwrap();

    repackage_in(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Package Rename: com.fxstore -> com.snoworca.fxstore",
        ))
        .stdout(predicate::str::contains("[MODIFIED]"))
        .stdout(predicate::str::contains("Total files modified: 2"))
        .stdout(predicate::str::contains("[MOVED]"))
        .stdout(predicate::str::contains("Package rename completed!"));

    // Old locations are gone, new locations carry the rewritten content.
    temp_dir
        .child("src/main/java/com/fxstore")
        .assert(predicate::path::missing());
    temp_dir
        .child("src/main/java/com/snoworca/fxstore/model/Entry.java")
        .assert(predicate::str::contains("package com.snoworca.fxstore.model;"));
    temp_dir
        .child("src/test/java/com/snoworca/fxstore/model/EntryTest.java")
        .assert(predicate::str::contains(
            "import com.snoworca.fxstore.api.FxCodec;",
        ));
}

#[test]
fn test_second_run_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child("src/main/java/com/fxstore/Store.java")
        .write_str("package com.fxstore;\n")
        .unwrap();

    repackage_in(&temp_dir).assert().success();

    repackage_in(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files modified: 0"))
        .stdout(predicate::str::contains("[SKIP] Directory not found:"));

    temp_dir
        .child("src/main/java/com/snoworca/fxstore/Store.java")
        .assert(predicate::str::contains("package com.snoworca.fxstore;"));
}

#[test]
fn test_missing_test_root_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child("src/main/java/com/fxstore/A.java")
        .write_str("package com.fxstore;\n")
        .unwrap();
    // No src/test/java at all.

    repackage_in(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files modified: 1"));

    temp_dir
        .child("src/main/java/com/snoworca/fxstore/A.java")
        .assert(predicate::path::exists());
}

#[test]
fn test_runs_cleanly_with_no_source_roots() {
    let temp_dir = TempDir::new().unwrap();

    repackage_in(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files modified: 0"))
        .stdout(predicate::str::contains("Package rename completed!"));
}

#[test]
fn test_unreadable_file_reported_but_run_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child("src/main/java/com/fxstore/Ok.java")
        .write_str("package com.fxstore;\n")
        .unwrap();
    temp_dir
        .child("src/main/java/com/fxstore/Broken.java")
        .write_binary(&[0xff, 0xff, 0x80, 0x80])
        .unwrap();

    repackage_in(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[ERROR] Cannot read:"))
        .stdout(predicate::str::contains("Total files modified: 1"));

    // The unreadable file still moves with its directory, bytes intact.
    temp_dir
        .child("src/main/java/com/snoworca/fxstore/Broken.java")
        .assert(predicate::path::exists());
}
