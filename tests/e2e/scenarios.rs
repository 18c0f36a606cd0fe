use super::helpers::TestRepo;

const MIT: &str = "// SPDX-License-Identifier: MIT\n";
const LGPL: &str = "/* SPDX-License-Identifier: LGPL-2.1-or-later */\n";
const GPL: &str = "// SPDX-License-Identifier: GPL-2.0-only\n";

fn lib_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.write("lib/a.c", MIT)
        .write("lib/b.c", MIT)
        .write("lib/c.h", LGPL);
    repo.commit();
    repo
}

#[test]
fn test_mixed_directory_report() {
    let repo = lib_repo();

    let stdout = repo.stdout(&[]);
    assert_eq!(
        stdout,
        "/ → LGPL-2.1-or-later, MIT\n\
         \x20   lib/ → LGPL-2.1-or-later, MIT\n\
         \x20       c.h → LGPL-2.1-or-later\n\
         \x20       a.c → MIT\n\
         \x20       b.c\n"
    );
}

#[test]
fn test_glob_suffixes() {
    let repo = lib_repo();

    let stdout = repo.stdout(&["--glob-suffixes"]);
    assert_eq!(
        stdout,
        "/ → LGPL-2.1-or-later, MIT\n\
         \x20   lib/ → LGPL-2.1-or-later, MIT\n\
         \x20       *.c → MIT\n\
         \x20       c.h → LGPL-2.1-or-later\n"
    );
}

#[test]
fn test_subpath_keeps_true_depth() {
    let repo = lib_repo();

    let stdout = repo.stdout(&["lib"]);
    assert!(stdout.starts_with("    lib/ → LGPL-2.1-or-later, MIT\n"));
    assert!(stdout.contains("\n        c.h → LGPL-2.1-or-later\n"));
}

#[test]
fn test_uniform_directory_collapses() {
    let repo = TestRepo::new();
    repo.write("dir/a.c", "// SPDX-License-Identifier: 0BSD\n")
        .write("dir/sub/b.py", "# SPDX-License-Identifier: 0BSD\n")
        .write("main.c", MIT);
    repo.commit();

    let stdout = repo.stdout(&[]);
    assert_eq!(stdout, "/ → 0BSD, MIT\n    dir/* → 0BSD\n    main.c → MIT\n");
}

#[test]
fn test_ignored_files_do_not_appear() {
    let repo = TestRepo::new();
    repo.write("README", "")
        .write("LICENSE", "Permission is hereby granted\n")
        .write("COPYING.custom", "Some terms\n")
        .write("a.c", MIT)
        .write("b.h", GPL);
    repo.commit();

    let stdout = repo.stdout(&[]);
    assert!(!stdout.contains("README"));
    assert!(!stdout.contains("LICENSE"));
    assert!(stdout.contains("    COPYING.custom → unknown\n"));
    assert!(stdout.starts_with("/ → GPL-2.0-only, MIT, unknown\n"));
}

#[test]
fn test_unknown_mode_and_attributes() {
    let repo = TestRepo::new();
    repo.write(".gitattributes", "*.png binary\ngen.c generated\n")
        .write("logo.png", "not really a png\n")
        .write("gen.c", "int generated;\n")
        .write("src/a.c", MIT)
        .write("src/b.c", "int x;\n");
    repo.commit();

    let stdout = repo.stdout(&["--unknown"]);
    assert_eq!(stdout, "logo.png → binary\nsrc/b.c → unknown\n");

    let full = repo.stdout(&[]);
    assert!(!full.contains("gen.c"));
    assert!(!full.contains(".gitattributes"));
}

#[test]
fn test_working_copy_content_is_used() {
    let repo = TestRepo::new();
    repo.write("a.c", MIT).write("b.c", MIT);
    repo.commit();
    repo.write("a.c", GPL);

    let stdout = repo.stdout(&[]);
    assert_eq!(stdout, "/ → GPL-2.0-only, MIT\n    a.c → GPL-2.0-only\n    b.c → MIT\n");
}

#[test]
fn test_branch_selects_tree() {
    let repo = TestRepo::new();
    repo.write("a.c", MIT).write("b.h", GPL);
    repo.commit();
    repo.write("c.c", "// SPDX-License-Identifier: BSD-3-Clause\n");
    repo.commit();

    let latest = repo.stdout(&[]);
    assert!(latest.contains("c.c → BSD-3-Clause"));

    let previous = repo.stdout(&["--branch", "HEAD~1"]);
    assert_eq!(previous, "/ → GPL-2.0-only, MIT\n    b.h → GPL-2.0-only\n    a.c → MIT\n");
}

#[test]
fn test_missing_subpath_fails_without_output() {
    let repo = lib_repo();

    let output = repo.run(&["lib", "nope"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope"));
}

#[test]
fn test_json_format() {
    let repo = lib_repo();

    let stdout = repo.stdout(&["--format", "json", "--glob-suffixes", "lib"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value[0]["root"], "lib");
    let entries = value[0]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["path"], "lib/*.c");
    assert_eq!(entries[1]["kind"], "file-glob");
    assert_eq!(entries[1]["licenses"], serde_json::json!(["MIT"]));
}

#[test]
fn test_config_file_sets_defaults() {
    let repo = lib_repo();
    // Written after the commit so it stays out of the scanned tree
    repo.write(".repo-license-summary.toml", "glob_suffixes = true\n");

    let stdout = repo.stdout(&[]);
    assert!(stdout.contains("        *.c → MIT\n"));
}

#[test]
fn test_report_is_idempotent() {
    let repo = lib_repo();

    let first = repo.run(&["--glob-suffixes"]);
    let second = repo.run(&["--glob-suffixes"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[cfg(unix)]
#[test]
fn test_symlink_in_working_copy_is_fatal() {
    let repo = TestRepo::new();
    repo.write("a.c", MIT).write("b.c", MIT);
    repo.commit();

    let b = repo.path().join("b.c");
    std::fs::remove_file(&b).unwrap();
    std::os::unix::fs::symlink(repo.path().join("a.c"), &b).unwrap();

    let output = repo.run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("symlink"));
}

#[cfg(unix)]
#[test]
fn test_tracked_symlink_is_skipped() {
    let repo = TestRepo::new();
    repo.write("a.c", MIT).write("b.h", GPL);
    std::os::unix::fs::symlink("a.c", repo.path().join("link.c")).unwrap();
    repo.commit();

    let stdout = repo.stdout(&[]);
    assert!(!stdout.contains("link.c"));
}
