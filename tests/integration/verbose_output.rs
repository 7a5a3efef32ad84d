use assert_cmd::Command;
use predicates::prelude::*;

use crate::common;

#[test]
fn verbose_notes_unrecognized_fsck_lines_on_stderr() {
  // An empty repository makes fsck emit "notice:" lines, a shape the
  // diagnostic grammar does not model.
  let dir = tempfile::TempDir::new().unwrap();
  common::run(dir.path(), &["init", "-q", "-b", "main"]);

  Command::cargo_bin("git-lost-object-report")
    .unwrap()
    .args(["--repo", dir.path().to_str().unwrap(), "--verbose"])
    .assert()
    .success()
    .stderr(predicate::str::contains("[fsck] skipping unrecognized line: notice:"));
}

#[test]
fn without_verbose_skipped_lines_stay_quiet() {
  let dir = tempfile::TempDir::new().unwrap();
  common::run(dir.path(), &["init", "-q", "-b", "main"]);

  Command::cargo_bin("git-lost-object-report")
    .unwrap()
    .args(["--repo", dir.path().to_str().unwrap()])
    .assert()
    .success()
    .stderr(predicate::str::is_empty());
}
