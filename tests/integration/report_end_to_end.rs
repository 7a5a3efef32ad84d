use assert_cmd::Command;

use crate::common;

fn scan(repo: &std::path::Path, extra: &[&str]) -> serde_json::Value {
  let repo_path = repo.to_str().unwrap();
  let mut args = vec!["--repo", repo_path, "--tz", "utc"];
  args.extend_from_slice(extra);

  let out = Command::cargo_bin("git-lost-object-report").unwrap().args(&args).output().unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn scan_reports_all_three_dangling_objects() {
  let repo = common::fixture_repo();
  let v = scan(repo.path(), &[]);

  assert_eq!(v["summary"]["count"].as_u64().unwrap(), 3);
  assert_eq!(v["summary"]["kinds"]["blob"], 1);
  assert_eq!(v["summary"]["kinds"]["commit"], 1);
  assert_eq!(v["summary"]["kinds"]["tag"], 1);
  assert_eq!(v["summary"]["scan_options"]["unreachable"], false);

  let objects = v["objects"].as_array().unwrap();
  assert_eq!(objects.len(), 3);

  for obj in objects {
    let id = obj["id"].as_str().unwrap();
    assert_eq!(id.len(), 40);
    assert_eq!(obj["short_id"].as_str().unwrap(), &id[..12]);
    assert!(obj["raw"].as_str().unwrap().starts_with("dangling "));
  }
}

#[test]
fn dangling_commit_is_enriched_from_git_log() {
  let repo = common::fixture_repo();
  let head = common::head_sha(repo.path());
  let v = scan(repo.path(), &[]);

  let commit = v["objects"]
    .as_array()
    .unwrap()
    .iter()
    .find(|o| o["kind"] == "commit")
    .expect("a dangling commit record");

  assert_eq!(commit["author"], "Fixture Bot");
  assert_eq!(commit["subject"], "orphan: work in progress");
  assert_eq!(commit["parent"].as_str().unwrap(), head);
  assert!(commit["timestamp"]["epoch"].as_i64().unwrap() > 0);
  assert!(commit["timestamp"]["local"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn dangling_tag_is_enriched_from_cat_file() {
  let repo = common::fixture_repo();
  let head = common::head_sha(repo.path());
  let v = scan(repo.path(), &[]);

  let tag = v["objects"]
    .as_array()
    .unwrap()
    .iter()
    .find(|o| o["kind"] == "tag")
    .expect("a dangling tag record");

  assert_eq!(tag["tag_name"], "lost-tag");
  assert_eq!(tag["subject"], "lost-tag: forgotten release");
  assert_eq!(tag["author"], "Fixture Bot");
  assert_eq!(tag["parent"].as_str().unwrap(), head);
  assert!(tag["timestamp"]["epoch"].as_i64().unwrap() > 0);
}

#[test]
fn dangling_blob_gets_a_filesystem_timestamp_and_no_author() {
  let repo = common::fixture_repo();
  let v = scan(repo.path(), &[]);

  let blob = v["objects"]
    .as_array()
    .unwrap()
    .iter()
    .find(|o| o["kind"] == "blob")
    .expect("a dangling blob record");

  assert!(blob["timestamp"]["epoch"].as_i64().unwrap() > 0);
  assert!(blob.get("author").is_none());
  assert!(blob.get("subject").is_none());
}
