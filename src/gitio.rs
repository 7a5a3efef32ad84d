use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::ScanError;

/// Runs one repository query and returns its raw stdout bytes.
///
/// Output stays as bytes on purpose: repository text (author names, messages)
/// carries no encoding guarantee, so decoding is a separate concern behind
/// [`TextDecoder`].
pub trait GitRunner {
  fn run(&self, args: &[String]) -> Result<Vec<u8>, ScanError>;
}

/// Re-encodes raw repository text for display, whatever its source encoding.
pub trait TextDecoder {
  fn decode(&self, raw: &[u8]) -> String;
}

/// Filesystem metadata lookups for loose object files.
pub trait FileMeta {
  fn created(&self, path: &Path) -> Result<SystemTime, ScanError>;
}

pub struct SystemGit {
  repo: String,
}

impl SystemGit {
  pub fn new(repo: &str) -> Self {
    SystemGit { repo: repo.to_string() }
  }
}

impl GitRunner for SystemGit {
  fn run(&self, args: &[String]) -> Result<Vec<u8>, ScanError> {
    let out = Command::new("git")
      .args(args)
      .current_dir(&self.repo)
      .output()
      .map_err(|e| ScanError::GitSpawn { args: args.to_vec(), source: e })?;

    if out.status.success() {
      Ok(out.stdout)
    } else {
      Err(ScanError::GitExit {
        args: args.to_vec(),
        stderr: String::from_utf8_lossy(&out.stderr).to_string(),
      })
    }
  }
}

pub struct LossyUtf8;

impl TextDecoder for LossyUtf8 {
  fn decode(&self, raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_string()
  }
}

pub struct DiskMeta;

impl FileMeta for DiskMeta {
  fn created(&self, path: &Path) -> Result<SystemTime, ScanError> {
    let lookup_err = |e| ScanError::ObjectFileLookup { path: path.to_path_buf(), source: e };
    let meta = std::fs::metadata(path).map_err(lookup_err)?;
    // btime is unavailable on some filesystems; mtime stands in there
    meta.created().or_else(|_| meta.modified()).map_err(lookup_err)
  }
}

/// Run `git fsck` with the selected reachability options and return stdout.
///
/// fsck exits nonzero whenever it finds problems, which is exactly the case we
/// are scanning for, so the exit status is not checked; only a failure to
/// spawn the process is an error.
pub fn fsck_output(repo: &str, unreachable: bool, full: bool, no_reflogs: bool) -> anyhow::Result<String> {
  let mut args: Vec<String> = vec!["fsck".into()];
  if unreachable {
    args.push("--unreachable".into());
  }
  if full {
    args.push("--full".into());
  }
  if no_reflogs {
    args.push("--no-reflogs".into());
  }
  let out = Command::new("git")
    .args(&args)
    .current_dir(repo)
    .output()
    .with_context(|| format!("spawning git {:?}", args))?;

  Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

/// Resolve the repository's loose-object directory via `rev-parse --git-path`.
pub fn objects_dir(runner: &dyn GitRunner, repo: &str) -> Result<PathBuf, ScanError> {
  let raw = runner.run(&["rev-parse".into(), "--git-path".into(), "objects".into()])?;
  let text = String::from_utf8_lossy(&raw);
  let p = PathBuf::from(text.trim());
  if p.is_absolute() {
    Ok(p)
  } else {
    // --git-path answers relative to the repo we ran in
    Ok(Path::new(repo).join(p))
  }
}
