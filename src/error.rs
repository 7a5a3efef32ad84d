use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that surface to the caller during a scan.
///
/// Unrecognized diagnostic lines and unparseable enrichment output are *not*
/// errors: the former yield no record, the latter leave optional fields unset.
#[derive(Debug, Error)]
pub enum ScanError {
  /// Callers must hand us one non-empty line at a time.
  #[error("empty diagnostic line")]
  EmptyLine,

  #[error("object id is not a 40-character hex digest: {0:?}")]
  MalformedObjectId(String),

  #[error("spawning git {args:?}: {source}")]
  GitSpawn { args: Vec<String>, source: io::Error },

  #[error("git {args:?} failed: {stderr}")]
  GitExit { args: Vec<String>, stderr: String },

  /// A lost blob's loose object file should always exist; a miss here means
  /// the repository itself is damaged, so it is surfaced rather than absorbed.
  #[error("loose object file lookup failed for {path:?}: {source}")]
  ObjectFileLookup { path: PathBuf, source: io::Error },
}
