// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define lost-object records and the report JSON model shared by classification, enrichment, and rendering
// role: model/types
// outputs: Serializable structs with stable field names; validated ObjectId newtype
// invariants: ObjectId is always exactly 40 lowercase hex chars; optional record fields serialize only when set
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ObjectKind {
  Commit,
  Blob,
  Tree,
  Tag,
  Other,
}

impl ObjectKind {
  pub fn label(self) -> &'static str {
    match self {
      ObjectKind::Commit => "commit",
      ObjectKind::Blob => "blob",
      ObjectKind::Tree => "tree",
      ObjectKind::Tag => "tag",
      ObjectKind::Other => "other",
    }
  }
}

/// A full 40-character lowercase hex object id, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
  pub fn parse(s: &str) -> Result<Self, ScanError> {
    let ok = s.len() == 40 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if ok {
      Ok(ObjectId(s.to_string()))
    } else {
      Err(ScanError::MalformedObjectId(s.to_string()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Loose-object layout: the first two chars name the fan-out directory,
  /// the remaining 38 name the file.
  pub fn split_loose(&self) -> (&str, &str) {
    (&self.0[..2], &self.0[2..])
  }
}

impl fmt::Display for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Epoch seconds plus the RFC3339 rendering in the configured timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
  pub epoch: i64,
  pub local: String,
}

/// One lost object, reconstructed from a single fsck diagnostic line.
///
/// Classifier-derived fields (`kind`, `id`, `short_id`, `raw`) are always
/// present; the rest are filled by enrichment when the follow-up query output
/// parses, and stay unset otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostObject {
  pub kind: ObjectKind,
  pub id: ObjectId,
  pub short_id: String,
  pub raw: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subject: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<Timestamp>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tag_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanOptions {
  pub unreachable: bool,
  pub full: bool,
  pub no_reflogs: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
  pub repo: String,
  pub generated_at: String,
  pub count: usize,
  pub kinds: BTreeMap<String, i64>,
  pub scan_options: ScanOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
  pub summary: Summary,
  pub objects: Vec<LostObject>,
}
