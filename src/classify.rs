use crate::error::ScanError;
use crate::model::{ObjectId, ObjectKind};

/// Result of matching one raw fsck diagnostic line.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
  pub kind: ObjectKind,
  pub id: ObjectId,
  pub raw: String,
}

const HASH_LEN: usize = 40;

/// Classify one diagnostic line.
///
/// Recognized shapes, all anchored at the start of the line:
///
/// ```text
/// dangling <type> <40-hex>[ trailing…]
/// missing <type> <40-hex>[ trailing…]
/// unreachable <type> <40-hex>[ trailing…]
/// warning in tree <40-hex>[ trailing…]
/// ```
///
/// Anything else yields `Ok(None)`: fsck grows new diagnostics faster than we
/// model them, so unrecognized lines are skippable input, never an error.
/// Only an empty line is a caller bug.
pub fn classify_line(line: &str) -> Result<Option<Diagnostic>, ScanError> {
  if line.is_empty() {
    return Err(ScanError::EmptyLine);
  }
  let line = line.trim_end_matches(['\r', '\n']);

  // "warning in tree" carries no type token, but the text names a tree.
  if let Some(rest) = line.strip_prefix("warning in tree ") {
    return Ok(take_id(rest).map(|id| Diagnostic { kind: ObjectKind::Tree, id, raw: line.to_string() }));
  }

  let rest = ["dangling ", "missing ", "unreachable "]
    .iter()
    .find_map(|p| line.strip_prefix(p));
  let Some(rest) = rest else { return Ok(None) };

  let Some((token, rest)) = rest.split_once(' ') else { return Ok(None) };
  let kind = match token {
    "commit" => ObjectKind::Commit,
    "blob" => ObjectKind::Blob,
    "tree" => ObjectKind::Tree,
    "tag" => ObjectKind::Tag,
    // fsck may learn object kinds before we do; keep the record rather than drop it
    _ => ObjectKind::Other,
  };

  Ok(take_id(rest).map(|id| Diagnostic { kind, id, raw: line.to_string() }))
}

// Fixed-width extraction: the first 40 chars must be a lowercase hex digest;
// anything after them on the line is ignored.
fn take_id(s: &str) -> Option<ObjectId> {
  if s.len() < HASH_LEN || !s.is_char_boundary(HASH_LEN) {
    return None;
  }
  ObjectId::parse(&s[..HASH_LEN]).ok()
}
