// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build per-kind enrichment queries, parse their output, and assemble the final lost-object record
// role: record construction/enrichment
// inputs: classified Diagnostic, collaborator seams (GitRunner, TextDecoder, FileMeta), objects dir, tz flag
// outputs: LostObject records; optional fields populated only when the sub-grammar parse succeeds
// side_effects: Delegates command execution and filesystem metadata reads to the injected collaborators
// invariants:
// - commit/tag enrichment is attempted exactly once per record; unparseable output leaves fields unset
// - blobs never issue a command; trees and unrecognized kinds are never enriched
// - a missing blob object file is a hard failure, not a silently unset timestamp
// errors: Propagates command execution and filesystem lookup failures; absorbs sub-grammar mismatches
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::Diagnostic;
use crate::error::ScanError;
use crate::gitio::{FileMeta, GitRunner, TextDecoder};
use crate::model::{LostObject, ObjectId, ObjectKind, Timestamp};
use crate::util::{iso_in_tz, short_sha};

// Unit separator: cannot occur in commit subjects, unlike spaces and tabs.
const FIELD_SEP: char = '\u{1f}';

pub struct Enricher<'a> {
  pub runner: &'a dyn GitRunner,
  pub decoder: &'a dyn TextDecoder,
  pub meta: &'a dyn FileMeta,
  pub objects_dir: &'a Path,
  pub tz_local: bool,
}

impl Enricher<'_> {
  /// Build the final record for one classified diagnostic.
  ///
  /// Enrichment output that fails its sub-grammar leaves the optional fields
  /// unset and still returns the record; command execution and filesystem
  /// lookup failures are surfaced to the caller.
  pub fn build(&self, diag: Diagnostic) -> Result<LostObject, ScanError> {
    let mut obj = LostObject {
      kind: diag.kind,
      short_id: short_sha(diag.id.as_str()),
      id: diag.id,
      raw: diag.raw,
      parent: None,
      author: None,
      subject: None,
      timestamp: None,
      tag_name: None,
    };

    match obj.kind {
      ObjectKind::Commit => {
        let raw = self.runner.run(&commit_log_args(&obj.id))?;
        if let Some(f) = parse_commit_line(&self.decoder.decode(&raw)) {
          obj.parent = f.parent;
          obj.author = Some(f.author);
          obj.subject = Some(f.subject);
          obj.timestamp = Some(self.timestamp(f.epoch));
        }
      }
      ObjectKind::Tag => {
        let raw = self.runner.run(&tag_dump_args(&obj.id))?;
        if let Some(f) = parse_tag_dump(&self.decoder.decode(&raw)) {
          obj.parent = Some(f.object);
          obj.author = Some(f.tagger);
          obj.subject = Some(format!("{}: {}", f.name, f.message));
          obj.timestamp = Some(self.timestamp(f.epoch));
          obj.tag_name = Some(f.name);
        }
      }
      ObjectKind::Blob => {
        // No command for blobs: only the loose object file's creation time.
        let path = loose_object_path(self.objects_dir, &obj.id);
        let created = self.meta.created(&path)?;
        obj.timestamp = Some(self.timestamp(epoch_of(created)));
      }
      ObjectKind::Tree | ObjectKind::Other => {}
    }

    Ok(obj)
  }

  fn timestamp(&self, epoch: i64) -> Timestamp {
    Timestamp { epoch, local: iso_in_tz(epoch, self.tz_local) }
  }
}

struct CommitFields {
  author: String,
  subject: String,
  epoch: i64,
  parent: Option<String>,
}

fn commit_log_args(id: &ObjectId) -> Vec<String> {
  vec![
    // log.showSignature=true would prepend gpg lines to the response and
    // defeat the single-line grammar for signed commits
    "-c".into(),
    "log.showSignature=false".into(),
    "log".into(),
    "-n1".into(),
    format!("--pretty=format:%aN{0}%s{0}%at{0}%P", FIELD_SEP),
    id.as_str().into(),
  ]
}

// One line: author ␟ subject ␟ epoch ␟ parents (space-separated, empty for a
// root commit). All-or-nothing: a malformed response leaves every field unset
// rather than producing a half-filled record.
fn parse_commit_line(response: &str) -> Option<CommitFields> {
  let line = response.lines().next().unwrap_or("");
  let mut it = line.split(FIELD_SEP);
  let author = it.next()?;
  let subject = it.next()?;
  let date = it.next()?;
  if author.is_empty() || date.is_empty() || !date.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let epoch: i64 = date.parse().ok()?;
  let parent = it
    .next()
    .and_then(|p| p.split_whitespace().next())
    .map(str::to_string);
  Some(CommitFields {
    author: author.to_string(),
    subject: subject.to_string(),
    epoch,
    parent,
  })
}

struct TagFields {
  object: String,
  name: String,
  tagger: String,
  epoch: i64,
  message: String,
}

fn tag_dump_args(id: &ObjectId) -> Vec<String> {
  vec!["cat-file".into(), "tag".into(), id.as_str().into()]
}

// object <hash> / type <token> / tag <name> / tagger <who> <email> <epoch> <zone>,
// then a blank line and the message body.
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?s)^object ([0-9a-f]{40})\ntype [a-z]+\ntag ([^\n]+)\ntagger ([^\n]+) <[^\n>]*> (\d+)[^\n]*\n\n(.*)$",
  )
  .unwrap()
});

fn parse_tag_dump(dump: &str) -> Option<TagFields> {
  let c = TAG_RE.captures(dump)?;
  Some(TagFields {
    object: c[1].to_string(),
    name: c[2].to_string(),
    tagger: c[3].trim().to_string(),
    epoch: c[4].parse().ok()?,
    message: c[5].trim_end().to_string(),
  })
}

fn loose_object_path(objects_dir: &Path, id: &ObjectId) -> PathBuf {
  let (dir, file) = id.split_loose();
  objects_dir.join(dir).join(file)
}

fn epoch_of(t: SystemTime) -> i64 {
  t.duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}
