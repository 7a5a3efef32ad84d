// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, time formatting, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; epoch seconds; paths; clap CommandFactory
// outputs: Canonicalized paths, formatted timestamps, man page text
// side_effects: canonicalize_lossy touches the filesystem to resolve paths
// invariants:
// - short_sha never panics on short input
// - iso_in_tz output is RFC3339 with second precision; out-of-range epochs render as the raw number
// errors: render_man_page bubbles IO errors; canonicalize_lossy never fails
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, SecondsFormat, TimeZone, Utc};
use clap::CommandFactory;

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// Generates a short 12-character id from a full one.
pub fn short_sha(full: &str) -> String {
  full.chars().take(12).collect()
}

/// Formats a Unix epoch timestamp into an RFC3339 string, local or UTC.
///
/// Corrupt objects can carry timestamps outside chrono's representable range;
/// those render as the raw epoch number instead.
pub fn iso_in_tz(epoch: i64, tz_local: bool) -> String {
  let dt = if tz_local {
    Local.timestamp_opt(epoch, 0).single().map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
  } else {
    Utc.timestamp_opt(epoch, 0).single().map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
  };
  dt.unwrap_or_else(|| epoch.to_string())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
