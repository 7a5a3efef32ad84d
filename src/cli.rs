use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::ObjectKind;
use crate::util;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Tz {
  Local,
  Utc,
}

#[derive(Parser, Debug)]
#[command(
    name = "git-lost-object-report",
    version,
    about = "Scan a Git repository for lost (dangling/unreachable) objects and export them to JSON",
    long_about = None
)]
pub struct Cli {
  /// Path to a Git repository (default: current dir)
  #[arg(long, default_value = ".")]
  pub repo: PathBuf,

  /// Also report unreachable objects, not only dangling ones
  #[arg(long)]
  pub unreachable: bool,

  /// Check all object directories, not just the reachable closure
  #[arg(long)]
  pub full: bool,

  /// Ignore reflog entries when computing reachability
  #[arg(long)]
  pub no_reflogs: bool,

  /// Keep only records of these kinds (repeatable); default: all kinds
  #[arg(long = "kind", value_enum)]
  pub kinds: Vec<ObjectKind>,

  /// Timezone for local ISO timestamps in output (label only)
  #[arg(long, value_enum, default_value_t = Tz::Local)]
  pub tz: Tz,

  /// Output file path (default stdout "-")
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Note skipped/unrecognized fsck lines on stderr
  #[arg(long)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub repo: String, // absolute path for stability
  pub unreachable: bool,
  pub full: bool,
  pub no_reflogs: bool,
  pub kinds: Vec<ObjectKind>,
  pub tz: Tz,
  pub out: String,
  pub verbose: bool,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let repo = util::canonicalize_lossy(&cli.repo);

  let mut kinds = cli.kinds;
  kinds.sort();
  kinds.dedup();

  Ok(EffectiveConfig {
    repo,
    unreachable: cli.unreachable,
    full: cli.full,
    no_reflogs: cli.no_reflogs,
    kinds,
    tz: cli.tz,
    out: cli.out,
    verbose: cli.verbose,
  })
}
