use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Local;

use crate::classify;
use crate::cli::{EffectiveConfig, Tz};
use crate::enrich::Enricher;
use crate::gitio::{self, DiskMeta, LossyUtf8, SystemGit};
use crate::model::{LostObject, Report, ScanOptions, Summary};

/// Run fsck over the configured repository and assemble the report: classify
/// every diagnostic line, enrich the records that match, count per kind.
pub fn run_scan(cfg: &EffectiveConfig) -> Result<Report> {
  let runner = SystemGit::new(&cfg.repo);
  let decoder = LossyUtf8;
  let meta = DiskMeta;
  let objects_dir = gitio::objects_dir(&runner, &cfg.repo)?;
  let enricher = Enricher {
    runner: &runner,
    decoder: &decoder,
    meta: &meta,
    objects_dir: &objects_dir,
    tz_local: matches!(cfg.tz, Tz::Local),
  };

  let raw = gitio::fsck_output(&cfg.repo, cfg.unreachable, cfg.full, cfg.no_reflogs)?;

  let mut objects: Vec<LostObject> = Vec::new();
  let mut kinds: BTreeMap<String, i64> = BTreeMap::new();

  for line in raw.lines() {
    if line.is_empty() {
      continue;
    }
    let diag = match classify::classify_line(line)? {
      Some(d) => d,
      None => {
        if cfg.verbose {
          eprintln!("[fsck] skipping unrecognized line: {line}");
        }
        continue;
      }
    };
    if !cfg.kinds.is_empty() && !cfg.kinds.contains(&diag.kind) {
      continue;
    }
    let obj = enricher.build(diag)?;
    *kinds.entry(obj.kind.label().to_string()).or_insert(0) += 1;
    objects.push(obj);
  }

  Ok(Report {
    summary: Summary {
      repo: cfg.repo.clone(),
      generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
      count: objects.len(),
      kinds,
      scan_options: ScanOptions {
        unreachable: cfg.unreachable,
        full: cfg.full,
        no_reflogs: cfg.no_reflogs,
      },
    },
    objects,
  })
}
