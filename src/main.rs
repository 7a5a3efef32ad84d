use anyhow::{Context, Result};
use clap::Parser;

mod classify;
mod cli;
mod enrich;
mod error;
mod gitio;
mod model;
mod render;
mod util;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: scan the repository for lost objects
  let report = render::run_scan(&cfg)?;

  // Phase 3: emit the report
  let json = serde_json::to_string_pretty(&report)?;
  if cfg.out == "-" {
    println!("{json}");
  } else {
    std::fs::write(&cfg.out, json).with_context(|| format!("writing report to {}", cfg.out))?;
  }

  Ok(())
}
