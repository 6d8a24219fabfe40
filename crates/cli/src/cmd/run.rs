//! Implementation of the `simrun run` command.
//!
//! Builds the simulator commands for a project and runs them one after another
//! in the output directory, stopping at the first failure.

use std::path::Path;

use anyhow::{Context, Result};

use simrun_lib::CommandBuilder;
use simrun_lib::execute::{ExecuteConfig, run};

use crate::config::{Overrides, load_simulator};
use crate::output::{format_duration, print_info, print_success};

pub fn cmd_run(file: &Path, overrides: &Overrides) -> Result<()> {
  let simulator = load_simulator(file, overrides)?;

  print_info(&format!(
    "Running {} in {}",
    simulator.kind(),
    simulator.config().output_dir().display()
  ));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let summary = rt
    .block_on(run(&simulator, &ExecuteConfig::default()))
    .with_context(|| format!("{} run failed", simulator.kind()))?;

  print_success(&format!(
    "{} command(s) completed in {}",
    summary.commands_run,
    format_duration(summary.elapsed)
  ));

  Ok(())
}
