//! Implementation of the `simrun plan` command.
//!
//! Builds the simulator commands for a project without running them. Generated
//! files (do-script, PLI table) are still written so the plan can be inspected
//! or run by hand.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use simrun_lib::{CommandBuilder, Invocation, SimulatorKind};

use crate::config::{Overrides, load_simulator};
use crate::output::{OutputFormat, print_command, print_info, print_json, print_stat};

#[derive(Serialize)]
struct PlanOutput<'a> {
  simulator: SimulatorKind,
  output_dir: &'a Path,
  commands: &'a [Invocation],
}

pub fn cmd_plan(file: &Path, overrides: &Overrides, output: OutputFormat) -> Result<()> {
  let simulator = load_simulator(file, overrides)?;
  let commands = simulator
    .build_commands()
    .with_context(|| format!("Failed to build {} commands", simulator.kind()))?;

  if output.is_json() {
    return print_json(&PlanOutput {
      simulator: simulator.kind(),
      output_dir: simulator.config().output_dir(),
      commands: &commands,
    });
  }

  print_info(&format!("Plan for {}", simulator.kind()));
  print_stat("Toplevel", simulator.config().toplevel());
  print_stat("Output", &simulator.config().output_dir().display().to_string());
  for (index, command) in commands.iter().enumerate() {
    print_command(index + 1, &command.command_line());
  }

  Ok(())
}
