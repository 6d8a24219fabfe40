//! Icarus Verilog.
//!
//! Two steps: `iverilog` lowers every Verilog source into `sim.vvp` inside the
//! output directory, then `vvp` loads the `gpivpi` module from the library
//! directory and executes it.

use std::path::PathBuf;

use tracing::debug;

use super::{
  BuildError, CommandBuilder, Invocation, SimulatorKind, SourceKind, path_arg, path_args, reject_sources,
  two_token_flags,
};
use crate::config::BuildConfig;
use crate::consts::COCOTB_SIM_DEFINE;

/// Name of the compiled simulation inside the output directory.
pub const SIM_FILE: &str = "sim.vvp";

#[derive(Debug, Clone)]
pub struct Icarus {
  config: BuildConfig,
}

impl Icarus {
  /// Fails if the configuration contains VHDL sources.
  pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
    reject_sources(SimulatorKind::Icarus, &config, SourceKind::Vhdl)?;
    Ok(Self { config })
  }

  pub fn sim_file(&self) -> PathBuf {
    self.config.output_dir().join(SIM_FILE)
  }

  fn compile_command(&self) -> Invocation {
    let config = &self.config;
    let mut args = vec![
      "-o".to_string(),
      path_arg(&self.sim_file()),
      "-D".to_string(),
      COCOTB_SIM_DEFINE.to_string(),
      "-s".to_string(),
      config.toplevel().to_string(),
      "-g2012".to_string(),
    ];
    args.extend(self.define_flags(config.defines()));
    args.extend(self.include_flags(config.include_dirs()));
    args.extend(config.extra_compile_args().iter().cloned());
    args.extend(path_args(config.verilog_sources()));

    Invocation::new("iverilog", args)
  }

  fn run_command(&self) -> Invocation {
    let config = &self.config;
    let mut args = vec![
      "-M".to_string(),
      path_arg(config.lib_dir()),
      "-m".to_string(),
      "gpivpi".to_string(),
    ];
    args.extend(config.extra_run_args().iter().cloned());
    args.push(path_arg(&self.sim_file()));

    Invocation::new("vvp", args)
  }
}

impl CommandBuilder for Icarus {
  fn kind(&self) -> SimulatorKind {
    SimulatorKind::Icarus
  }

  fn config(&self) -> &BuildConfig {
    &self.config
  }

  fn include_flags(&self, dirs: &[PathBuf]) -> Vec<String> {
    two_token_flags("-I", path_args(dirs))
  }

  fn define_flags(&self, defines: &[String]) -> Vec<String> {
    two_token_flags("-D", defines.iter().cloned())
  }

  fn build_commands(&self) -> Result<Vec<Invocation>, BuildError> {
    let commands = vec![self.compile_command(), self.run_command()];
    debug!(simulator = %self.kind(), count = commands.len(), "built commands");
    Ok(commands)
  }
}
