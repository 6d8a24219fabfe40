//! GHDL.
//!
//! GHDL analyses one file per invocation and resolves dependencies in the
//! order files are analysed, so each VHDL source gets its own `ghdl -a` in
//! configuration order. Elaboration and the run with the VPI library follow.

use std::path::PathBuf;

use tracing::{debug, warn};

use super::{
  BuildError, CommandBuilder, Invocation, SimulatorKind, SourceKind, path_arg, path_args, reject_sources,
  two_token_flags,
};
use crate::config::BuildConfig;

#[derive(Debug, Clone)]
pub struct Ghdl {
  config: BuildConfig,
}

impl Ghdl {
  /// Fails if the configuration contains Verilog sources.
  pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
    reject_sources(SimulatorKind::Ghdl, &config, SourceKind::Verilog)?;
    Ok(Self { config })
  }

  fn analyze_commands(&self) -> Vec<Invocation> {
    self
      .config
      .vhdl_sources()
      .iter()
      .map(|source| {
        let mut args = self.config.extra_compile_args().to_vec();
        args.push("-a".to_string());
        args.push(path_arg(source));
        Invocation::new("ghdl", args)
      })
      .collect()
  }

  fn elaborate_command(&self) -> Invocation {
    let mut args = self.config.extra_compile_args().to_vec();
    args.push("-e".to_string());
    args.push(self.config.toplevel().to_string());
    Invocation::new("ghdl", args)
  }

  fn run_command(&self) -> Invocation {
    let config = &self.config;
    let mut args = vec![
      "-r".to_string(),
      config.toplevel().to_string(),
      format!("--vpi={}", path_arg(&config.vpi_library())),
    ];
    args.extend(config.extra_run_args().iter().cloned());
    Invocation::new("ghdl", args)
  }
}

impl CommandBuilder for Ghdl {
  fn kind(&self) -> SimulatorKind {
    SimulatorKind::Ghdl
  }

  fn config(&self) -> &BuildConfig {
    &self.config
  }

  fn include_flags(&self, dirs: &[PathBuf]) -> Vec<String> {
    two_token_flags("-I", path_args(dirs))
  }

  /// Always empty. Defines are not forwarded to GHDL; whether `-D NAME` pairs
  /// should be emitted is still open (DESIGN.md, open questions).
  fn define_flags(&self, defines: &[String]) -> Vec<String> {
    if !defines.is_empty() {
      warn!(count = defines.len(), "ghdl ignores preprocessor defines");
    }
    Vec::new()
  }

  fn build_commands(&self) -> Result<Vec<Invocation>, BuildError> {
    let mut commands = self.analyze_commands();
    commands.push(self.elaborate_command());
    commands.push(self.run_command());
    debug!(simulator = %self.kind(), count = commands.len(), "built commands");
    Ok(commands)
  }
}
