//! Cadence Incisive (`irun`).
//!
//! A single 64-bit `irun` invocation compiles, elaborates and runs a mixed
//! language design. The cosimulation library is loaded through its VPI
//! bootstrap symbol; `GPI_EXTRA=vhpi` tells it to bring up VHPI as well.

use std::path::PathBuf;

use tracing::debug;

use super::{BuildError, CommandBuilder, Invocation, SimulatorKind, path_arg, path_args, two_token_flags};
use crate::config::BuildConfig;
use crate::consts::{COCOTB_SIM_DEFINE, GPI_EXTRA_ENV};

/// Entry point appended to the VPI library path in `-loadvpi`.
const VPI_BOOTSTRAP: &str = "vlog_startup_routines_bootstrap";

/// Foreign interface selected for `irun`.
pub const GPI_EXTRA: &str = "vhpi";

#[derive(Debug, Clone)]
pub struct Ius {
  config: BuildConfig,
}

impl Ius {
  pub fn new(config: BuildConfig) -> Self {
    Self { config }
  }
}

impl CommandBuilder for Ius {
  fn kind(&self) -> SimulatorKind {
    SimulatorKind::Ius
  }

  fn config(&self) -> &BuildConfig {
    &self.config
  }

  fn include_flags(&self, dirs: &[PathBuf]) -> Vec<String> {
    two_token_flags("-incdir", path_args(dirs))
  }

  fn define_flags(&self, defines: &[String]) -> Vec<String> {
    two_token_flags("-define", defines.iter().cloned())
  }

  fn build_commands(&self) -> Result<Vec<Invocation>, BuildError> {
    let config = &self.config;
    let loadvpi = format!("{}:{}", path_arg(&config.vpi_library()), VPI_BOOTSTRAP);

    let mut args = vec![
      "-64".to_string(),
      "-define".to_string(),
      COCOTB_SIM_DEFINE.to_string(),
      "-loadvpi".to_string(),
      loadvpi,
      "-plinowarn".to_string(),
      "-access".to_string(),
      "+rwc".to_string(),
      "-top".to_string(),
      config.toplevel().to_string(),
    ];
    args.extend(self.define_flags(config.defines()));
    args.extend(self.include_flags(config.include_dirs()));
    args.extend(config.extra_compile_args().iter().cloned());
    args.extend(config.extra_run_args().iter().cloned());
    args.extend(path_args(config.verilog_sources()));
    args.extend(path_args(config.vhdl_sources()));

    let command = Invocation::new("irun", args).with_env(GPI_EXTRA_ENV, GPI_EXTRA);
    debug!(simulator = %self.kind(), "built commands");
    Ok(vec![command])
  }
}
