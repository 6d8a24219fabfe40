//! Synopsys VCS.
//!
//! Compiles Verilog into `simv` with a generated PLI access table, then runs
//! the executable. The table is referenced by relative name, so it is written
//! into the output directory (the working directory of both steps) first.

use std::path::PathBuf;

use tracing::{debug, warn};

use super::{BuildError, CommandBuilder, Invocation, SimulatorKind, joined_flags, path_arg, path_args, write_artifact};
use crate::config::BuildConfig;
use crate::consts::COCOTB_SIM_DEFINE;

/// PLI access table file name.
pub const PLI_TABLE: &str = "pli.tab";

/// Read/write access on every object for the VPI library.
const PLI_TABLE_CONTENT: &str = "acc+=rw,wn:*";

/// Executable produced by the compile step.
pub const SIM_EXECUTABLE: &str = "simv";

#[derive(Debug, Clone)]
pub struct Vcs {
  config: BuildConfig,
}

impl Vcs {
  pub fn new(config: BuildConfig) -> Self {
    if !config.vhdl_sources().is_empty() {
      warn!(
        count = config.vhdl_sources().len(),
        "vcs compiles Verilog only; VHDL sources are not passed to the compiler"
      );
    }
    Self { config }
  }

  fn compile_command(&self) -> Invocation {
    let config = &self.config;
    let mut args = vec![
      "-full64".to_string(),
      "-debug".to_string(),
      "+vpi".to_string(),
      "-P".to_string(),
      PLI_TABLE.to_string(),
      "-sverilog".to_string(),
      format!("+define+{}", COCOTB_SIM_DEFINE),
      "-load".to_string(),
      path_arg(&config.vpi_library()),
    ];
    args.extend(self.define_flags(config.defines()));
    args.extend(self.include_flags(config.include_dirs()));
    args.extend(config.extra_compile_args().iter().cloned());
    args.extend(path_args(config.verilog_sources()));

    Invocation::new("vcs", args)
  }

  fn run_command(&self) -> Invocation {
    let config = &self.config;
    let simv = path_arg(&config.output_dir().join(SIM_EXECUTABLE));
    let mut args = vec![format!("+define+{}", COCOTB_SIM_DEFINE)];
    args.extend(config.extra_run_args().iter().cloned());

    Invocation::new(simv, args)
  }
}

impl CommandBuilder for Vcs {
  fn kind(&self) -> SimulatorKind {
    SimulatorKind::Vcs
  }

  fn config(&self) -> &BuildConfig {
    &self.config
  }

  fn include_flags(&self, dirs: &[PathBuf]) -> Vec<String> {
    joined_flags("+incdir+", path_args(dirs))
  }

  fn define_flags(&self, defines: &[String]) -> Vec<String> {
    joined_flags("+define+", defines)
  }

  fn build_commands(&self) -> Result<Vec<Invocation>, BuildError> {
    write_artifact(&self.config, PLI_TABLE, PLI_TABLE_CONTENT)?;

    let commands = vec![self.compile_command(), self.run_command()];
    debug!(simulator = %self.kind(), count = commands.len(), "built commands");
    Ok(commands)
  }
}
