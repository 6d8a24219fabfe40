//! Mentor Questa / ModelSim.
//!
//! Questa is driven by a generated do-script rather than a flat argument list.
//! The script analyses VHDL with `vcom` and Verilog with `vlog`, elaborates and
//! loads the cosimulation library with `vsim`, logs every signal and runs to
//! completion. The only process spawned is `vsim -c -do runsim.do`.
//!
//! Every value taken from the configuration is passed through
//! [`tcl_quote`](crate::quote::tcl_quote) before it is spliced into the script.

use std::path::PathBuf;

use tracing::debug;

use super::{BuildError, CommandBuilder, Invocation, SimulatorKind, joined_flags, path_arg, path_args, write_artifact};
use crate::config::{BuildConfig, ToplevelLang};
use crate::consts::GPI_EXTRA_ENV;
use crate::quote::{tcl_join, tcl_quote};

/// File name of the generated do-script.
pub const DO_FILE: &str = "runsim.do";

/// Foreign interface selected when VHDL is analysed.
pub const GPI_EXTRA: &str = "fli";

const PREAMBLE: &str = "# Autogenerated file
onerror {
  quit -f -code 1
}
";

const TRAILER: &str = "log -recursive /*
onbreak resume
run -all
quit
";

#[derive(Debug, Clone)]
pub struct Questa {
  config: BuildConfig,
}

impl Questa {
  pub fn new(config: BuildConfig) -> Self {
    Self { config }
  }

  /// Render the complete do-script for the configuration.
  pub fn script(&self) -> String {
    let config = &self.config;
    let mut script = String::from(PREAMBLE);

    if !config.vhdl_sources().is_empty() {
      script.push_str(&self.analysis_line("vcom -mixedsvvh +define+COCOTB_SIM", config.vhdl_sources()));
    }

    if !config.verilog_sources().is_empty() {
      script.push_str(&self.analysis_line(
        "vlog -mixedsvvh +define+COCOTB_SIM -sv",
        config.verilog_sources(),
      ));
    }

    let load = match config.toplevel_lang() {
      ToplevelLang::Vhdl => {
        let foreign = format!("cocotb_init {}", path_arg(&config.fli_library()));
        format!("-foreign {}", tcl_quote(&foreign))
      }
      ToplevelLang::Verilog => format!("-pli {}", tcl_quote(&path_arg(&config.vpi_library()))),
    };
    script.push_str(&line(
      &format!("vsim -onfinish exit {}", load),
      config
        .extra_run_args()
        .iter()
        .cloned()
        .chain([config.toplevel().to_string()]),
    ));

    script.push_str(TRAILER);
    script
  }

  fn analysis_line(&self, command: &str, sources: &[PathBuf]) -> String {
    let config = &self.config;
    let words = self
      .define_flags(config.defines())
      .into_iter()
      .chain(self.include_flags(config.include_dirs()))
      .chain(config.extra_compile_args().iter().cloned())
      .chain(path_args(sources));
    line(command, words)
  }
}

/// `command` followed by the quoted `words`, newline-terminated.
fn line<I>(command: &str, words: I) -> String
where
  I: IntoIterator<Item = String>,
{
  let words = tcl_join(words);
  if words.is_empty() {
    format!("{}\n", command)
  } else {
    format!("{} {}\n", command, words)
  }
}

impl CommandBuilder for Questa {
  fn kind(&self) -> SimulatorKind {
    SimulatorKind::Questa
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
    let script = self.script();
    debug!(script = %script, "generated do-script");
    let do_file = write_artifact(&self.config, DO_FILE, &script)?;

    let mut command = Invocation::new("vsim", ["-c".to_string(), "-do".to_string(), path_arg(&do_file)]);
    if !self.config.vhdl_sources().is_empty() {
      command = command.with_env(GPI_EXTRA_ENV, GPI_EXTRA);
    }
    debug!(simulator = %self.kind(), "built commands");
    Ok(vec![command])
  }
}
