//! Simulator command builders.
//!
//! Each supported simulator turns one [`BuildConfig`] into the ordered list of
//! processes that compile, elaborate and run the design. The set of simulators
//! is closed: [`Simulator`] has one variant per tool and dispatches the
//! [`CommandBuilder`] contract with an exhaustive match.
//!
//! # Variants
//!
//! - [`Icarus`] - Verilog only, compile to `sim.vvp` then run with `vvp`
//! - [`Questa`] - mixed language, driven by a generated `runsim.do` script
//! - [`Ius`] - mixed language, single `irun` invocation
//! - [`Vcs`] - Verilog, compile with a `pli.tab` access table then run `simv`
//! - [`Ghdl`] - VHDL, one analysis per file, then elaborate and run
//!
//! # Environment
//!
//! Some tools need `GPI_EXTRA` set so the cosimulation library picks the right
//! foreign interface. Builders never touch the process environment; they attach
//! the override to the [`Invocation`] that needs it.

mod ghdl;
mod icarus;
mod ius;
mod questa;
mod types;
mod vcs;

pub use ghdl::Ghdl;
pub use icarus::Icarus;
pub use ius::Ius;
pub use questa::Questa;
pub use types::*;
pub use vcs::Vcs;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildConfig;

/// The contract every simulator implements.
pub trait CommandBuilder {
  fn kind(&self) -> SimulatorKind;

  /// The configuration the commands are built from.
  fn config(&self) -> &BuildConfig;

  /// Tool-specific flags for include search directories.
  fn include_flags(&self, dirs: &[PathBuf]) -> Vec<String>;

  /// Tool-specific flags for preprocessor defines, in input order.
  fn define_flags(&self, defines: &[String]) -> Vec<String>;

  /// Produce the invocations to run, in order.
  ///
  /// Auxiliary files the commands depend on are (re)written into the output
  /// directory as a side effect.
  fn build_commands(&self) -> Result<Vec<Invocation>, BuildError>;
}

/// A command builder for one of the supported simulators.
#[derive(Debug, Clone)]
pub enum Simulator {
  Icarus(Icarus),
  Questa(Questa),
  Ius(Ius),
  Vcs(Vcs),
  Ghdl(Ghdl),
}

impl Simulator {
  /// Bind `config` to the simulator `kind`.
  ///
  /// Fails with [`BuildError::UnsupportedSourceKind`] when the configuration
  /// carries sources the simulator cannot compile.
  pub fn new(kind: SimulatorKind, config: BuildConfig) -> Result<Self, BuildError> {
    Ok(match kind {
      SimulatorKind::Icarus => Simulator::Icarus(Icarus::new(config)?),
      SimulatorKind::Questa => Simulator::Questa(Questa::new(config)),
      SimulatorKind::Ius => Simulator::Ius(Ius::new(config)),
      SimulatorKind::Vcs => Simulator::Vcs(Vcs::new(config)),
      SimulatorKind::Ghdl => Simulator::Ghdl(Ghdl::new(config)?),
    })
  }
}

impl CommandBuilder for Simulator {
  fn kind(&self) -> SimulatorKind {
    match self {
      Simulator::Icarus(s) => s.kind(),
      Simulator::Questa(s) => s.kind(),
      Simulator::Ius(s) => s.kind(),
      Simulator::Vcs(s) => s.kind(),
      Simulator::Ghdl(s) => s.kind(),
    }
  }

  fn config(&self) -> &BuildConfig {
    match self {
      Simulator::Icarus(s) => s.config(),
      Simulator::Questa(s) => s.config(),
      Simulator::Ius(s) => s.config(),
      Simulator::Vcs(s) => s.config(),
      Simulator::Ghdl(s) => s.config(),
    }
  }

  fn include_flags(&self, dirs: &[PathBuf]) -> Vec<String> {
    match self {
      Simulator::Icarus(s) => s.include_flags(dirs),
      Simulator::Questa(s) => s.include_flags(dirs),
      Simulator::Ius(s) => s.include_flags(dirs),
      Simulator::Vcs(s) => s.include_flags(dirs),
      Simulator::Ghdl(s) => s.include_flags(dirs),
    }
  }

  fn define_flags(&self, defines: &[String]) -> Vec<String> {
    match self {
      Simulator::Icarus(s) => s.define_flags(defines),
      Simulator::Questa(s) => s.define_flags(defines),
      Simulator::Ius(s) => s.define_flags(defines),
      Simulator::Vcs(s) => s.define_flags(defines),
      Simulator::Ghdl(s) => s.define_flags(defines),
    }
  }

  fn build_commands(&self) -> Result<Vec<Invocation>, BuildError> {
    match self {
      Simulator::Icarus(s) => s.build_commands(),
      Simulator::Questa(s) => s.build_commands(),
      Simulator::Ius(s) => s.build_commands(),
      Simulator::Vcs(s) => s.build_commands(),
      Simulator::Ghdl(s) => s.build_commands(),
    }
  }
}

/// Fail if `config` carries any sources of `kind`.
pub(crate) fn reject_sources(
  simulator: SimulatorKind,
  config: &BuildConfig,
  kind: SourceKind,
) -> Result<(), BuildError> {
  let present = match kind {
    SourceKind::Verilog => !config.verilog_sources().is_empty(),
    SourceKind::Vhdl => !config.vhdl_sources().is_empty(),
  };
  if present {
    return Err(BuildError::UnsupportedSourceKind { simulator, kind });
  }
  Ok(())
}

/// Paths in a built configuration are valid UTF-8, so this is lossless for
/// them and for anything joined onto them.
pub(crate) fn path_arg(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}

pub(crate) fn path_args(paths: &[PathBuf]) -> Vec<String> {
  paths.iter().map(|p| path_arg(p)).collect()
}

/// `flag value flag value ...`, as in `-I dir -I dir`.
pub(crate) fn two_token_flags<I, S>(flag: &str, values: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  values
    .into_iter()
    .flat_map(|v| [flag.to_string(), v.into()])
    .collect()
}

/// `prefixvalue prefixvalue ...`, as in `+incdir+dir +incdir+dir`.
pub(crate) fn joined_flags<I, S>(prefix: &str, values: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  values
    .into_iter()
    .map(|v| format!("{}{}", prefix, v.as_ref()))
    .collect()
}

/// Overwrite `name` inside the output directory with `content`.
pub(crate) fn write_artifact(config: &BuildConfig, name: &str, content: &str) -> Result<PathBuf, BuildError> {
  let path = config.output_dir().join(name);
  fs::create_dir_all(config.output_dir())
    .and_then(|_| fs::write(&path, content))
    .map_err(|source| BuildError::WriteArtifact {
      path: path.clone(),
      source,
    })?;
  info!(path = %path.display(), "wrote simulator artifact");
  Ok(path)
}
