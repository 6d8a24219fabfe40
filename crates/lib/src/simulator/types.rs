//! Types shared by every simulator command builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of HDL source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
  Verilog,
  Vhdl,
}

impl fmt::Display for SourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SourceKind::Verilog => f.write_str("Verilog"),
      SourceKind::Vhdl => f.write_str("VHDL"),
    }
  }
}

/// The closed set of supported simulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatorKind {
  /// Icarus Verilog (`iverilog` + `vvp`).
  #[serde(alias = "iverilog")]
  Icarus,
  /// Mentor Questa/ModelSim, driven through a generated do-script.
  #[serde(alias = "modelsim")]
  Questa,
  /// Cadence Incisive (`irun`).
  #[serde(alias = "irun")]
  Ius,
  /// Synopsys VCS.
  Vcs,
  /// GHDL.
  Ghdl,
}

impl SimulatorKind {
  pub const ALL: [SimulatorKind; 5] = [
    SimulatorKind::Icarus,
    SimulatorKind::Questa,
    SimulatorKind::Ius,
    SimulatorKind::Vcs,
    SimulatorKind::Ghdl,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      SimulatorKind::Icarus => "icarus",
      SimulatorKind::Questa => "questa",
      SimulatorKind::Ius => "ius",
      SimulatorKind::Vcs => "vcs",
      SimulatorKind::Ghdl => "ghdl",
    }
  }

  /// Source kinds the simulator compiles.
  pub fn source_kinds(&self) -> &'static [SourceKind] {
    match self {
      SimulatorKind::Icarus | SimulatorKind::Vcs => &[SourceKind::Verilog],
      SimulatorKind::Questa | SimulatorKind::Ius => &[SourceKind::Verilog, SourceKind::Vhdl],
      SimulatorKind::Ghdl => &[SourceKind::Vhdl],
    }
  }
}

impl fmt::Display for SimulatorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown simulator: {0} (expected one of icarus, questa, ius, vcs, ghdl)")]
pub struct ParseSimulatorError(pub String);

impl FromStr for SimulatorKind {
  type Err = ParseSimulatorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "icarus" | "iverilog" => Ok(SimulatorKind::Icarus),
      "questa" | "modelsim" => Ok(SimulatorKind::Questa),
      "ius" | "irun" => Ok(SimulatorKind::Ius),
      "vcs" => Ok(SimulatorKind::Vcs),
      "ghdl" => Ok(SimulatorKind::Ghdl),
      _ => Err(ParseSimulatorError(s.to_string())),
    }
  }
}

/// Errors raised while constructing a simulator or producing its commands.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The configuration lists sources the simulator cannot compile.
  #[error("{simulator} does not support {kind} sources")]
  UnsupportedSourceKind { simulator: SimulatorKind, kind: SourceKind },

  /// A generated file (do-script, PLI table) could not be written.
  #[error("failed to write {}: {source}", path.display())]
  WriteArtifact {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// One process to spawn: its argument vector and the environment overrides
/// that must be in place when it starts.
///
/// `argv` always holds at least the program name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  argv: Vec<String>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  env: BTreeMap<String, String>,
}

impl Invocation {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut argv = vec![program.into()];
    argv.extend(args.into_iter().map(Into::into));
    Self {
      argv,
      env: BTreeMap::new(),
    }
  }

  /// Add an environment override for this invocation only.
  pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  /// Program followed by its arguments.
  pub fn argv(&self) -> &[String] {
    &self.argv
  }

  pub fn env(&self) -> &BTreeMap<String, String> {
    &self.env
  }

  pub fn program(&self) -> &str {
    &self.argv[0]
  }

  pub fn args(&self) -> &[String] {
    &self.argv[1..]
  }

  /// Render as a single line for echoing, environment overrides first.
  pub fn command_line(&self) -> String {
    self
      .env
      .iter()
      .map(|(k, v)| format!("{}={}", k, v))
      .chain(self.argv.iter().cloned())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.command_line())
  }
}
