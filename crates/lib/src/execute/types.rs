//! Types for running simulator invocations.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::simulator::BuildError;

/// Errors that can occur while building or running a command sequence.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The simulator could not produce its commands.
  #[error(transparent)]
  Build(#[from] BuildError),

  /// An invocation exited unsuccessfully. `code` is `None` when the process
  /// was terminated by a signal.
  #[error("command failed with {}: {}", exit_description(*code), argv.join(" "))]
  ProcessFailure { argv: Vec<String>, code: Option<i32> },

  /// The program could not be started at all.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The working directory could not be created.
  #[error("failed to create working directory {}: {source}", path.display())]
  CreateWorkingDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

fn exit_description(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "termination by signal".to_string(),
  }
}

/// Configuration for command execution.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
  /// Print each command line to stdout before it is spawned.
  pub echo: bool,
}

impl Default for ExecuteConfig {
  fn default() -> Self {
    Self { echo: true }
  }
}

/// Outcome of a fully successful command sequence.
#[derive(Debug, Clone)]
pub struct RunSummary {
  pub commands_run: usize,
  pub elapsed: Duration,
}
