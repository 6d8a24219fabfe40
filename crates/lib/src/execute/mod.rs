//! Sequential execution of simulator invocations.
//!
//! Invocations run strictly one after another in the output directory. Each
//! command line is echoed before it starts, and the first unsuccessful exit
//! aborts the rest of the sequence.

pub mod types;

use std::path::Path;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, info};

use crate::simulator::{CommandBuilder, Invocation, Simulator};

pub use types::{ExecuteConfig, ExecuteError, RunSummary};

/// Build the simulator's commands and run them in its output directory.
pub async fn run(simulator: &Simulator, config: &ExecuteConfig) -> Result<RunSummary, ExecuteError> {
  let invocations = simulator.build_commands()?;
  info!(
    simulator = %simulator.kind(),
    count = invocations.len(),
    "running simulator"
  );
  execute_invocations(&invocations, simulator.config().output_dir(), config).await
}

/// Run `invocations` in order with `cwd` as working directory.
///
/// `cwd` is created if missing. Stops at the first invocation that fails to
/// start or exits unsuccessfully.
pub async fn execute_invocations(
  invocations: &[Invocation],
  cwd: &Path,
  config: &ExecuteConfig,
) -> Result<RunSummary, ExecuteError> {
  let start = Instant::now();
  tokio::fs::create_dir_all(cwd)
    .await
    .map_err(|source| ExecuteError::CreateWorkingDir {
      path: cwd.to_path_buf(),
      source,
    })?;

  for invocation in invocations {
    execute_invocation(invocation, cwd, config).await?;
  }

  Ok(RunSummary {
    commands_run: invocations.len(),
    elapsed: start.elapsed(),
  })
}

async fn execute_invocation(invocation: &Invocation, cwd: &Path, config: &ExecuteConfig) -> Result<(), ExecuteError> {
  let line = invocation.command_line();
  info!(cmd = %line, "executing command");
  if config.echo {
    println!("{}", line);
  }

  let mut command = Command::new(invocation.program());
  command
    .args(invocation.args())
    .current_dir(cwd)
    .envs(invocation.env());

  debug!(working_dir = ?cwd, "spawning process");

  let status = command.status().await.map_err(|source| ExecuteError::Spawn {
    program: invocation.program().to_string(),
    source,
  })?;

  if !status.success() {
    return Err(ExecuteError::ProcessFailure {
      argv: invocation.argv().to_vec(),
      code: status.code(),
    });
  }

  Ok(())
}
