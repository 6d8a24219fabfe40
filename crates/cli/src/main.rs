mod cmd;
mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use simrun_lib::SimulatorKind;
use simrun_lib::consts::{APP_NAME, PROJECT_FILE};

use crate::config::Overrides;
use crate::output::{OutputFormat, print_error};

/// simrun - build and run HDL simulator command lines
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct SelectArgs {
  /// Project file describing the build
  #[arg(default_value = PROJECT_FILE)]
  project: PathBuf,

  /// Simulator to use, overriding the project file
  #[arg(short, long)]
  simulator: Option<SimulatorKind>,

  /// Directory holding the cosimulation libraries
  #[arg(long)]
  lib_dir: Option<PathBuf>,
}

impl SelectArgs {
  fn overrides(&self) -> Overrides {
    Overrides {
      simulator: self.simulator,
      lib_dir: self.lib_dir.clone(),
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Show the commands a project would run, without running them
  Plan {
    #[command(flatten)]
    select: SelectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Build and run the simulation
  Run {
    #[command(flatten)]
    select: SelectArgs,
  },

  /// List supported simulators
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match dispatch(cli.command) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn dispatch(command: Commands) -> Result<()> {
  match command {
    Commands::Plan { select, output } => cmd::cmd_plan(&select.project, &select.overrides(), output),
    Commands::Run { select } => cmd::cmd_run(&select.project, &select.overrides()),
    Commands::Info => {
      cmd::cmd_info();
      Ok(())
    }
  }
}
