//! simrun-lib: command generation for HDL simulators
//!
//! This crate turns one uniform build description into the command sequence
//! a particular simulator needs:
//! - `BuildConfig`: toplevel, sources, includes, defines and extra flags
//! - `Simulator`: one command builder per supported tool
//! - `Invocation`: a process to spawn, with its environment overrides
//! - `execute`: runs invocations in order, stopping at the first failure

pub mod config;
pub mod consts;
pub mod execute;
pub mod paths;
pub mod quote;
pub mod simulator;

pub use config::{BuildConfig, BuildConfigBuilder, ConfigError, ToplevelLang};
pub use simulator::{BuildError, CommandBuilder, Invocation, Simulator, SimulatorKind, SourceKind};
