//! Project file loading.
//!
//! A project file (`simrun.toml` by default) describes one simulation build.
//! Relative paths inside it are resolved against the directory that contains
//! the file. Values given on the command line take precedence over the file,
//! and `SIMRUN_LIB_DIR` fills in the library directory when neither sets it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use simrun_lib::{BuildConfig, ConfigError, Simulator, SimulatorKind, ToplevelLang};

/// Environment variable consulted for the library directory.
pub const LIB_DIR_ENV: &str = "SIMRUN_LIB_DIR";

/// Contents of a project file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
  pub simulator: Option<SimulatorKind>,
  pub toplevel: String,
  #[serde(default)]
  pub toplevel_lang: ToplevelLang,
  #[serde(default)]
  pub verilog_sources: Vec<PathBuf>,
  #[serde(default)]
  pub vhdl_sources: Vec<PathBuf>,
  #[serde(default)]
  pub include_dirs: Vec<PathBuf>,
  #[serde(default)]
  pub defines: Vec<String>,
  #[serde(default)]
  pub extra_compile_args: Vec<String>,
  #[serde(default)]
  pub extra_run_args: Vec<String>,
  pub output_dir: Option<PathBuf>,
  pub lib_dir: Option<PathBuf>,
  pub lib_ext: Option<String>,
  #[serde(default)]
  pub extensions: BTreeMap<String, serde_json::Value>,
}

/// Command-line values that take precedence over the project file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub simulator: Option<SimulatorKind>,
  pub lib_dir: Option<PathBuf>,
}

impl ProjectFile {
  pub fn parse(content: &str) -> Result<Self> {
    toml::from_str(content).context("Failed to parse project file")
  }

  pub fn load(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read project file: {}", path.display()))?;
    Self::parse(&content).with_context(|| format!("Invalid project file: {}", path.display()))
  }

  /// Pick the simulator and build the configuration anchored at `working_dir`.
  pub fn resolve(self, working_dir: &Path, overrides: &Overrides) -> Result<(SimulatorKind, BuildConfig)> {
    let Some(simulator) = overrides.simulator.or(self.simulator) else {
      bail!("No simulator selected: set `simulator` in the project file or pass --simulator");
    };

    let lib_dir = overrides.lib_dir.clone().or(self.lib_dir).or_else(|| {
      std::env::var_os(LIB_DIR_ENV).map(PathBuf::from).inspect(|dir| {
        debug!(lib_dir = %dir.display(), "library directory taken from {}", LIB_DIR_ENV);
      })
    });

    let mut builder = BuildConfig::builder(working_dir, self.toplevel)
      .toplevel_lang(self.toplevel_lang)
      .verilog_sources(self.verilog_sources)
      .vhdl_sources(self.vhdl_sources)
      .include_dirs(self.include_dirs)
      .defines(self.defines)
      .extra_compile_args(self.extra_compile_args)
      .extra_run_args(self.extra_run_args)
      .extensions(self.extensions);
    if let Some(dir) = self.output_dir {
      builder = builder.output_dir(dir);
    }
    if let Some(dir) = lib_dir {
      builder = builder.lib_dir(dir);
    }
    if let Some(ext) = self.lib_ext {
      builder = builder.lib_ext(ext);
    }

    let config = match builder.build() {
      Err(ConfigError::MissingLibDir) => bail!(
        "{}: set `lib_dir`, pass --lib-dir or export {}",
        ConfigError::MissingLibDir,
        LIB_DIR_ENV
      ),
      other => other.context("Invalid build configuration")?,
    };
    debug!(
      simulator = %simulator,
      toplevel = config.toplevel(),
      output_dir = %config.output_dir().display(),
      "resolved project"
    );
    Ok((simulator, config))
  }
}

/// Load the project file at `path` and bind it to its simulator.
pub fn load_simulator(path: &Path, overrides: &Overrides) -> Result<Simulator> {
  let path = std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))?;
  let working_dir = path
    .parent()
    .map(Path::to_path_buf)
    .context("Project file has no parent directory")?;

  let project = ProjectFile::load(&path)?;
  debug!(path = %path.display(), "loaded project file");
  let (kind, config) = project.resolve(&working_dir, overrides)?;
  Simulator::new(kind, config).with_context(|| format!("Cannot use {} for this project", kind))
}
