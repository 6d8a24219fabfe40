//! Build configuration shared by every simulator.
//!
//! A [`BuildConfig`] is the uniform description of one simulation build:
//! the toplevel, the HDL sources, include directories, defines and extra flags,
//! plus where the cosimulation libraries live. It is assembled through
//! [`BuildConfigBuilder`] and is immutable afterwards.
//!
//! # Path invariant
//!
//! All paths held by a built configuration are absolute and valid UTF-8.
//! Relative sources, include directories, the output directory and the
//! library directory are resolved against the working directory exactly once,
//! in [`BuildConfigBuilder::build`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_OUTPUT_DIR;
use crate::paths::{absolutize, absolutize_all};

/// HDL of the toplevel design unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToplevelLang {
  #[default]
  Verilog,
  Vhdl,
}

impl ToplevelLang {
  pub fn as_str(&self) -> &'static str {
    match self {
      ToplevelLang::Verilog => "verilog",
      ToplevelLang::Vhdl => "vhdl",
    }
  }
}

impl fmt::Display for ToplevelLang {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ToplevelLang {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "verilog" => Ok(ToplevelLang::Verilog),
      "vhdl" => Ok(ToplevelLang::Vhdl),
      _ => Err(ConfigError::UnknownLanguage(s.to_string())),
    }
  }
}

/// Errors raised while assembling a [`BuildConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  /// The working directory anchors every other path and must be absolute.
  #[error("working directory must be absolute: {0}")]
  RelativeWorkingDir(PathBuf),

  #[error("toplevel name must not be empty")]
  EmptyToplevel,

  #[error("library directory is not set")]
  MissingLibDir,

  #[error("unknown toplevel language: {0} (expected verilog or vhdl)")]
  UnknownLanguage(String),

  /// Simulator arguments are strings, so every path must be valid UTF-8.
  #[error("path is not valid UTF-8: {}", .0.display())]
  NonUtf8Path(PathBuf),
}

/// Immutable description of one simulation build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
  working_dir: PathBuf,
  output_dir: PathBuf,
  lib_dir: PathBuf,
  lib_ext: String,
  toplevel: String,
  toplevel_lang: ToplevelLang,
  verilog_sources: Vec<PathBuf>,
  vhdl_sources: Vec<PathBuf>,
  include_dirs: Vec<PathBuf>,
  defines: Vec<String>,
  extra_compile_args: Vec<String>,
  extra_run_args: Vec<String>,
  extensions: BTreeMap<String, serde_json::Value>,
}

impl BuildConfig {
  /// Start building a configuration for `toplevel`, anchored at `working_dir`.
  pub fn builder(working_dir: impl Into<PathBuf>, toplevel: impl Into<String>) -> BuildConfigBuilder {
    BuildConfigBuilder::new(working_dir.into(), toplevel.into())
  }

  pub fn working_dir(&self) -> &Path {
    &self.working_dir
  }

  /// Directory the simulator runs in and where generated files are written.
  pub fn output_dir(&self) -> &Path {
    &self.output_dir
  }

  pub fn lib_dir(&self) -> &Path {
    &self.lib_dir
  }

  /// Shared library suffix without the dot (`so`, `dylib`, `dll`).
  pub fn lib_ext(&self) -> &str {
    &self.lib_ext
  }

  pub fn toplevel(&self) -> &str {
    &self.toplevel
  }

  pub fn toplevel_lang(&self) -> ToplevelLang {
    self.toplevel_lang
  }

  pub fn verilog_sources(&self) -> &[PathBuf] {
    &self.verilog_sources
  }

  pub fn vhdl_sources(&self) -> &[PathBuf] {
    &self.vhdl_sources
  }

  pub fn include_dirs(&self) -> &[PathBuf] {
    &self.include_dirs
  }

  /// `NAME` or `NAME=VALUE` entries, in insertion order.
  pub fn defines(&self) -> &[String] {
    &self.defines
  }

  pub fn extra_compile_args(&self) -> &[String] {
    &self.extra_compile_args
  }

  pub fn extra_run_args(&self) -> &[String] {
    &self.extra_run_args
  }

  /// Simulator-specific attribute, interpreted only by the matching simulator.
  pub fn extension(&self, name: &str) -> Option<&serde_json::Value> {
    self.extensions.get(name)
  }

  pub fn extensions(&self) -> &BTreeMap<String, serde_json::Value> {
    &self.extensions
  }

  /// Path of the VPI flavour of the cosimulation library.
  pub fn vpi_library(&self) -> PathBuf {
    self.library("vpi")
  }

  /// Path of the FLI flavour of the cosimulation library.
  pub fn fli_library(&self) -> PathBuf {
    self.library("fli")
  }

  fn library(&self, flavour: &str) -> PathBuf {
    self.lib_dir.join(format!("lib{}.{}", flavour, self.lib_ext))
  }
}

/// Builder for [`BuildConfig`].
///
/// Paths may be given relative; they are resolved in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct BuildConfigBuilder {
  working_dir: PathBuf,
  toplevel: String,
  toplevel_lang: ToplevelLang,
  output_dir: Option<PathBuf>,
  lib_dir: Option<PathBuf>,
  lib_ext: Option<String>,
  verilog_sources: Vec<PathBuf>,
  vhdl_sources: Vec<PathBuf>,
  include_dirs: Vec<PathBuf>,
  defines: Vec<String>,
  extra_compile_args: Vec<String>,
  extra_run_args: Vec<String>,
  extensions: BTreeMap<String, serde_json::Value>,
}

impl BuildConfigBuilder {
  fn new(working_dir: PathBuf, toplevel: String) -> Self {
    Self {
      working_dir,
      toplevel,
      toplevel_lang: ToplevelLang::default(),
      output_dir: None,
      lib_dir: None,
      lib_ext: None,
      verilog_sources: Vec::new(),
      vhdl_sources: Vec::new(),
      include_dirs: Vec::new(),
      defines: Vec::new(),
      extra_compile_args: Vec::new(),
      extra_run_args: Vec::new(),
      extensions: BTreeMap::new(),
    }
  }

  pub fn toplevel_lang(mut self, lang: ToplevelLang) -> Self {
    self.toplevel_lang = lang;
    self
  }

  pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.output_dir = Some(dir.into());
    self
  }

  pub fn lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.lib_dir = Some(dir.into());
    self
  }

  /// Accepts the suffix with or without a leading dot.
  pub fn lib_ext(mut self, ext: impl Into<String>) -> Self {
    let ext = ext.into();
    self.lib_ext = Some(ext.trim_start_matches('.').to_string());
    self
  }

  pub fn verilog_sources<I, P>(mut self, sources: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.verilog_sources.extend(sources.into_iter().map(Into::into));
    self
  }

  pub fn vhdl_sources<I, P>(mut self, sources: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.vhdl_sources.extend(sources.into_iter().map(Into::into));
    self
  }

  pub fn include_dirs<I, P>(mut self, dirs: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.include_dirs.extend(dirs.into_iter().map(Into::into));
    self
  }

  pub fn defines<I, S>(mut self, defines: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.defines.extend(defines.into_iter().map(Into::into));
    self
  }

  pub fn extra_compile_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.extra_compile_args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn extra_run_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.extra_run_args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Attach a simulator-specific attribute. Later values replace earlier ones.
  pub fn extension(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.extensions.insert(name.into(), value.into());
    self
  }

  pub fn extensions(mut self, extensions: BTreeMap<String, serde_json::Value>) -> Self {
    self.extensions.extend(extensions);
    self
  }

  /// Validate and resolve every path against the working directory.
  pub fn build(self) -> Result<BuildConfig, ConfigError> {
    if !self.working_dir.is_absolute() {
      return Err(ConfigError::RelativeWorkingDir(self.working_dir));
    }
    if self.toplevel.trim().is_empty() {
      return Err(ConfigError::EmptyToplevel);
    }
    let lib_dir = self.lib_dir.ok_or(ConfigError::MissingLibDir)?;

    let base = self.working_dir.as_path();
    let output_dir = self
      .output_dir
      .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let config = BuildConfig {
      output_dir: absolutize(base, &output_dir),
      lib_dir: absolutize(base, &lib_dir),
      lib_ext: self
        .lib_ext
        .unwrap_or_else(|| std::env::consts::DLL_EXTENSION.to_string()),
      toplevel: self.toplevel,
      toplevel_lang: self.toplevel_lang,
      verilog_sources: absolutize_all(base, &self.verilog_sources),
      vhdl_sources: absolutize_all(base, &self.vhdl_sources),
      include_dirs: absolutize_all(base, &self.include_dirs),
      defines: self.defines,
      extra_compile_args: self.extra_compile_args,
      extra_run_args: self.extra_run_args,
      extensions: self.extensions,
      working_dir: self.working_dir,
    };
    config.check_utf8()?;
    Ok(config)
  }
}

impl BuildConfig {
  fn check_utf8(&self) -> Result<(), ConfigError> {
    let paths = [&self.working_dir, &self.output_dir, &self.lib_dir]
      .into_iter()
      .chain(&self.verilog_sources)
      .chain(&self.vhdl_sources)
      .chain(&self.include_dirs);
    for path in paths {
      if path.to_str().is_none() {
        return Err(ConfigError::NonUtf8Path(path.clone()));
      }
    }
    Ok(())
  }
}
