//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

use simrun_lib::consts::PROJECT_FILE;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own project directory with its own output directory and
/// a private `bin/` for fake simulator executables.
pub struct TestEnv {
  pub temp: TempDir,
  pub project_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file.
  ///
  /// Copies the fixture content to a temporary `simrun.toml` file.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let project_path = root.join(PROJECT_FILE);
    std::fs::write(&project_path, fixture_content(name)).unwrap();
    Self { temp, project_path }
  }

  /// Project directory, canonicalized.
  pub fn root(&self) -> &Path {
    self.project_path.parent().unwrap()
  }

  /// Default output directory of the project.
  pub fn output_path(&self) -> PathBuf {
    self.root().join("sim_build")
  }

  /// Directory holding fake simulator executables.
  pub fn bin_path(&self) -> PathBuf {
    let p = self.root().join("bin");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  /// File the fake executables append their invocations to.
  pub fn log_path(&self) -> PathBuf {
    self.root().join("invocations.log")
  }

  /// Lines recorded by fake executables, empty if none ran.
  pub fn logged(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Install an executable shell script named `name` into `bin_path()`.
  ///
  /// `body` runs after a line recording `$0`'s basename and its arguments has
  /// been appended to `log_path()`.
  #[cfg(unix)]
  pub fn fake_tool(&self, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = self.bin_path().join(name);
    let script = format!(
      "#!/bin/sh\necho \"$(basename \"$0\") $*\" >> \"$SIMRUN_TEST_LOG\"\n{}\n",
      body
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Get a pre-configured Command for the simrun binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `PATH`: `bin_path()` ahead of the inherited search path
  /// - `SIMRUN_TEST_LOG`: Where fake executables record their invocations
  /// - `SIMRUN_LIB_DIR`: Removed so only the project file decides
  pub fn simrun_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("simrun");
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![self.bin_path()];
    paths.extend(std::env::split_paths(&inherited));
    cmd.env("PATH", std::env::join_paths(paths).unwrap());
    cmd.env("SIMRUN_TEST_LOG", self.log_path());
    cmd.env_remove("SIMRUN_LIB_DIR");
    cmd
  }
}
