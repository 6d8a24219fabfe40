//! Tests for `simrun run` against fake simulator executables.
//!
//! The fakes are shell scripts placed first on `PATH`; they record each
//! invocation so the order and environment of spawned processes can be
//! checked without a real simulator installed.

#![cfg(unix)]

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn icarus_run_compiles_then_simulates() {
  let env = TestEnv::from_fixture("icarus.toml");
  env.fake_tool("iverilog", "exit 0");
  env.fake_tool("vvp", "exit 0");

  env
    .simrun_cmd()
    .arg("run")
    .arg(&env.project_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("iverilog -o "))
    .stdout(predicate::str::contains("2 command(s) completed"));

  let sim_file = env.output_path().join("sim.vvp");
  let logged = env.logged();
  assert_eq!(logged.len(), 2);
  assert_eq!(
    logged[0].split(' ').take(3).collect::<Vec<_>>(),
    vec!["iverilog", "-o", sim_file.to_str().unwrap()]
  );
  assert!(logged[0].contains("-D COCOTB_SIM=1 -s tb_top -g2012 -D WIDTH=8"));
  assert!(logged[1].starts_with("vvp -M "));
  assert!(logged[1].ends_with(&format!("-m gpivpi {}", sim_file.display())));
}

#[test]
fn run_uses_output_dir_as_working_directory() {
  let env = TestEnv::from_fixture("icarus.toml");
  env.fake_tool("iverilog", "pwd -P >> \"$SIMRUN_TEST_LOG\"");
  env.fake_tool("vvp", "exit 0");

  env.simrun_cmd().arg("run").arg(&env.project_path).assert().success();

  let logged = env.logged();
  let cwd = dunce::canonicalize(env.output_path()).unwrap();
  assert_eq!(logged[1], cwd.to_string_lossy());
}

#[test]
fn failed_compile_stops_the_run() {
  let env = TestEnv::from_fixture("icarus.toml");
  env.fake_tool("iverilog", "exit 3");
  env.fake_tool("vvp", "exit 0");

  env
    .simrun_cmd()
    .arg("run")
    .arg(&env.project_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("icarus run failed"))
    .stderr(predicate::str::contains("exit code 3"));

  let logged = env.logged();
  assert_eq!(logged.len(), 1);
  assert!(logged[0].starts_with("iverilog"));
}

#[test]
fn questa_run_passes_gpi_extra() {
  let env = TestEnv::from_fixture("questa_mixed.toml");
  env.fake_tool("vsim", "echo \"GPI_EXTRA=$GPI_EXTRA\" >> \"$SIMRUN_TEST_LOG\"");

  env.simrun_cmd().arg("run").arg(&env.project_path).assert().success();

  let logged = env.logged();
  assert!(logged[0].starts_with("vsim -c -do "));
  assert!(logged[0].ends_with("runsim.do"));
  assert_eq!(logged[1], "GPI_EXTRA=fli");
  assert!(env.output_path().join("runsim.do").is_file());
}

#[test]
fn ius_run_passes_vhpi() {
  let env = TestEnv::from_fixture("ius.toml");
  env.fake_tool("irun", "echo \"GPI_EXTRA=$GPI_EXTRA\" >> \"$SIMRUN_TEST_LOG\"");

  env.simrun_cmd().arg("run").arg(&env.project_path).assert().success();

  assert_eq!(env.logged()[1], "GPI_EXTRA=vhpi");
}

#[test]
fn ghdl_run_executes_every_step() {
  let env = TestEnv::from_fixture("ghdl.toml");
  env.fake_tool("ghdl", "exit 0");

  env
    .simrun_cmd()
    .arg("run")
    .arg(&env.project_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("5 command(s) completed"));

  let logged = env.logged();
  assert_eq!(logged.len(), 5);
  assert!(logged[3].ends_with("-e tb_top"));
  assert!(logged[4].starts_with("ghdl -r tb_top --vpi="));
}

#[test]
fn missing_simulator_executable_fails() {
  let env = TestEnv::from_fixture("ghdl.toml");
  std::fs::write(
    &env.project_path,
    "simulator = \"ghdl\"\ntoplevel = \"tb\"\nlib_dir = \"libs\"\n",
  )
  .unwrap();

  env
    .simrun_cmd()
    .env("PATH", env.bin_path())
    .arg("run")
    .arg(&env.project_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to spawn ghdl"));
}
