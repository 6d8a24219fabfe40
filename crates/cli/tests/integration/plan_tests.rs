//! Tests for `simrun plan` across simulators.

use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestEnv;

fn plan_json(env: &TestEnv, extra: &[&str]) -> Value {
  let output = env
    .simrun_cmd()
    .arg("plan")
    .arg(&env.project_path)
    .args(["--output", "json"])
    .args(extra)
    .output()
    .unwrap();
  assert!(
    output.status.success(),
    "plan failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).unwrap()
}

fn argv(command: &Value) -> Vec<String> {
  command["argv"]
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v.as_str().unwrap().to_string())
    .collect()
}

fn path_str(path: &std::path::Path) -> String {
  path.to_string_lossy().into_owned()
}

#[test]
fn icarus_plan_compiles_then_runs() {
  let env = TestEnv::from_fixture("icarus.toml");
  let root = env.root();
  let sim_file = path_str(&env.output_path().join("sim.vvp"));

  let json = plan_json(&env, &[]);
  let commands = json["commands"].as_array().unwrap();

  assert_eq!(json["simulator"], "icarus");
  assert_eq!(commands.len(), 2);
  assert_eq!(
    argv(&commands[0]),
    vec![
      "iverilog".to_string(),
      "-o".to_string(),
      sim_file.clone(),
      "-D".to_string(),
      "COCOTB_SIM=1".to_string(),
      "-s".to_string(),
      "tb_top".to_string(),
      "-g2012".to_string(),
      "-D".to_string(),
      "WIDTH=8".to_string(),
      "-I".to_string(),
      path_str(&root.join("include")),
      path_str(&root.join("rtl").join("counter.v")),
      path_str(&root.join("tb").join("tb_top.v")),
    ]
  );
  assert_eq!(
    argv(&commands[1]),
    vec![
      "vvp".to_string(),
      "-M".to_string(),
      path_str(&root.join("libs")),
      "-m".to_string(),
      "gpivpi".to_string(),
      sim_file,
    ]
  );
  assert!(commands[0].get("env").is_none());
}

#[test]
fn icarus_plan_text_numbers_commands() {
  let env = TestEnv::from_fixture("icarus.toml");

  env
    .simrun_cmd()
    .arg("plan")
    .arg(&env.project_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("Plan for icarus"))
    .stdout(predicate::str::contains("1. iverilog -o "))
    .stdout(predicate::str::contains("2. vvp -M"));
}

#[test]
fn icarus_rejects_vhdl_sources() {
  let env = TestEnv::from_fixture("icarus_vhdl.toml");

  env
    .simrun_cmd()
    .arg("plan")
    .arg(&env.project_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("icarus does not support VHDL sources"));
}

#[test]
fn questa_plan_writes_do_script() {
  let env = TestEnv::from_fixture("questa_mixed.toml");

  let json = plan_json(&env, &[]);
  let commands = json["commands"].as_array().unwrap();
  let do_file = env.output_path().join("runsim.do");

  assert_eq!(commands.len(), 1);
  assert_eq!(
    argv(&commands[0]),
    vec!["vsim".to_string(), "-c".to_string(), "-do".to_string(), path_str(&do_file)]
  );
  assert_eq!(commands[0]["env"]["GPI_EXTRA"], "fli");

  let script = std::fs::read_to_string(&do_file).unwrap();
  let vcom = script.find("vcom").unwrap();
  let vlog = script.find("vlog").unwrap();
  assert!(vcom < vlog);
  assert!(script.contains("+define+FOO"));
  assert!(script.contains("-foreign {cocotb_init "));
  assert!(script.trim_end().ends_with("quit"));
}

#[test]
fn ius_plan_is_single_irun() {
  let env = TestEnv::from_fixture("ius.toml");

  let json = plan_json(&env, &[]);
  let commands = json["commands"].as_array().unwrap();
  let args = argv(&commands[0]);
  let vpi = path_str(&env.root().join("libs").join("libvpi.so"));

  assert_eq!(commands.len(), 1);
  assert_eq!(args[0], "irun");
  assert!(args.contains(&format!("{}:vlog_startup_routines_bootstrap", vpi)));
  assert_eq!(args.last().unwrap(), &path_str(&env.root().join("rtl").join("top.sv")));
  assert_eq!(commands[0]["env"]["GPI_EXTRA"], "vhpi");
}

#[test]
fn vcs_plan_writes_pli_table() {
  let env = TestEnv::from_fixture("vcs.toml");

  let json = plan_json(&env, &[]);
  let commands = json["commands"].as_array().unwrap();
  let simv = path_str(&env.output_path().join("simv"));

  assert_eq!(commands.len(), 2);
  assert_eq!(argv(&commands[0])[0], "vcs");
  assert_eq!(
    argv(&commands[1]),
    vec![simv, "+define+COCOTB_SIM=1".to_string(), "+ntb_random_seed=1".to_string()]
  );
  assert_eq!(
    std::fs::read_to_string(env.output_path().join("pli.tab")).unwrap(),
    "acc+=rw,wn:*"
  );
}

#[test]
fn ghdl_plan_analyses_each_source() {
  let env = TestEnv::from_fixture("ghdl.toml");

  let json = plan_json(&env, &[]);
  let commands = json["commands"].as_array().unwrap();

  assert_eq!(commands.len(), 5);
  for (command, file) in commands.iter().zip(["pkg.vhd", "core.vhd", "tb_top.vhd"]) {
    let args = argv(command);
    assert_eq!(&args[..3], &["ghdl", "--std=08", "-a"]);
    assert!(args[3].ends_with(file));
  }
  assert_eq!(argv(&commands[3]), vec!["ghdl", "--std=08", "-e", "tb_top"]);
  assert_eq!(argv(&commands[4])[..3], ["ghdl", "-r", "tb_top"]);
}

#[test]
fn simulator_flag_overrides_project() {
  let env = TestEnv::from_fixture("icarus.toml");

  let json = plan_json(&env, &["--simulator", "vcs"]);

  assert_eq!(json["simulator"], "vcs");
  assert_eq!(argv(&json["commands"][0])[0], "vcs");
}

#[test]
fn lib_dir_flag_overrides_project() {
  let env = TestEnv::from_fixture("icarus.toml");
  let libs = env.root().join("other-libs");

  let json = plan_json(&env, &["--lib-dir", &path_str(&libs)]);

  assert_eq!(argv(&json["commands"][1])[2], path_str(&libs));
}

#[test]
fn lib_dir_falls_back_to_environment() {
  let env = TestEnv::from_fixture("icarus_vhdl.toml");
  std::fs::write(
    &env.project_path,
    "simulator = \"icarus\"\ntoplevel = \"tb\"\nlib_ext = \"so\"\n",
  )
  .unwrap();
  let libs = env.root().join("env-libs");

  let output = env
    .simrun_cmd()
    .env("SIMRUN_LIB_DIR", &libs)
    .arg("plan")
    .arg(&env.project_path)
    .args(["-o", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(argv(&json["commands"][1])[2], path_str(&libs));
}

#[test]
fn missing_lib_dir_names_environment_variable() {
  let env = TestEnv::from_fixture("icarus_vhdl.toml");
  std::fs::write(&env.project_path, "simulator = \"icarus\"\ntoplevel = \"tb\"\n").unwrap();

  env
    .simrun_cmd()
    .arg("plan")
    .arg(&env.project_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("SIMRUN_LIB_DIR"));
}
