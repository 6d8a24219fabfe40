use simrun_lib::SimulatorKind;

use crate::output::print_stat;

pub fn cmd_info() {
  println!("Simulators:");
  for kind in SimulatorKind::ALL {
    let kinds = kind
      .source_kinds()
      .iter()
      .map(|k| k.to_string())
      .collect::<Vec<_>>()
      .join(", ");
    print_stat(kind.as_str(), &kinds);
  }
}
