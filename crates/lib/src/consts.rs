/// Application name, used for the binary and the project file.
pub const APP_NAME: &str = "simrun";

/// Default project file looked up by the CLI.
pub const PROJECT_FILE: &str = "simrun.toml";

/// Environment variable read by the cosimulation library at load time to pick
/// its foreign-language interface.
pub const GPI_EXTRA_ENV: &str = "GPI_EXTRA";

/// Define injected into every compile so HDL can detect cosimulation.
pub const COCOTB_SIM_DEFINE: &str = "COCOTB_SIM=1";

/// Output directory used when none is configured, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "sim_build";
