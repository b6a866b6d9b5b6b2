//! Runner configuration
//!
//! Locates the platform test tools and the shell used to invoke them. Precedence, highest first:
//! CLI flags, the `SIMAAI_PT_DIR` environment variable, built-in defaults.

use std::env;
use std::path::PathBuf;

/// Default install location of the platform test tools
pub const DEFAULT_TOOLS_DIR: &str = "/usr/bin/simaai_pt";

/// Default shell for `-c` command execution
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Environment variable overriding the tools directory
pub const TOOLS_DIR_ENV: &str = "SIMAAI_PT_DIR";

pub const MEMORY_TESTER: &str = "ddr_test";
pub const STORAGE_SCRIPT: &str = "emmc_sd_test.sh";
pub const DMA_SCRIPT: &str = "dma_test.sh";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory holding `ddr_test`, `emmc_sd_test.sh` and `dma_test.sh`
    pub tools_dir: PathBuf,
    /// Shell invoked as `<shell> -c <command>`
    pub shell: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tools_dir: PathBuf::from(DEFAULT_TOOLS_DIR),
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the tools directory taken from `SIMAAI_PT_DIR` when set
    pub fn from_env() -> Self {
        Self::from_tools_dir_var(env::var(TOOLS_DIR_ENV).ok())
    }

    fn from_tools_dir_var(value: Option<String>) -> Self {
        match value {
            Some(dir) if !dir.trim().is_empty() => Self::default().with_tools_dir(dir),
            _ => Self::default(),
        }
    }

    /// Set the tools directory
    pub fn with_tools_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tools_dir = dir.into();
        self
    }

    /// Set the shell
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn memory_tester(&self) -> PathBuf {
        self.tools_dir.join(MEMORY_TESTER)
    }

    pub fn storage_script(&self) -> PathBuf {
        self.tools_dir.join(STORAGE_SCRIPT)
    }

    pub fn dma_script(&self) -> PathBuf {
        self.tools_dir.join(DMA_SCRIPT)
    }

    /// Warn (but carry on) when the tools directory is missing; every test will then report Failed.
    pub fn warn_if_missing(&self) {
        if !self.tools_dir.is_dir() {
            tracing::warn!(
                "Tools directory {} does not exist; every test will report Failed",
                self.tools_dir.display()
            );
        }
    }
}
