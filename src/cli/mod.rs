//! CLI module for the platform test driver
//!
//! ## Usage
//!
//! - `platform-tests` - run every suite (OCM, DDR, eMMC, SD card, SDMA)
//! - `platform-tests --suite ddr --suite sdma` - run a subset, still in the fixed order
//! - `platform-tests --list` - print the planned command lines without running them
//!
//! ## Exit codes
//!
//! - `0` after every run, however many `Failed` lines it printed; the verdicts are the report
//! - `1` only when the transcript or plan cannot be written to stdout
//! - `2` for argument errors, from clap
//!
//! Command functions return `CliResult<ExitCode>`; `run()` is the single place that exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::RunnerConfig;
use crate::plan::Suite;
use crate::version::PLATFORM_TESTS_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Platform diagnostics driver: OCM/DDR memory, eMMC/SD storage and SDMA tests
#[derive(Parser, Debug)]
#[command(name = "platform-tests")]
#[command(version = PLATFORM_TESTS_VERSION)]
#[command(about = "Run the platform memory, storage and DMA tests", long_about = None)]
pub struct Cli {
    /// Directory holding ddr_test, emmc_sd_test.sh and dma_test.sh (default: $SIMAAI_PT_DIR or /usr/bin/simaai_pt)
    #[arg(long = "tools-dir", value_name = "DIR")]
    pub tools_dir: Option<PathBuf>,

    /// Shell used to run each command line
    #[arg(long, value_name = "PATH")]
    pub shell: Option<PathBuf>,

    /// Only run the given suite(s); may be repeated
    #[arg(long = "suite", value_name = "SUITE", value_enum)]
    pub suites: Vec<Suite>,

    /// Print the planned command lines and exit without running anything
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Resolve the runner configuration: flags, then environment, then defaults
    pub fn config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::from_env();
        if let Some(dir) = &self.tools_dir {
            config = config.with_tools_dir(dir.clone());
        }
        if let Some(shell) = &self.shell {
            config = config.with_shell(shell.clone());
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.config();
    if cli.list {
        return commands::list_plan(&config, &cli.suites);
    }
    commands::run_suites(&config, &cli.suites)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_flags() {
        let cli = Cli::try_parse_from(["platform-tests"]).unwrap();
        assert!(cli.suites.is_empty());
        assert!(!cli.list);
        assert!(cli.tools_dir.is_none());
    }

    #[test]
    fn test_cli_parse_suites() {
        let cli = Cli::try_parse_from(["platform-tests", "--suite", "sd", "--suite", "ocm"]).unwrap();
        assert_eq!(cli.suites, vec![Suite::SdCard, Suite::Ocm]);
    }

    #[test]
    fn test_cli_rejects_unknown_suite() {
        assert!(Cli::try_parse_from(["platform-tests", "--suite", "gpio"]).is_err());
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["platform-tests", "extra"]).is_err());
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "platform-tests",
            "--tools-dir",
            "/opt/pt",
            "--shell",
            "/bin/bash",
            "--list",
        ])
        .unwrap();
        assert!(cli.list);
        let config = cli.config();
        assert_eq!(config.tools_dir, PathBuf::from("/opt/pt"));
        assert_eq!(config.shell, PathBuf::from("/bin/bash"));
    }
}
