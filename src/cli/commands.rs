//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use crate::config::RunnerConfig;
use crate::driver;
use crate::plan::{Suite, TestPlan};
use crate::report::ConsoleReporter;
use crate::runner::ShellExecutor;

use super::{CliError, CliResult, ExitCode};

/// Run the selected suites (all of them when `suites` is empty) against the real tools.
///
/// Verdicts go to stdout; the exit code is success whatever they say.
pub fn run_suites(config: &RunnerConfig, suites: &[Suite]) -> CliResult<ExitCode> {
    config.warn_if_missing();

    let plan = TestPlan::standard(config).only(suites);
    let executor = ShellExecutor::from_config(config);
    let mut reporter = ConsoleReporter::stdout();

    driver::run_plan(&plan, &executor, &mut reporter)
        .map_err(|e| CliError::failure(format!("Error writing test report: {}", e)))?;

    Ok(ExitCode::SUCCESS)
}

/// Print the planned command lines for the selected suites.
pub fn list_plan(config: &RunnerConfig, suites: &[Suite]) -> CliResult<ExitCode> {
    let plan = TestPlan::standard(config).only(suites);
    ConsoleReporter::stdout()
        .write_plan(&plan)
        .map_err(|e| CliError::failure(format!("Error writing test plan: {}", e)))?;
    Ok(ExitCode::SUCCESS)
}
