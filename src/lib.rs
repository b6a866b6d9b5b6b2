#![forbid(unsafe_code)]
//! Platform diagnostics driver
//!
//! Runs the board's external test tools (the OCM/DDR memory tester, the eMMC/SD storage script and the
//! SDMA script) in a fixed order, captures their console output and prints one Passed/Failed verdict line
//! per test.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a programming error (a constant regex failing to compile),
//!   use `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;
pub mod config;
pub mod driver;
pub mod outcome;
pub mod plan;
pub mod report;
pub mod runner;
pub mod version;

pub use config::RunnerConfig;
pub use driver::run_plan;
pub use outcome::{TestLabel, TestOutcome, Verdict};
pub use plan::{Invocation, Suite, TestPlan};
pub use report::{ConsoleReporter, Reporter};
pub use runner::{CapturedOutput, CommandExecutor, ExecError, ScriptedExecutor, ShellExecutor};
