//! Sequential test driver
//!
//! Walks the plan in order, one process at a time, and hands each outcome to the reporter before the next
//! test starts. A failing test never stops the run; only a reporter I/O error does.

use std::io;

use crate::outcome::TestOutcome;
use crate::plan::{Invocation, TestPlan};
use crate::report::Reporter;
use crate::runner::{CommandExecutor, dma, memory, storage};

/// Run a single invocation through its runner
pub fn run_invocation(executor: &dyn CommandExecutor, invocation: &Invocation) -> TestOutcome {
    match invocation {
        Invocation::Memory(m) => memory::run(executor, m),
        Invocation::Storage(s) => storage::run(executor, s),
        Invocation::Dma(d) => dma::run(executor, d),
    }
}

/// Run every suite of `plan`, printing a banner before each
pub fn run_plan(plan: &TestPlan, executor: &dyn CommandExecutor, reporter: &mut dyn Reporter) -> io::Result<()> {
    for group in &plan.groups {
        tracing::info!(suite = %group.suite, tests = group.invocations.len(), "starting suite");
        reporter.on_suite_start(group.suite)?;

        for invocation in &group.invocations {
            let outcome = run_invocation(executor, invocation);
            tracing::debug!(test = %outcome.label, passed = outcome.verdict.is_pass(), "test complete");
            reporter.on_test_complete(&outcome)?;
        }
    }
    Ok(())
}
