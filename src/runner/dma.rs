//! SDMA test runner

use super::{CommandExecutor, ExecRequest};
use crate::outcome::{TestLabel, TestOutcome, Verdict};
use crate::plan::DmaInvocation;

pub const SUMMARY_MARKER: &str = "summary";
pub const ZERO_FAILURES_MARKER: &str = "0 failures";

/// Passed iff the DMA script printed its summary and reported zero failures
pub fn classify(output: &str) -> Verdict {
    if output.contains(SUMMARY_MARKER) && output.contains(ZERO_FAILURES_MARKER) {
        Verdict::Passed
    } else {
        Verdict::Failed
    }
}

pub fn run(executor: &dyn CommandExecutor, invocation: &DmaInvocation) -> TestOutcome {
    match executor.execute(&ExecRequest::new(&invocation.command)) {
        Ok(output) => TestOutcome::new(TestLabel::Dma, classify(&output.combined())),
        Err(e) => {
            tracing::warn!("{}", e);
            TestOutcome::failed(TestLabel::Dma).with_diagnostic(e.to_string())
        }
    }
}
