//! Memory-tester runner (OCM and DDR suites)
//!
//! The memory tester's exit status is not reliable, so only its output decides: either the
//! `Pattern Loaded` marker, or for the performance run a `Total bytes: <N>` report. A run that exits
//! non-zero but prints the marker passes.

use std::sync::LazyLock;

use regex::Regex;

use super::{CommandExecutor, ExecRequest};
use crate::outcome::{TestLabel, TestOutcome, Verdict};
use crate::plan::{MemoryCheck, MemoryInvocation};

/// Printed by the memory tester when a pattern was written (and read back) without error
pub const PATTERN_LOADED: &str = "Pattern Loaded";

static TOTAL_BYTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total bytes\s*:\s*(\d+)").expect("INVARIANT: valid total bytes regex"));

/// Byte count reported by a performance run, verbatim
pub fn extract_total_bytes(output: &str) -> Option<&str> {
    TOTAL_BYTES
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Judge memory-tester output
pub fn classify(output: &str, check: MemoryCheck) -> Verdict {
    match check {
        MemoryCheck::TotalBytes => match extract_total_bytes(output) {
            Some(bytes) => Verdict::TotalBytes(bytes.to_string()),
            None => Verdict::Failed,
        },
        MemoryCheck::Marker => {
            if output.contains(PATTERN_LOADED) {
                Verdict::Passed
            } else {
                Verdict::Failed
            }
        }
    }
}

/// Run one memory-tester command and judge its combined stdout/stderr
pub fn run(executor: &dyn CommandExecutor, invocation: &MemoryInvocation) -> TestOutcome {
    let label = TestLabel::Memory {
        category: invocation.category,
        index: invocation.index,
    };

    match executor.execute(&ExecRequest::new(&invocation.command)) {
        Ok(output) => TestOutcome::new(label, classify(&output.combined(), invocation.check)),
        Err(e) => {
            tracing::warn!("{}", e);
            TestOutcome::failed(label).with_diagnostic(e.to_string())
        }
    }
}
