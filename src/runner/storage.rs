//! Storage test runner (eMMC and SD card)
//!
//! The storage script is interactive: it asks for a device and then a test number. Both answers are
//! written to its stdin up front. Exit status is authoritative, except that the write-throughput test
//! additionally has to report a `Throughput: <N> MB/s` figure.

use std::sync::LazyLock;

use regex::Regex;

use super::{CapturedOutput, CommandExecutor, ExecRequest};
use crate::outcome::{TestLabel, TestOutcome, Verdict};
use crate::plan::StorageInvocation;

static THROUGHPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Throughput: \s*([\d.]+)\s*MB/s").expect("INVARIANT: valid throughput regex")
});

/// Write throughput (MB/s) reported by the storage script, verbatim
pub fn extract_throughput(output: &str) -> Option<&str> {
    THROUGHPUT
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Judge a finished storage-script run
pub fn classify(output: &CapturedOutput, reports_throughput: bool) -> Verdict {
    if !output.success() {
        return Verdict::Failed;
    }
    if !reports_throughput {
        return Verdict::Passed;
    }
    match extract_throughput(&output.combined()) {
        Some(mbps) => Verdict::Throughput(mbps.to_string()),
        None => Verdict::Failed,
    }
}

/// Feed the device selector and test id to the storage script and judge the run
pub fn run(executor: &dyn CommandExecutor, invocation: &StorageInvocation) -> TestOutcome {
    let label = TestLabel::Device {
        selector: invocation.device.selector(),
        test: invocation.test,
    };
    let answers = invocation.stdin();

    match executor.execute(&ExecRequest::new(&invocation.command).with_stdin(&answers)) {
        Ok(output) => TestOutcome::new(label, classify(&output, invocation.reports_throughput())),
        Err(e) => {
            tracing::warn!("{}", e);
            TestOutcome::failed(label).with_diagnostic(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::StorageDevice;
    use crate::runner::ScriptedExecutor;

    const SCRIPT: &str = "emmc_sd_test.sh";

    fn invocation(device: StorageDevice, test: u8) -> StorageInvocation {
        StorageInvocation {
            device,
            test,
            command: SCRIPT.to_string(),
        }
    }

    #[test]
    fn test_throughput_extracted() {
        let out = CapturedOutput::ok("Writing for 60 seconds\nThroughput: 87.5 MB/s\n");
        assert_eq!(classify(&out, true), Verdict::Throughput("87.5".to_string()));
    }

    #[test]
    fn test_throughput_tolerates_extra_spaces() {
        assert_eq!(extract_throughput("Throughput:    12 MB/s"), Some("12"));
        assert_eq!(extract_throughput("Throughput: 3.25MB/s"), Some("3.25"));
    }

    #[test]
    fn test_throughput_needs_mb_per_second() {
        assert_eq!(extract_throughput("Throughput: 1.20GB/s"), None);
        assert_eq!(extract_throughput("Throughput 87.5 MB/s"), None);
    }

    #[test]
    fn test_missing_throughput_fails_despite_zero_exit() {
        let out = CapturedOutput::ok("done\n");
        assert_eq!(classify(&out, true), Verdict::Failed);
    }

    #[test]
    fn test_other_tests_pass_on_zero_exit_regardless_of_output() {
        assert_eq!(classify(&CapturedOutput::ok(""), false), Verdict::Passed);
        assert_eq!(classify(&CapturedOutput::ok("FAILED everything"), false), Verdict::Passed);
    }

    #[test]
    fn test_nonzero_exit_always_fails() {
        let out = CapturedOutput::exited(2, "Throughput: 87.5 MB/s");
        assert_eq!(classify(&out, true), Verdict::Failed);
        assert_eq!(classify(&out, false), Verdict::Failed);
    }

    #[test]
    fn test_signal_termination_fails() {
        let out = CapturedOutput {
            exit_code: None,
            ..CapturedOutput::ok("")
        };
        assert_eq!(classify(&out, false), Verdict::Failed);
    }

    #[test]
    fn test_run_writes_selector_then_test_id() {
        let exec = ScriptedExecutor::new().on(SCRIPT, CapturedOutput::ok(""));
        let outcome = run(&exec, &invocation(StorageDevice::SdCard, 3));
        assert_eq!(outcome.to_string(), "Device 1 Test 3: Passed");
        assert_eq!(exec.calls()[0].stdin.as_deref(), Some("1\n3\n"));
    }

    #[test]
    fn test_run_throughput_line() {
        let exec =
            ScriptedExecutor::new().on_input(SCRIPT, "0\n2\n", CapturedOutput::ok("Throughput: 87.5 MB/s\n"));
        let outcome = run(&exec, &invocation(StorageDevice::Emmc, 2));
        assert_eq!(
            outcome.to_string(),
            "Device 0 Test 2: Number of bytes written in 60 seconds: 87.5 MB/s"
        );
    }

    #[test]
    fn test_launch_failure_carries_diagnostic() {
        let exec = ScriptedExecutor::new().fail_launch(SCRIPT, "denied");
        let outcome = run(&exec, &invocation(StorageDevice::Emmc, 1));
        assert_eq!(outcome.to_string(), "Device 0 Test 1: Failed");
        let diagnostic = outcome.diagnostic.unwrap();
        assert!(diagnostic.contains("emmc_sd_test.sh"));
        assert!(diagnostic.contains("denied"));
    }
}
