//! Shared fixtures: a scripted board and a transcript helper

use platform_tests::plan::{Invocation, MemoryCheck, TestPlan};
use platform_tests::{CapturedOutput, CommandExecutor, ConsoleReporter, RunnerConfig, ScriptedExecutor, run_plan};

/// Tools directory used by every scripted board
pub const TOOLS_DIR: &str = "/opt/simaai_pt";

#[allow(dead_code)]
pub fn config() -> RunnerConfig {
    RunnerConfig::new().with_tools_dir(TOOLS_DIR)
}

#[allow(dead_code)]
pub fn plan() -> TestPlan {
    TestPlan::standard(&config())
}

/// Executor answering every test of the standard plan like a healthy board
#[allow(dead_code)]
pub fn healthy_board() -> ScriptedExecutor {
    let plan = plan();
    let mut exec = ScriptedExecutor::new();

    for group in &plan.groups {
        for invocation in &group.invocations {
            exec = match invocation {
                Invocation::Memory(m) if m.check == MemoryCheck::TotalBytes => exec.on(
                    m.command.clone(),
                    CapturedOutput::ok("").with_stderr(format!(
                        "Bytes Count (MB): 512\nElapsed Time: 60.00s\nThroughput: 0.01GB/s\nTotal bytes: {}\n",
                        if m.category == "OCM" { "999" } else { "4096" }
                    )),
                ),
                Invocation::Memory(m) => exec.on(
                    m.command.clone(),
                    CapturedOutput::ok("").with_stderr("Bytes Count (MB): 8\nElapsed Time: 0.12s\nPattern Loaded\n"),
                ),
                Invocation::Storage(s) if s.reports_throughput() => exec.on_input(
                    s.command.clone(),
                    s.stdin(),
                    CapturedOutput::ok(format!(
                        "Select device:\nSelect test:\nThroughput: {} MB/s\n",
                        if s.device.selector() == "0" { "87.5" } else { "21.3" }
                    )),
                ),
                Invocation::Storage(s) => {
                    exec.on_input(s.command.clone(), s.stdin(), CapturedOutput::ok("Select device:\nSelect test:\nOK\n"))
                }
                Invocation::Dma(d) => exec.on(
                    d.command.clone(),
                    CapturedOutput::ok("dmatest: Started 1 threads\ndma0chan0-copy0: summary 1000 tests, 0 failures\n"),
                ),
            };
        }
    }
    exec
}

/// Run `plan` and return everything the console reporter printed
#[allow(dead_code)]
pub fn transcript(plan: &TestPlan, executor: &dyn CommandExecutor) -> String {
    let mut reporter = ConsoleReporter::new(Vec::new());
    run_plan(plan, executor, &mut reporter).expect("writing to a Vec cannot fail");
    String::from_utf8(reporter.into_inner()).expect("transcript is UTF-8")
}
