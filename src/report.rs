//! Console reporting
//!
//! ## Reporter Trait
//!
//! The driver hands banners and outcomes to a `Reporter` instead of printing them directly. This keeps
//! the console format in one place and lets tests capture a full transcript in memory.

use std::io::{self, Write};

use crate::outcome::TestOutcome;
use crate::plan::{Suite, TestPlan};
use crate::version::PLATFORM_TESTS_VERSION;

/// Trait for reporting test execution results.
pub trait Reporter {
    /// Called before the first test of a suite
    fn on_suite_start(&mut self, suite: Suite) -> io::Result<()>;

    /// Called once per finished test, in execution order
    fn on_test_complete(&mut self, outcome: &TestOutcome) -> io::Result<()>;
}

/// Plain-text reporter: one banner line per suite, one verdict line per test.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the planned command lines without running them (`--list`)
    pub fn write_plan(&mut self, plan: &TestPlan) -> io::Result<()> {
        writeln!(
            self.out,
            "platform-tests {}: {} test(s) planned",
            PLATFORM_TESTS_VERSION,
            plan.invocation_count()
        )?;
        for group in &plan.groups {
            writeln!(self.out, "{}", group.suite.banner())?;
            for invocation in &group.invocations {
                writeln!(self.out, "  {}: {}", invocation.label(), invocation.command())?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_suite_start(&mut self, suite: Suite) -> io::Result<()> {
        writeln!(self.out, "{}", suite.banner())?;
        self.out.flush()
    }

    fn on_test_complete(&mut self, outcome: &TestOutcome) -> io::Result<()> {
        writeln!(self.out, "{}", outcome)?;
        if let Some(diagnostic) = &outcome.diagnostic {
            writeln!(self.out, "Error output:")?;
            writeln!(self.out, "{}", diagnostic)?;
        }
        // Visible before the next (possibly minute-long) test starts
        self.out.flush()
    }
}
