//! Test outcomes and their verdict lines
//!
//! Every invocation produces exactly one [`TestOutcome`]; its `Display` form is the verdict line printed
//! to the console. The line shapes are fixed because downstream log scrapers match on them.

use std::fmt;

/// Which test an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestLabel {
    /// Memory tester run, e.g. `OCM Test 3`
    Memory { category: &'static str, index: usize },
    /// Storage script run, e.g. `Device 0 Test 2`
    Device { selector: &'static str, test: u8 },
    /// The single SDMA run
    Dma,
}

impl fmt::Display for TestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestLabel::Memory { category, index } => write!(f, "{} Test {}", category, index),
            TestLabel::Device { selector, test } => write!(f, "Device {} Test {}", selector, test),
            TestLabel::Dma => write!(f, "SDMA Test"),
        }
    }
}

/// Pass/fail classification, with the metric that justified a pass where there is one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Performance run passed; value is the reported byte count, verbatim
    TotalBytes(String),
    /// Storage write test passed; value is the reported MB/s, verbatim
    Throughput(String),
    Failed,
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        !matches!(self, Verdict::Failed)
    }
}

/// Result of a single test invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub label: TestLabel,
    pub verdict: Verdict,
    /// Error text echoed after the verdict line (launch failures of memory tests)
    pub diagnostic: Option<String>,
}

impl TestOutcome {
    pub fn new(label: TestLabel, verdict: Verdict) -> Self {
        Self {
            label,
            verdict,
            diagnostic: None,
        }
    }

    pub fn failed(label: TestLabel) -> Self {
        Self::new(label, Verdict::Failed)
    }

    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Passed => write!(f, "{}: Passed", self.label),
            Verdict::Failed => write!(f, "{}: Failed", self.label),
            Verdict::TotalBytes(bytes) => write!(f, "{} Passed - Total bytes: {}", self.label, bytes),
            Verdict::Throughput(mbps) => write!(
                f,
                "{}: Number of bytes written in 60 seconds: {} MB/s",
                self.label, mbps
            ),
        }
    }
}
