//! The fixed test plan
//!
//! Holds the ordered OCM/DDR memory-tester command lines, the eMMC/SD storage test ids and the single SDMA
//! run. The plan is built once from a [`RunnerConfig`] and never mutated; `--suite` only selects groups,
//! it never reorders them.

use std::fmt;

use clap::ValueEnum;

use crate::config::RunnerConfig;
use crate::outcome::TestLabel;

/// OCM memory-tester arguments, in order. The last entry is the performance run.
pub const OCM_ARGS: [&str; 6] = [
    "-d 0x10 -p 9 -b -s 0x800000",
    "-d 0x10 -p 10 -b -s 0x800000",
    "-d 0x10 -r -b -s 0x800000",
    "-d 0x10 -p 3 -b -s 0x800000",
    "-d 0x10 -p 11 -b -s 0x800000",
    "-d 0x10 -f -t 60",
];

/// DDR memory-tester arguments, in order. The last entry is the performance run.
pub const DDR_ARGS: [&str; 5] = [
    "-d 0x8 -p 9 -b",
    "-d 0x8 -p 10 -b",
    "-d 0x8 -r -b",
    "-d 0x8 -p 11 -b",
    "-d 0x8 -f -t 60",
];

/// Storage test ids, run for both eMMC and SD card
pub const STORAGE_TESTS: [u8; 3] = [1, 2, 3];

/// Storage test id whose pass depends on a reported throughput
pub const THROUGHPUT_TEST: u8 = 2;

/// A group of tests preceded by a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Suite {
    Ocm,
    Ddr,
    Emmc,
    #[value(name = "sd")]
    SdCard,
    Sdma,
}

impl Suite {
    /// Execution order of a full run
    pub const ALL: [Suite; 5] = [Suite::Ocm, Suite::Ddr, Suite::Emmc, Suite::SdCard, Suite::Sdma];

    pub fn banner(self) -> &'static str {
        match self {
            Suite::Ocm => "Tests for OCM:",
            Suite::Ddr => "Tests for DDR:",
            Suite::Emmc => "Tests for eMMC:",
            Suite::SdCard => "Tests for SD Card:",
            Suite::Sdma => "Test for SDMA:",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suite::Ocm => "OCM",
            Suite::Ddr => "DDR",
            Suite::Emmc => "eMMC",
            Suite::SdCard => "SD Card",
            Suite::Sdma => "SDMA",
        };
        write!(f, "{}", name)
    }
}

/// How a memory-tester run is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryCheck {
    /// Pass when the output contains `Pattern Loaded`
    Marker,
    /// Pass when the output reports `Total bytes: <N>`
    TotalBytes,
}

/// Storage device answered to the script's first prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageDevice {
    Emmc,
    SdCard,
}

impl StorageDevice {
    pub fn selector(self) -> &'static str {
        match self {
            StorageDevice::Emmc => "0",
            StorageDevice::SdCard => "1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryInvocation {
    /// `OCM` or `DDR`
    pub category: &'static str,
    /// 1-based position within the suite
    pub index: usize,
    pub command: String,
    pub check: MemoryCheck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInvocation {
    pub device: StorageDevice,
    pub test: u8,
    pub command: String,
}

impl StorageInvocation {
    /// Answers to the script's two prompts: device selector, then test id
    pub fn stdin(&self) -> String {
        format!("{}\n{}\n", self.device.selector(), self.test)
    }

    pub fn reports_throughput(&self) -> bool {
        self.test == THROUGHPUT_TEST
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmaInvocation {
    pub command: String,
}

/// One test in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Memory(MemoryInvocation),
    Storage(StorageInvocation),
    Dma(DmaInvocation),
}

impl Invocation {
    pub fn command(&self) -> &str {
        match self {
            Invocation::Memory(m) => &m.command,
            Invocation::Storage(s) => &s.command,
            Invocation::Dma(d) => &d.command,
        }
    }

    pub fn label(&self) -> TestLabel {
        match self {
            Invocation::Memory(m) => TestLabel::Memory {
                category: m.category,
                index: m.index,
            },
            Invocation::Storage(s) => TestLabel::Device {
                selector: s.device.selector(),
                test: s.test,
            },
            Invocation::Dma(_) => TestLabel::Dma,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteGroup {
    pub suite: Suite,
    pub invocations: Vec<Invocation>,
}

/// Ordered suites of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPlan {
    pub groups: Vec<SuiteGroup>,
}

impl TestPlan {
    /// The full fixed sequence: 6 OCM, 5 DDR, 3 eMMC, 3 SD card, 1 SDMA
    pub fn standard(config: &RunnerConfig) -> Self {
        let groups = Suite::ALL
            .iter()
            .map(|&suite| SuiteGroup {
                suite,
                invocations: suite_invocations(suite, config),
            })
            .collect();
        Self { groups }
    }

    /// Keep only the selected suites (all of them when `suites` is empty), preserving execution order.
    pub fn only(mut self, suites: &[Suite]) -> Self {
        if !suites.is_empty() {
            self.groups.retain(|g| suites.contains(&g.suite));
        }
        self
    }

    pub fn invocation_count(&self) -> usize {
        self.groups.iter().map(|g| g.invocations.len()).sum()
    }
}

fn suite_invocations(suite: Suite, config: &RunnerConfig) -> Vec<Invocation> {
    match suite {
        Suite::Ocm => memory_invocations("OCM", &OCM_ARGS, config),
        Suite::Ddr => memory_invocations("DDR", &DDR_ARGS, config),
        Suite::Emmc => storage_invocations(StorageDevice::Emmc, config),
        Suite::SdCard => storage_invocations(StorageDevice::SdCard, config),
        Suite::Sdma => vec![Invocation::Dma(DmaInvocation {
            command: config.dma_script().display().to_string(),
        })],
    }
}

fn memory_invocations(category: &'static str, args: &[&str], config: &RunnerConfig) -> Vec<Invocation> {
    let tester = config.memory_tester();
    args.iter()
        .enumerate()
        .map(|(i, args_line)| {
            // Only the final run of each suite is the performance (-f) run
            let check = if i + 1 == args.len() {
                MemoryCheck::TotalBytes
            } else {
                MemoryCheck::Marker
            };
            Invocation::Memory(MemoryInvocation {
                category,
                index: i + 1,
                command: format!("{} {}", tester.display(), args_line),
                check,
            })
        })
        .collect()
}

fn storage_invocations(device: StorageDevice, config: &RunnerConfig) -> Vec<Invocation> {
    let script = config.storage_script().display().to_string();
    STORAGE_TESTS
        .iter()
        .map(|&test| {
            Invocation::Storage(StorageInvocation {
                device,
                test,
                command: script.clone(),
            })
        })
        .collect()
}
