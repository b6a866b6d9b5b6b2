#![no_main]

use libfuzzer_sys::fuzz_target;
use platform_tests::plan::MemoryCheck;
use platform_tests::runner::{dma, memory, storage};
use platform_tests::{CapturedOutput, Verdict};

fuzz_target!(|data: &[u8]| {
    // Tool output is decoded lossily, exactly as the shell executor does
    let text = String::from_utf8_lossy(data);

    let _ = memory::classify(&text, MemoryCheck::Marker);
    if let Verdict::TotalBytes(bytes) = memory::classify(&text, MemoryCheck::TotalBytes) {
        assert!(!bytes.is_empty() && bytes.chars().all(char::is_numeric));
    }

    let out = CapturedOutput::ok(text.to_string());
    if let Verdict::Throughput(mbps) = storage::classify(&out, true) {
        assert!(text.contains(&mbps));
    }

    let _ = dma::classify(&text);
});
