//! Fuzz target for the student record parser.
//!
//! This fuzzer checks that parsing and the analytics on top of it:
//! 1. Never panic on malformed input
//! 2. Handle both header and naive modes

#![no_main]

use insightplan::analysis::column_averages;
use insightplan::{ParseMode, Parser, ParserConfig, TierClassifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for mode in [ParseMode::Header, ParseMode::Naive] {
        let parser = Parser::with_config(ParserConfig {
            mode,
            ..ParserConfig::default()
        });
        if let Ok(dataset) = parser.parse_str(text) {
            let _ = column_averages(&dataset);
            let _ = TierClassifier::new().classify(&dataset);
        }
    }
});
