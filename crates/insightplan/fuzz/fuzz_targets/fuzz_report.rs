//! Fuzz target for the advisory report formatter.

#![no_main]

use insightplan::ReportFormatter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(formatter) = ReportFormatter::with_defaults() {
        let blocks = formatter.format(text);
        assert!(blocks.len() <= text.split('\n').count());
    }
});
