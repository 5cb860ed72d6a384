//! Fuzz target for Rego module parsing and rule-head extraction.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_heads
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = ccheck_policy::fuzz::rule_heads(text);
    }
});
