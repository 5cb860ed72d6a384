//! Fuzz target for multi-document splitting and YAML/JSON decoding.
//!
//! Goal: loading should **never panic** on any input. Decode errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_document_split
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let segments = ccheck_documents::split_documents(data);
    assert!(!segments.is_empty());

    let _ = ccheck_documents::fuzz::split_and_decode(data);
});
