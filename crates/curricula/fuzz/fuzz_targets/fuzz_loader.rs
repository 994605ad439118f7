//! Fuzz target for the dataset loader.
//!
//! Loading must never panic: malformed JSON is an error and any well-formed
//! document normalizes to some (possibly empty) record set.

#![no_main]

use std::path::Path;

use curricula::Loader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let _ = Loader::new().load_bytes(data, Path::new("fuzz.json"));
});
