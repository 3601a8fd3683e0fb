#![no_main]

use std::path::Path;

use etl_smoke::config::{load_from_str, validate};
use etl_smoke::summary::Summary;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, ignoring invalid UTF-8
    if let Ok(text) = std::str::from_utf8(data) {
        // Loading, validating and summarizing must never panic, whatever
        // the document looks like
        if let Ok(settings) = load_from_str(Path::new("fuzz.json"), text) {
            let _ = validate(&settings);
            let mut out = Vec::new();
            let _ = Summary::from_settings(&settings).write_human(&mut out);
        }
    }
});
