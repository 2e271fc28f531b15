#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use triax::ingest::VendorLogReader;
use triax::pipeline::{analyze, ProcessingConfig};

fuzz_target!(|data: &[u8]| {
    // Reading may fail on malformed input, but must never panic
    let Ok(log) = VendorLogReader::new().read(Cursor::new(data)) else {
        return;
    };

    // Derivation never fails, so it must not panic either
    let analysis = analyze(&log.readings, &log.metadata, &ProcessingConfig::default());
    let _ = analysis.reduced.column("friction_angle_a");
});
