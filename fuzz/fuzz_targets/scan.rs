#![no_main]

use kokascan::config::{AcceptancePolicy, DriverConfig};
use kokascan::driver::tokenize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        for policy in [AcceptancePolicy::Permissive, AcceptancePolicy::Heuristic] {
            let config = DriverConfig::default().with_policy(policy);
            // The driver must terminate and every checkpoint must restore.
            if let Ok(stream) = tokenize(s, &config) {
                let _ = stream.verify_checkpoints(config.checkpoint_capacity);
            }
        }
    }
});
