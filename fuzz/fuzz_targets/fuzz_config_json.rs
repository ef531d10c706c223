#![no_main]

use libfuzzer_sys::fuzz_target;
use pyconsole_core::ConsoleConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 16 * 1024 {
        return;
    }

    // Parsing must never panic; accepted configs must re-serialize and parse
    // back to the same value.
    let Ok(config) = ConsoleConfig::from_json(text) else {
        return;
    };
    assert!(config.log_level().is_ok());
    let json = serde_json::to_string(&config).expect("config serializes");
    let reparsed = ConsoleConfig::from_json(&json).expect("serialized config parses");
    assert_eq!(config, reparsed);
});
