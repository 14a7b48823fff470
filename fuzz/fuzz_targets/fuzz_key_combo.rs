#![no_main]

use libfuzzer_sys::fuzz_target;
use modalkit_keys::KeyCombo;

fuzz_target!(|data: &str| {
    // Parsing must never panic; whatever parses must print back to an equal combo.
    if let Ok(combo) = data.parse::<KeyCombo>() {
        let again = combo
            .to_string()
            .parse::<KeyCombo>()
            .expect("canonical form parses");
        assert_eq!(again, combo);
    }
});
