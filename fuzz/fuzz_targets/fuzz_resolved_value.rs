#![no_main]

use libfuzzer_sys::fuzz_target;
use modalkit_core::ResolvedValue;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(value) = ResolvedValue::from_json(raw) {
        let decoded = ResolvedValue::from_json(value.to_json()).expect("re-decode");
        assert_eq!(decoded, value);
    }
});
