#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some(title) = cs_fetch::extract_title(data) {
        assert!(!title.is_empty());
    }
});
