//! Fuzz target for `{{name}}` template rendering.
//!
//! Goal: malformed templates fall back to the raw text; nothing panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_template
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(template) = std::str::from_utf8(data) {
        let _ = kubewhy_i18n::render_template(template, |name| {
            (name.len() % 2 == 0).then(|| name.to_uppercase())
        });
    }
});
