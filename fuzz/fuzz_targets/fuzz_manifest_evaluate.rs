//! Fuzz target for manifest parsing, evaluation and rendering.
//!
//! Goal: arbitrary manifest text may be rejected by the parser, but anything
//! it accepts must evaluate and render without panicking.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_evaluate
//! ```

#![no_main]

use kubewhy_i18n::Translator;
use kubewhy_render::{RenderContext, render_human, render_json};
use libfuzzer_sys::fuzz_target;
use time::OffsetDateTime;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(resource) = kubewhy_app::parse_manifest(text) else {
        return;
    };

    let decision = kubewhy_domain::evaluate(&resource, OffsetDateTime::UNIX_EPOCH, "dec-fuzz");
    assert_eq!(decision.violations.is_empty(), decision.status.as_str() == "ALLOWED");

    let _ = render_human(&decision, &Translator::new("ja"), &RenderContext::colored());
    let _ = render_json(&decision);
});
