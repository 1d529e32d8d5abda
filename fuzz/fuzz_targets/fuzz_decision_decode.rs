//! Fuzz target for decoding persisted decision records.
//!
//! Goal: arbitrary bytes either fail to decode or produce a decision that
//! validates and encodes without panicking.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_decision_decode
//! ```

#![no_main]

use kubewhy_types::SecurityDecision;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(decision) = serde_json::from_slice::<SecurityDecision>(data) {
        let _ = decision.validate();
        let _ = decision.is_consistent();
        let _ = kubewhy_render::render_json(&decision);
    }
});
