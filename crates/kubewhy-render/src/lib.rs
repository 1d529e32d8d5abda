//! Rendering for security decisions (terminal text and the JSON envelope).
//!
//! Both renderers are pure functions of the decision, a translator, and a
//! [`RenderContext`] resolved once by the caller.

#![forbid(unsafe_code)]

mod human;
mod json;
mod style;
mod wrap;

pub use human::{NEXT_ACTION_LIMIT, render_human};
pub use json::{
    ActionView, DecisionEnvelope, DecisionView, EvidenceView, OUTPUT_SCHEMA_VERSION, ResourceView,
    ViolationView, render_json, render_json_list, to_envelope,
};
pub use style::{ColorChoice, RenderContext};
pub use wrap::{WRAP_WIDTH, wrap_indent};

use time::OffsetDateTime;
use time::macros::format_description;

/// UTC timestamp with second precision, e.g. `2026-02-05T16:00:00Z`.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    ts.to_offset(time::UtcOffset::UTC)
        .format(fmt)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn timestamp_is_utc_second_precision() {
        assert_eq!(
            format_timestamp(datetime!(2026-02-05 16:00:00.123 UTC)),
            "2026-02-05T16:00:00Z"
        );
        assert_eq!(
            format_timestamp(datetime!(2026-02-05 18:30 +02:00)),
            "2026-02-05T16:30:00Z"
        );
    }
}
