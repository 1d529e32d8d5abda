//! The `list` use case.

use anyhow::Context;
use kubewhy_render::format_timestamp;
use kubewhy_store::DecisionRepository;
use kubewhy_types::SecurityDecision;

/// Stored decisions, newest first. Empty `namespace` matches all; `limit` 0
/// means no limit.
pub fn run_list(
    store: &dyn DecisionRepository,
    namespace: &str,
    limit: usize,
) -> anyhow::Result<Vec<SecurityDecision>> {
    store.list(namespace, limit).context("list decisions")
}

/// `timestamp  status  kind/name  namespace  id`
pub fn format_list_line(d: &SecurityDecision) -> String {
    format!(
        "{}  {:<7}  {}/{}  {}  {}",
        format_timestamp(d.timestamp),
        d.status.as_str(),
        d.resource.kind,
        d.resource.name,
        d.resource.namespace,
        d.id
    )
}

pub fn format_list(decisions: &[SecurityDecision]) -> String {
    let mut out = String::new();
    for d in decisions {
        out.push_str(&format_list_line(d));
        out.push('\n');
    }
    out
}
