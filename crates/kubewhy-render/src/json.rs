//! The machine-readable projection of a decision.
//!
//! Unlike the persisted record, every collection is always present (empty
//! arrays, empty `metadata` object) so consumers never null-check. Text fields
//! carry the stored plain strings; translation keys are not part of the
//! envelope.

use crate::format_timestamp;
use kubewhy_types::{Action, Evidence, PatchSuggestion, SecurityDecision, Severity, Violation};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Version tag of the envelope shape, independent of the decision version.
pub const OUTPUT_SCHEMA_VERSION: &str = "v1";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEnvelope {
    pub schema_version: String,
    pub decision: DecisionView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionView {
    pub id: String,
    pub timestamp: String,
    pub version: String,
    pub status: String,
    pub summary: String,
    pub resource: ResourceView,
    pub violations: Vec<ViolationView>,
    pub next_actions: Vec<ActionView>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceView {
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationView {
    pub policy_id: String,
    pub title: String,
    pub severity: Severity,
    pub message: String,
    pub evidence: Vec<EvidenceView>,
    pub fix: Vec<ActionView>,
    pub references: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvidenceView {
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub detail: String,
    pub raw: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<PatchSuggestion>,
}

impl From<&Evidence> for EvidenceView {
    fn from(e: &Evidence) -> Self {
        Self {
            kind: e.kind.as_str().to_string(),
            subject: e.subject.clone(),
            detail: e.detail.clone(),
            raw: e.raw.clone().unwrap_or_default(),
        }
    }
}

impl From<&Action> for ActionView {
    fn from(a: &Action) -> Self {
        Self {
            title: a.title.clone(),
            detail: a.detail.clone(),
            patch: a.patch.clone(),
        }
    }
}

impl From<&Violation> for ViolationView {
    fn from(v: &Violation) -> Self {
        Self {
            policy_id: v.policy_id.clone(),
            title: v.title.clone(),
            severity: v.severity,
            message: v.message.clone(),
            evidence: v.evidence.iter().map(EvidenceView::from).collect(),
            fix: v.fix.iter().map(ActionView::from).collect(),
            references: v.references.clone(),
        }
    }
}

pub fn to_envelope(d: &SecurityDecision) -> DecisionEnvelope {
    DecisionEnvelope {
        schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
        decision: DecisionView {
            id: d.id.clone(),
            timestamp: format_timestamp(d.timestamp),
            version: d.version.clone(),
            status: d.status.as_str().to_string(),
            summary: d.summary.clone(),
            resource: ResourceView {
                kind: d.resource.kind.clone(),
                name: d.resource.name.clone(),
                namespace: d.resource.namespace.clone(),
            },
            violations: d.violations.iter().map(ViolationView::from).collect(),
            next_actions: d.next_actions.iter().map(ActionView::from).collect(),
            metadata: d.metadata.clone(),
        },
    }
}

/// Pretty-printed envelope (two-space indent), newline terminated.
pub fn render_json(d: &SecurityDecision) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(&to_envelope(d))?;
    out.push('\n');
    Ok(out)
}

/// A JSON array of envelopes, in the order given.
pub fn render_json_list(decisions: &[SecurityDecision]) -> Result<String, serde_json::Error> {
    let envelopes: Vec<DecisionEnvelope> = decisions.iter().map(to_envelope).collect();
    let mut out = serde_json::to_string_pretty(&envelopes)?;
    out.push('\n');
    Ok(out)
}
