use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;
use time::OffsetDateTime;

/// Default schema version stamped on decisions produced by the evaluator.
pub const DECISION_SCHEMA_VERSION: &str = "v1alpha1";

/// Named template arguments attached to a message key.
///
/// Ordered so that encoded records are byte-stable.
pub type TextArgs = BTreeMap<String, String>;

/// Severity is deliberately coarse: it maps to the colors and counts users see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an evaluation.
///
/// `Other` keeps unrecognised values readable so that validation, not the
/// decoder, is the place that rejects them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionStatus {
    Blocked,
    Allowed,
    Other(String),
}

impl DecisionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DecisionStatus::Blocked => "BLOCKED",
            DecisionStatus::Allowed => "ALLOWED",
            DecisionStatus::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DecisionStatus::Other(_))
    }
}

impl From<String> for DecisionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "BLOCKED" => DecisionStatus::Blocked,
            "ALLOWED" => DecisionStatus::Allowed,
            _ => DecisionStatus::Other(raw),
        }
    }
}

impl From<DecisionStatus> for String {
    fn from(status: DecisionStatus) -> Self {
        match status {
            DecisionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a piece of evidence came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EvidenceKind {
    #[serde(rename = "K8S_FIELD")]
    K8sField,
    #[serde(rename = "IMAGE_SCAN")]
    ImageScan,
    #[serde(rename = "SBOM")]
    Sbom,
    #[serde(rename = "OTHER")]
    Other,
}

impl EvidenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EvidenceKind::K8sField => "K8S_FIELD",
            EvidenceKind::ImageScan => "IMAGE_SCAN",
            EvidenceKind::Sbom => "SBOM",
            EvidenceKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the evaluated Kubernetes object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub subject: String,
    #[serde(default)]
    pub detail: String,
    /// Structured payload (kept open-ended so scanners can attach their own shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Map<String, JsonValue>>,
}

/// A machine-applicable patch accompanying a fix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchSuggestion {
    /// Patch flavour, e.g. `strategic-merge` or `json-patch`.
    pub format: String,
    pub content: String,
}

/// A suggested fix or follow-up step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title_args: TextArgs,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub detail_args: TextArgs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<PatchSuggestion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub policy_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title_args: TextArgs,
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub message_args: TextArgs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fix: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

/// The persisted outcome of evaluating one resource.
///
/// This is the record the store writes and `show` / `list` read back. Field
/// names are camelCase on the wire; optional collections are omitted when empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDecision {
    #[serde(default)]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub resource: ResourceRef,
    #[schemars(with = "String")]
    pub status: DecisionStatus,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub summary_args: TextArgs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub version: String,
}

impl SecurityDecision {
    /// Number of violations at the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn minimal() -> SecurityDecision {
        SecurityDecision {
            id: "dec-1".to_string(),
            timestamp: datetime!(2026-02-05 16:00 UTC),
            resource: ResourceRef {
                kind: "Pod".to_string(),
                name: "web".to_string(),
                namespace: "default".to_string(),
                api_version: None,
                uid: None,
            },
            status: DecisionStatus::Allowed,
            summary: "Resource meets security requirements".to_string(),
            summary_key: None,
            summary_args: TextArgs::new(),
            violations: Vec::new(),
            next_actions: Vec::new(),
            metadata: BTreeMap::new(),
            version: DECISION_SCHEMA_VERSION.to_string(),
        }
    }

    #[test]
    fn empty_collections_are_omitted() {
        let value = serde_json::to_value(minimal()).expect("encode");
        assert_eq!(
            value,
            json!({
                "id": "dec-1",
                "timestamp": "2026-02-05T16:00:00Z",
                "resource": {"kind": "Pod", "name": "web", "namespace": "default"},
                "status": "ALLOWED",
                "summary": "Resource meets security requirements",
                "version": "v1alpha1"
            })
        );
    }

    #[test]
    fn unknown_status_decodes_as_other() {
        let mut value = serde_json::to_value(minimal()).expect("encode");
        value["status"] = json!("MAYBE");
        let decoded: SecurityDecision = serde_json::from_value(value).expect("decode");
        assert_eq!(decoded.status, DecisionStatus::Other("MAYBE".to_string()));
        assert!(!decoded.status.is_known());
    }

    #[test]
    fn evidence_kind_uses_wire_names() {
        let ev = Evidence {
            kind: EvidenceKind::K8sField,
            subject: "spec.containers[0].securityContext.privileged".to_string(),
            detail: "true".to_string(),
            raw: None,
        };
        let value = serde_json::to_value(&ev).expect("encode");
        assert_eq!(value["type"], "K8S_FIELD");
        assert!(value.get("raw").is_none());
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }
}
