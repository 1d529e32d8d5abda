use crate::checks;
use crate::pod_spec::extract_pod_spec;
use crate::resource::Node;
use kubewhy_i18n::Translator;
use kubewhy_types::{
    Action, DECISION_SCHEMA_VERSION, DecisionStatus, ResourceRef, SecurityDecision, Severity,
    TextArgs, Violation, ids,
};
use serde_json::Value;
use std::collections::BTreeMap;
use time::OffsetDateTime;

const DEFAULT_KIND: &str = "Deployment";
const DEFAULT_NAME: &str = "unknown";
const DEFAULT_NAMESPACE: &str = "default";

/// Evaluates resources against the fixed policy battery.
///
/// Holds the English bundle used to fill the plain-text fields stored next to
/// each message key, and the schema version stamped on every decision.
#[derive(Clone, Debug)]
pub struct Evaluator {
    en: Translator,
    version: String,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DECISION_SCHEMA_VERSION)
    }
}

impl Evaluator {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            en: Translator::english(),
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Produce a decision for `resource`. Never fails: missing or mistyped
    /// fields fall back to defaults or simply do not trigger a check.
    pub fn evaluate(&self, resource: &Value, timestamp: OffsetDateTime, id: &str) -> SecurityDecision {
        let root = Node::new(resource);

        let mut violations: Vec<Violation> = Vec::new();
        if let Some(pod) = extract_pod_spec(root) {
            checks::run_all(pod, &self.en, &mut violations);
        }

        let status = if violations.is_empty() {
            DecisionStatus::Allowed
        } else {
            DecisionStatus::Blocked
        };
        let (summary_key, summary_args) = summarize(&violations);
        let summary = self.en.t_args(summary_key, &summary_args);
        let next_actions = if violations.is_empty() {
            Vec::new()
        } else {
            vec![self.review_action()]
        };

        SecurityDecision {
            id: id.to_string(),
            timestamp,
            resource: resource_ref(root),
            status,
            summary,
            summary_key: Some(summary_key.to_string()),
            summary_args,
            violations,
            next_actions,
            metadata: BTreeMap::new(),
            version: self.version.clone(),
        }
    }

    fn review_action(&self) -> Action {
        Action {
            title: self.en.t(ids::KEY_NEXT_REVIEW_TITLE),
            title_key: Some(ids::KEY_NEXT_REVIEW_TITLE.to_string()),
            detail: self.en.t(ids::KEY_NEXT_REVIEW_DETAIL),
            detail_key: Some(ids::KEY_NEXT_REVIEW_DETAIL.to_string()),
            ..Action::default()
        }
    }
}

/// Evaluate with the default schema version.
pub fn evaluate(resource: &Value, timestamp: OffsetDateTime, id: &str) -> SecurityDecision {
    Evaluator::default().evaluate(resource, timestamp, id)
}

fn resource_ref(root: Node<'_>) -> ResourceRef {
    let owned = |s: Option<&str>, default: &str| {
        s.filter(|s| !s.is_empty()).unwrap_or(default).to_string()
    };
    ResourceRef {
        kind: owned(root.str_at("kind"), DEFAULT_KIND),
        name: owned(root.str_at("metadata.name"), DEFAULT_NAME),
        namespace: owned(root.str_at("metadata.namespace"), DEFAULT_NAMESPACE),
        api_version: root.str_at("apiVersion").map(str::to_string),
        uid: root.str_at("metadata.uid").map(str::to_string),
    }
}

/// Summary key and arguments. Only CRITICAL and HIGH counts are named;
/// lower severities stay in the violation list but not in the sentence.
fn summarize(violations: &[Violation]) -> (&'static str, TextArgs) {
    if violations.is_empty() {
        return (ids::KEY_SUMMARY_ALLOWED, TextArgs::new());
    }
    let count = |sev: Severity| violations.iter().filter(|v| v.severity == sev).count();
    let critical = count(Severity::Critical);
    let high = count(Severity::High);

    let mut args = TextArgs::new();
    if critical > 0 {
        args.insert("critical".to_string(), critical.to_string());
    }
    if high > 0 {
        args.insert("high".to_string(), high.to_string());
    }
    let key = match (critical > 0, high > 0) {
        (true, true) => ids::KEY_SUMMARY_BLOCKED_CRITICAL_HIGH,
        (true, false) => ids::KEY_SUMMARY_BLOCKED_CRITICAL,
        (false, true) => ids::KEY_SUMMARY_BLOCKED_HIGH,
        (false, false) => ids::KEY_SUMMARY_BLOCKED_OTHER,
    };
    (key, args)
}
