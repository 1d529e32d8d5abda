//! A canonical blocked decision, used for docs, demos, and renderer tests.

use crate::decision::{
    Action, DECISION_SCHEMA_VERSION, DecisionStatus, Evidence, EvidenceKind, PatchSuggestion,
    ResourceRef, SecurityDecision, Severity, TextArgs, Violation,
};
use crate::ids;
use serde_json::json;
use std::collections::BTreeMap;
use time::macros::datetime;

fn args<const N: usize>(pairs: [(&str, &str); N]) -> TextArgs {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A production Deployment blocked by a privileged container and a mutable image tag.
pub fn example_blocked_decision() -> SecurityDecision {
    let privileged = Violation {
        policy_id: ids::POLICY_PRIVILEGED.to_string(),
        title: "Privileged Container".to_string(),
        title_key: Some(ids::KEY_PRIVILEGED_TITLE.to_string()),
        title_args: TextArgs::new(),
        severity: Severity::Critical,
        message: "Container 'nginx' runs in privileged mode, which grants access to all host \
                  devices and bypasses security boundaries."
            .to_string(),
        message_key: Some(ids::KEY_PRIVILEGED_MESSAGE.to_string()),
        message_args: args([
            ("container", "nginx"),
            (
                "fieldPath",
                "spec.template.spec.containers[0].securityContext.privileged",
            ),
        ]),
        evidence: vec![Evidence {
            kind: EvidenceKind::K8sField,
            subject: "spec.template.spec.containers[0].securityContext.privileged".to_string(),
            detail: "privileged: true".to_string(),
            raw: None,
        }],
        fix: vec![Action {
            title: "Disable privileged mode".to_string(),
            title_key: Some(ids::KEY_FIX_DISABLE_PRIVILEGED_TITLE.to_string()),
            detail: "Set securityContext.privileged: false for container 'nginx'".to_string(),
            detail_key: Some(ids::KEY_FIX_DISABLE_PRIVILEGED_DETAIL.to_string()),
            detail_args: args([("container", "nginx")]),
            patch: Some(PatchSuggestion {
                format: ids::PATCH_STRATEGIC_MERGE.to_string(),
                content: json!({
                    "spec": {"template": {"spec": {"containers": [
                        {"name": "nginx", "securityContext": {"privileged": false}}
                    ]}}}
                })
                .to_string(),
            }),
            ..Action::default()
        }],
        references: vec![
            "https://kubernetes.io/docs/concepts/security/pod-security-standards/".to_string(),
        ],
    };

    let mut scan_raw = serde_json::Map::new();
    scan_raw.insert("scanner".to_string(), json!("trivy"));
    scan_raw.insert("vulnCount".to_string(), json!(3));
    scan_raw.insert(
        "topCves".to_string(),
        json!(["CVE-2023-44487", "CVE-2023-4863", "CVE-2024-6387"]),
    );

    let latest = Violation {
        policy_id: ids::POLICY_MUTABLE_IMAGE_TAG.to_string(),
        title: "Latest Image Tag".to_string(),
        title_key: Some(ids::KEY_IMAGE_LATEST_TITLE.to_string()),
        title_args: TextArgs::new(),
        severity: Severity::High,
        message: "Container 'nginx' uses image 'nginx:latest' with 'latest' tag or no tag, \
                  which is not immutable."
            .to_string(),
        message_key: Some(ids::KEY_IMAGE_LATEST_MESSAGE.to_string()),
        message_args: args([("container", "nginx"), ("image", "nginx:latest")]),
        evidence: vec![
            Evidence {
                kind: EvidenceKind::K8sField,
                subject: "spec.template.spec.containers[0].image".to_string(),
                detail: "nginx:latest".to_string(),
                raw: None,
            },
            Evidence {
                kind: EvidenceKind::ImageScan,
                subject: "nginx:latest".to_string(),
                detail: "3 vulnerabilities (top: CVE-2023-44487, CVE-2023-4863, CVE-2024-6387)"
                    .to_string(),
                raw: Some(scan_raw),
            },
        ],
        fix: vec![Action {
            title: "Use specific image tag".to_string(),
            title_key: Some(ids::KEY_FIX_PIN_IMAGE_TITLE.to_string()),
            detail: "Replace image 'nginx:latest' with a specific version tag or SHA digest"
                .to_string(),
            detail_key: Some(ids::KEY_FIX_PIN_IMAGE_DETAIL.to_string()),
            detail_args: args([("image", "nginx:latest")]),
            ..Action::default()
        }],
        references: vec!["https://nvd.nist.gov/vuln/detail/CVE-2023-44487".to_string()],
    };

    SecurityDecision {
        id: "dec-7721".to_string(),
        timestamp: datetime!(2026-02-05 16:00 UTC),
        resource: ResourceRef {
            kind: "Deployment".to_string(),
            name: "nginx-ingress".to_string(),
            namespace: "production".to_string(),
            api_version: Some("apps/v1".to_string()),
            uid: None,
        },
        status: DecisionStatus::Blocked,
        summary: "Resource blocked: 1 critical, 1 high severity violations found".to_string(),
        summary_key: Some(ids::KEY_SUMMARY_BLOCKED_CRITICAL_HIGH.to_string()),
        summary_args: args([("critical", "1"), ("high", "1")]),
        violations: vec![privileged, latest],
        next_actions: vec![
            Action {
                title: "Update deployment manifest".to_string(),
                title_key: Some(ids::KEY_NEXT_UPDATE_MANIFEST_TITLE.to_string()),
                detail: "Apply the suggested patches to meet security requirements.".to_string(),
                detail_key: Some(ids::KEY_NEXT_UPDATE_MANIFEST_DETAIL.to_string()),
                ..Action::default()
            },
            Action {
                title: "Scan image locally".to_string(),
                title_key: Some(ids::KEY_NEXT_SCAN_IMAGE_TITLE.to_string()),
                detail: "Use 'trivy image nginx:latest' to see full vulnerability report."
                    .to_string(),
                detail_key: Some(ids::KEY_NEXT_SCAN_IMAGE_DETAIL.to_string()),
                detail_args: args([("image", "nginx:latest")]),
                ..Action::default()
            },
        ],
        metadata: BTreeMap::from([
            ("checker".to_string(), "admission-webhook-v2".to_string()),
            ("cluster-id".to_string(), "prod-cluster-01".to_string()),
        ]),
        version: DECISION_SCHEMA_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_is_blocked_and_consistent() {
        let d = example_blocked_decision();
        assert_eq!(d.status, DecisionStatus::Blocked);
        assert!(d.is_consistent());
        assert_eq!(d.count_severity(Severity::Critical), 1);
        assert_eq!(d.count_severity(Severity::High), 1);
    }

    #[test]
    fn example_survives_json() {
        let d = example_blocked_decision();
        let text = serde_json::to_string(&d).expect("encode");
        let back: SecurityDecision = serde_json::from_str(&text).expect("decode");
        assert_eq!(back, d);
    }
}
