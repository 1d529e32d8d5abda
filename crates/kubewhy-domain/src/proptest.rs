//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Evaluation determinism
//! - Status/violation consistency
//! - Tolerance of arbitrary, loosely-typed input

use crate::engine::evaluate;
use kubewhy_types::{DecisionStatus, all_policy_ids};
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::macros::datetime;

const TS: OffsetDateTime = datetime!(2026-02-05 16:00 UTC);

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_image() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("nginx".to_string())),
        Just(Some("nginx:latest".to_string())),
        Just(Some("registry:5000/app".to_string())),
        "[a-z]{1,8}:[0-9]\\.[0-9]{1,2}".prop_map(Some),
        "[a-z]{1,8}@sha256:[0-9a-f]{64}".prop_map(Some),
    ]
}

fn arb_container() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("[a-z][a-z0-9-]{0,10}"),
        arb_image(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(name, image, privileged, non_root)| {
            let mut c = Map::new();
            if let Some(name) = name {
                c.insert("name".to_string(), json!(name));
            }
            if let Some(image) = image {
                c.insert("image".to_string(), json!(image));
            }
            let mut ctx = Map::new();
            if let Some(p) = privileged {
                ctx.insert("privileged".to_string(), json!(p));
            }
            if let Some(n) = non_root {
                ctx.insert("runAsNonRoot".to_string(), json!(n));
            }
            if !ctx.is_empty() {
                c.insert("securityContext".to_string(), Value::Object(ctx));
            }
            Value::Object(c)
        })
}

fn arb_volume() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|n| json!({"name": n, "emptyDir": {}})),
        ("[a-z]{1,6}", "/[a-z]{1,6}").prop_map(|(n, p)| json!({"name": n, "hostPath": {"path": p}})),
    ]
}

fn arb_workload() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(arb_container(), 0..4),
        prop::collection::vec(arb_volume(), 0..3),
        proptest::option::of(any::<bool>()),
        any::<bool>(),
    )
        .prop_map(|(containers, volumes, pod_non_root, templated)| {
            let mut spec = json!({"containers": containers, "volumes": volumes});
            if let Some(n) = pod_non_root {
                spec["securityContext"] = json!({"runAsNonRoot": n});
            }
            if templated {
                json!({
                    "kind": "Deployment",
                    "metadata": {"name": "app", "namespace": "ns"},
                    "spec": {"template": {"spec": spec}}
                })
            } else {
                json!({"kind": "Pod", "metadata": {"name": "app"}, "spec": spec})
            }
        })
}

/// Arbitrary JSON trees, including ones that only loosely resemble workloads.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        prop_oneof![
            Just("containers".to_string()),
            Just("spec".to_string()),
            "[a-z:]{0,8}",
        ]
        .prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("spec".to_string()),
                    Just("template".to_string()),
                    Just("containers".to_string()),
                    Just("volumes".to_string()),
                    Just("securityContext".to_string()),
                    Just("privileged".to_string()),
                    Just("hostPath".to_string()),
                    Just("image".to_string()),
                    "[a-z]{1,5}",
                ],
                inner,
                0..4,
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(resource in arb_workload()) {
        let a = evaluate(&resource, TS, "dec-p");
        let b = evaluate(&resource, TS, "dec-p");
        let a_bytes = serde_json::to_vec(&a).expect("encode");
        let b_bytes = serde_json::to_vec(&b).expect("encode");
        prop_assert_eq!(a_bytes, b_bytes);
    }

    #[test]
    fn status_matches_violations(resource in arb_workload()) {
        let d = evaluate(&resource, TS, "dec-p");
        let blocked = d.status == DecisionStatus::Blocked;
        prop_assert_eq!(blocked, !d.violations.is_empty());
        prop_assert_eq!(d.next_actions.len(), usize::from(blocked));
        prop_assert!(d.is_consistent());
        prop_assert!(d.validate().is_ok());
    }

    #[test]
    fn at_most_one_violation_per_policy_in_order(resource in arb_workload()) {
        let d = evaluate(&resource, TS, "dec-p");
        let order: Vec<usize> = d
            .violations
            .iter()
            .map(|v| all_policy_ids().iter().position(|id| *id == v.policy_id).expect("known policy"))
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(order, sorted);
    }

    #[test]
    fn evidence_subjects_point_into_the_pod_spec(resource in arb_workload()) {
        let d = evaluate(&resource, TS, "dec-p");
        let prefix = if resource["kind"] == "Pod" { "spec." } else { "spec.template.spec." };
        for v in &d.violations {
            prop_assert!(v.evidence[0].subject.starts_with(prefix), "{}", v.evidence[0].subject);
        }
    }

    #[test]
    fn arbitrary_input_never_panics(resource in arb_json()) {
        let d = evaluate(&resource, TS, "dec-p");
        prop_assert!(d.validate().is_ok());
    }
}
