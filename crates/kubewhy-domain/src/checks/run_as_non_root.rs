use super::utils::{args, fix, violation};
use crate::pod_spec::{PodSpec, entry_name};
use kubewhy_i18n::Translator;
use kubewhy_types::{Evidence, EvidenceKind, Severity, Violation, ids};
use serde_json::json;

const FIELD: &str = "securityContext.runAsNonRoot";

pub fn run(pod: PodSpec<'_>, en: &Translator) -> Option<Violation> {
    // Pod-level setting covers every container.
    if pod.node.bool_at(FIELD) == Some(true) {
        return None;
    }

    let (index, container) = pod
        .containers()
        .find(|(_, c)| c.bool_at(FIELD) != Some(true))?;

    let name = entry_name(container);

    let mut v = violation(
        en,
        ids::POLICY_RUN_AS_NON_ROOT,
        Severity::High,
        ids::KEY_RUN_AS_NON_ROOT_TITLE,
        ids::KEY_RUN_AS_NON_ROOT_MESSAGE,
        args([("container", name)]),
    );
    v.evidence.push(Evidence {
        kind: EvidenceKind::K8sField,
        subject: pod.field_path(&format!("containers[{index}].{FIELD}")),
        detail: "runAsNonRoot not set or false".to_string(),
        raw: None,
    });
    v.fix.push(fix(
        en,
        ids::KEY_FIX_SET_RUN_AS_NON_ROOT_TITLE,
        ids::KEY_FIX_SET_RUN_AS_NON_ROOT_DETAIL,
        args([("container", name)]),
        Some(pod.container_patch(name, json!({"securityContext": {"runAsNonRoot": true}}))),
    ));
    Some(v)
}
