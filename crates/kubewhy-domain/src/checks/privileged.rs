use super::utils::{args, fix, violation};
use crate::pod_spec::{PodSpec, entry_name};
use kubewhy_i18n::Translator;
use kubewhy_types::{Evidence, EvidenceKind, Severity, Violation, ids};
use serde_json::json;

pub fn run(pod: PodSpec<'_>, en: &Translator) -> Option<Violation> {
    let (index, container) = pod
        .containers()
        .find(|(_, c)| c.bool_at("securityContext.privileged") == Some(true))?;

    let name = entry_name(container);
    let field_path = pod.field_path(&format!("containers[{index}].securityContext.privileged"));

    let mut v = violation(
        en,
        ids::POLICY_PRIVILEGED,
        Severity::Critical,
        ids::KEY_PRIVILEGED_TITLE,
        ids::KEY_PRIVILEGED_MESSAGE,
        args([("container", name), ("fieldPath", field_path.as_str())]),
    );
    v.evidence.push(Evidence {
        kind: EvidenceKind::K8sField,
        subject: field_path,
        detail: "privileged: true".to_string(),
        raw: None,
    });
    v.fix.push(fix(
        en,
        ids::KEY_FIX_DISABLE_PRIVILEGED_TITLE,
        ids::KEY_FIX_DISABLE_PRIVILEGED_DETAIL,
        args([("container", name)]),
        Some(pod.container_patch(name, json!({"securityContext": {"privileged": false}}))),
    ));
    Some(v)
}
