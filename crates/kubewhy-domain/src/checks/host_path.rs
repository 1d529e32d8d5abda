use super::utils::{args, fix, violation};
use crate::pod_spec::{PodSpec, entry_name};
use kubewhy_i18n::Translator;
use kubewhy_types::{Evidence, EvidenceKind, Severity, Violation, ids};

pub fn run(pod: PodSpec<'_>, en: &Translator) -> Option<Violation> {
    let (index, volume) = pod
        .volumes()
        .find(|(_, v)| v.get("hostPath").is_object())?;

    let name = entry_name(volume);
    let host_path = volume.get("hostPath");
    let path = host_path.str_at("path").unwrap_or_default();

    let mut v = violation(
        en,
        ids::POLICY_HOST_PATH,
        Severity::High,
        ids::KEY_HOST_PATH_TITLE,
        ids::KEY_HOST_PATH_MESSAGE,
        args([("volume", name), ("path", path)]),
    );
    v.evidence.push(Evidence {
        kind: EvidenceKind::K8sField,
        subject: pod.field_path(&format!("volumes[{index}].hostPath")),
        detail: format!("path: {path}"),
        raw: host_path.value().and_then(|h| h.as_object()).cloned(),
    });
    v.fix.push(fix(
        en,
        ids::KEY_FIX_REPLACE_HOST_PATH_TITLE,
        ids::KEY_FIX_REPLACE_HOST_PATH_DETAIL,
        args([("volume", name)]),
        None,
    ));
    Some(v)
}
