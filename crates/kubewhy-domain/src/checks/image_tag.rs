use super::utils::{args, fix, violation};
use crate::pod_spec::{PodSpec, entry_name};
use kubewhy_i18n::Translator;
use kubewhy_types::{Evidence, EvidenceKind, Severity, Violation, ids};

pub fn run(pod: PodSpec<'_>, en: &Translator) -> Option<Violation> {
    let (index, container, image) = pod.containers().find_map(|(i, c)| {
        let image = c.str_at("image")?;
        is_mutable_image(image).then_some((i, c, image))
    })?;

    let name = entry_name(container);

    let mut v = violation(
        en,
        ids::POLICY_MUTABLE_IMAGE_TAG,
        Severity::High,
        ids::KEY_IMAGE_LATEST_TITLE,
        ids::KEY_IMAGE_LATEST_MESSAGE,
        args([("container", name), ("image", image)]),
    );
    v.evidence.push(Evidence {
        kind: EvidenceKind::K8sField,
        subject: pod.field_path(&format!("containers[{index}].image")),
        detail: image.to_string(),
        raw: None,
    });
    v.fix.push(fix(
        en,
        ids::KEY_FIX_PIN_IMAGE_TITLE,
        ids::KEY_FIX_PIN_IMAGE_DETAIL,
        args([("image", image)]),
        None,
    ));
    Some(v)
}

/// Whether an image reference can change under the same name: it ends in
/// `:latest` or carries no colon at all.
pub fn is_mutable_image(image: &str) -> bool {
    image.ends_with(":latest") || !image.contains(':')
}

#[cfg(test)]
mod tests {
    use super::is_mutable_image;

    #[test]
    fn mutable_references() {
        for image in ["nginx:latest", "myapp", "ghcr.io/org/app", "ghcr.io/org/app:latest"] {
            assert!(is_mutable_image(image), "{image}");
        }
    }

    #[test]
    fn pinned_references() {
        for image in [
            "nginx:1.25.3",
            "registry:5000/team/app:2.0",
            "registry:5000/team/app",
            "nginx@sha256:0d17b565c37bcbd895e9d92315a05c1c3c9a29f762b011a10c54a66cd53c9b31",
            "nginx:latest@sha256:0d17b565c37bcbd895e9d92315a05c1c3c9a29f762b011a10c54a66cd53c9b31",
        ] {
            assert!(!is_mutable_image(image), "{image}");
        }
    }
}
