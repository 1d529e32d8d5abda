use kubewhy_i18n::Translator;
use kubewhy_types::{Action, PatchSuggestion, Severity, TextArgs, Violation, ids};

pub const PSS_REFERENCE: &str = "https://kubernetes.io/docs/concepts/security/pod-security-standards/";

pub fn args<const N: usize>(pairs: [(&str, &str); N]) -> TextArgs {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A violation with its title and message resolved; evidence and fixes are
/// filled in by the caller.
pub fn violation(
    en: &Translator,
    policy_id: &str,
    severity: Severity,
    title_key: &str,
    message_key: &str,
    message_args: TextArgs,
) -> Violation {
    Violation {
        policy_id: policy_id.to_string(),
        title: en.t(title_key),
        title_key: Some(title_key.to_string()),
        title_args: TextArgs::new(),
        severity,
        message: en.t_args(message_key, &message_args),
        message_key: Some(message_key.to_string()),
        message_args,
        evidence: Vec::new(),
        fix: Vec::new(),
        references: vec![PSS_REFERENCE.to_string()],
    }
}

pub fn fix(
    en: &Translator,
    title_key: &str,
    detail_key: &str,
    detail_args: TextArgs,
    patch: Option<String>,
) -> Action {
    Action {
        title: en.t(title_key),
        title_key: Some(title_key.to_string()),
        title_args: TextArgs::new(),
        detail: en.t_args(detail_key, &detail_args),
        detail_key: Some(detail_key.to_string()),
        detail_args,
        patch: patch.map(|content| PatchSuggestion {
            format: ids::PATCH_STRATEGIC_MERGE.to_string(),
            content,
        }),
    }
}
