//! Stable identifiers for policies and message keys.
//!
//! Policy IDs are `POL-SEC-NNN`. Message keys are dotted paths into the locale bundles.

// Policies
pub const POLICY_PRIVILEGED: &str = "POL-SEC-001";
pub const POLICY_HOST_PATH: &str = "POL-SEC-002";
pub const POLICY_RUN_AS_NON_ROOT: &str = "POL-SEC-003";
pub const POLICY_MUTABLE_IMAGE_TAG: &str = "POL-SEC-004";

// Keys: POL-SEC-001
pub const KEY_PRIVILEGED_TITLE: &str = "violation.k8s.privileged.title";
pub const KEY_PRIVILEGED_MESSAGE: &str = "violation.k8s.privileged.message";
pub const KEY_FIX_DISABLE_PRIVILEGED_TITLE: &str = "action.fix.disable_privileged.title";
pub const KEY_FIX_DISABLE_PRIVILEGED_DETAIL: &str = "action.fix.disable_privileged.detail";

// Keys: POL-SEC-002
pub const KEY_HOST_PATH_TITLE: &str = "violation.k8s.hostpath.title";
pub const KEY_HOST_PATH_MESSAGE: &str = "violation.k8s.hostpath.message";
pub const KEY_FIX_REPLACE_HOST_PATH_TITLE: &str = "action.fix.replace_hostpath.title";
pub const KEY_FIX_REPLACE_HOST_PATH_DETAIL: &str = "action.fix.replace_hostpath.detail";

// Keys: POL-SEC-003
pub const KEY_RUN_AS_NON_ROOT_TITLE: &str = "violation.k8s.runasnonroot.title";
pub const KEY_RUN_AS_NON_ROOT_MESSAGE: &str = "violation.k8s.runasnonroot.message";
pub const KEY_FIX_SET_RUN_AS_NON_ROOT_TITLE: &str = "action.fix.set_runasnonroot.title";
pub const KEY_FIX_SET_RUN_AS_NON_ROOT_DETAIL: &str = "action.fix.set_runasnonroot.detail";

// Keys: POL-SEC-004
pub const KEY_IMAGE_LATEST_TITLE: &str = "violation.image.latest.title";
pub const KEY_IMAGE_LATEST_MESSAGE: &str = "violation.image.latest.message";
pub const KEY_FIX_PIN_IMAGE_TITLE: &str = "action.fix.pin_image.title";
pub const KEY_FIX_PIN_IMAGE_DETAIL: &str = "action.fix.pin_image.detail";

// Keys: decision summaries
pub const KEY_SUMMARY_ALLOWED: &str = "decision.summary.allowed";
pub const KEY_SUMMARY_BLOCKED_CRITICAL_HIGH: &str = "decision.summary.blocked.critical_high";
pub const KEY_SUMMARY_BLOCKED_CRITICAL: &str = "decision.summary.blocked.critical";
pub const KEY_SUMMARY_BLOCKED_HIGH: &str = "decision.summary.blocked.high";
pub const KEY_SUMMARY_BLOCKED_OTHER: &str = "decision.summary.blocked.other";

// Keys: next actions
pub const KEY_NEXT_REVIEW_TITLE: &str = "action.next.review.title";
pub const KEY_NEXT_REVIEW_DETAIL: &str = "action.next.review.detail";
pub const KEY_NEXT_UPDATE_MANIFEST_TITLE: &str = "action.next.update_manifest.title";
pub const KEY_NEXT_UPDATE_MANIFEST_DETAIL: &str = "action.next.update_manifest.detail";
pub const KEY_NEXT_SCAN_IMAGE_TITLE: &str = "action.next.scan_image.title";
pub const KEY_NEXT_SCAN_IMAGE_DETAIL: &str = "action.next.scan_image.detail";

// Keys: human output chrome
pub const KEY_OUTPUT_REASON: &str = "output.reason";
pub const KEY_OUTPUT_STATUS: &str = "output.status";
pub const KEY_OUTPUT_RESOURCE: &str = "output.resource";
pub const KEY_OUTPUT_NAMESPACE: &str = "output.namespace";
pub const KEY_OUTPUT_DECISION: &str = "output.decision";
pub const KEY_OUTPUT_TIME: &str = "output.time";
pub const KEY_SECTION_VIOLATIONS: &str = "section.violations";
pub const KEY_SECTION_NEXT_ACTIONS: &str = "section.nextActions";
pub const KEY_LABEL_WHAT: &str = "label.what";
pub const KEY_LABEL_EVIDENCE: &str = "label.evidence";
pub const KEY_LABEL_FIX: &str = "label.fix";

// Patch flavours
pub const PATCH_STRATEGIC_MERGE: &str = "strategic-merge";
