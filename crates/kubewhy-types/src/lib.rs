//! Stable DTOs and IDs used across the kubewhy workspace.
//!
//! This crate is intentionally boring:
//! - the persisted security decision record and its validation rules
//! - stable policy IDs and message keys
//! - explain registry for remediation guidance
//! - a canonical example decision used by docs and `kubectl-why example`

#![forbid(unsafe_code)]

pub mod decision;
pub mod examples;
pub mod explain;
pub mod ids;
pub mod validate;

pub use decision::{
    Action, DECISION_SCHEMA_VERSION, DecisionStatus, Evidence, EvidenceKind, PatchSuggestion,
    ResourceRef, SecurityDecision, Severity, TextArgs, Violation,
};
pub use examples::example_blocked_decision;
pub use explain::{ExamplePair, PolicyExplanation, all_policy_ids, lookup_policy};
pub use validate::ValidationError;
