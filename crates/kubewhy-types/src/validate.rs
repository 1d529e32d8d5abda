//! Structural validation applied before a decision is persisted and after it is read back.

use crate::decision::{DecisionStatus, SecurityDecision};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("decision ID is required")]
    MissingId,
    #[error("resource kind, name, and namespace are required")]
    IncompleteResource,
    #[error("invalid decision status: {0:?}")]
    InvalidStatus(String),
    #[error("schema version is required")]
    MissingVersion,
}

impl SecurityDecision {
    /// Check the invariants every stored decision must hold.
    ///
    /// Status/violation consistency is not enforced here; see [`Self::is_consistent`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        let r = &self.resource;
        if r.kind.is_empty() || r.name.is_empty() || r.namespace.is_empty() {
            return Err(ValidationError::IncompleteResource);
        }
        if let DecisionStatus::Other(raw) = &self.status {
            return Err(ValidationError::InvalidStatus(raw.clone()));
        }
        if self.version.is_empty() {
            return Err(ValidationError::MissingVersion);
        }
        Ok(())
    }

    /// Whether the status agrees with the violations it carries.
    ///
    /// A decision is BLOCKED exactly when it has at least one violation.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            DecisionStatus::Blocked => !self.violations.is_empty(),
            DecisionStatus::Allowed => self.violations.is_empty(),
            DecisionStatus::Other(_) => false,
        }
    }
}
