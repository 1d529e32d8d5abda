//! Durable storage for security decisions.
//!
//! Records live as one JSON file per decision in a single directory, named
//! `<unixSeconds>_<id>.json` so that reverse lexical order is newest-first.
//! Every write goes through a temp-file-then-rename sequence; a copy of the
//! last saved record is kept in `latest.json`.
//!
//! There is no cross-process locking. Concurrent writers race on the rename
//! and the last one wins.

#![forbid(unsafe_code)]

mod atomic;
mod error;
mod file;

pub use atomic::write_atomic;
pub use error::StoreError;
pub use file::{FileDecisionStore, LATEST_FILE, record_file_name, sanitize_id};

use kubewhy_types::SecurityDecision;

/// Query surface the application layer depends on.
pub trait DecisionRepository {
    fn save(&self, decision: &SecurityDecision) -> Result<(), StoreError>;

    fn get_by_id(&self, id: &str) -> Result<SecurityDecision, StoreError>;

    /// Most recent decision for the exact `kind`/`name`/`namespace` triple.
    fn get_latest(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
    ) -> Result<SecurityDecision, StoreError>;

    /// Newest first. An empty `namespace` matches all; `limit == 0` is unbounded.
    fn list(&self, namespace: &str, limit: usize) -> Result<Vec<SecurityDecision>, StoreError>;

    /// The last saved decision, whatever its resource.
    fn latest_pointer(&self) -> Result<SecurityDecision, StoreError>;
}
