use crate::DecisionRepository;
use crate::atomic::write_atomic;
use crate::error::{StoreError, io_error};
use camino::{Utf8Path, Utf8PathBuf};
use kubewhy_types::SecurityDecision;
use tracing::{debug, warn};

/// Fixed name of the copy of the most recently saved record.
pub const LATEST_FILE: &str = "latest.json";

const RECORD_EXT: &str = ".json";

/// Replace path separators so an id can never escape the store directory.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if std::path::is_separator(c) { '-' } else { c })
        .collect()
}

/// `<unixSeconds>_<sanitizedId>.json`
pub fn record_file_name(decision: &SecurityDecision) -> String {
    format!(
        "{}_{}{RECORD_EXT}",
        decision.timestamp.unix_timestamp(),
        sanitize_id(&decision.id)
    )
}

fn is_timestamp_prefix(prefix: &str) -> bool {
    let digits = prefix.strip_prefix('-').unwrap_or(prefix);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone, Debug)]
pub struct FileDecisionStore {
    dir: Utf8PathBuf,
}

impl FileDecisionStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<Utf8PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(io_error("create_dir", &dir))?;
        Ok(Self { dir })
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Validate, write the record, then refresh `latest.json`. Returns the record path.
    pub fn save(&self, decision: &SecurityDecision) -> Result<Utf8PathBuf, StoreError> {
        decision.validate()?;

        let mut bytes = serde_json::to_vec_pretty(decision)?;
        bytes.push(b'\n');

        let path = self.dir.join(record_file_name(decision));
        write_atomic(&path, &bytes)?;
        write_atomic(&self.dir.join(LATEST_FILE), &bytes)?;

        debug!(id = %decision.id, path = %path, "saved decision");
        Ok(path)
    }

    pub fn get_by_id(&self, id: &str) -> Result<SecurityDecision, StoreError> {
        let names = self.record_names()?;

        let suffix = format!("_{}{RECORD_EXT}", sanitize_id(id));
        for name in names.iter().filter(|n| n.ends_with(&suffix)) {
            // `9_dec_1.json` also ends with `_1.json`; only an exact name owns the error.
            let exact = name
                .strip_suffix(&suffix)
                .is_some_and(is_timestamp_prefix);
            match self.read_record(name) {
                Ok(decision) if decision.id == id => return Ok(decision),
                Ok(_) => {}
                Err(err) if exact => return Err(err),
                Err(err) => debug!(file = %name, error = %err, "skipping suffix match"),
            }
        }

        // Slow path: ids whose sanitized form collides, or files named by hand.
        for name in &names {
            match self.read_record(name) {
                Ok(decision) if decision.id == id => return Ok(decision),
                Ok(_) => {}
                Err(err) => debug!(file = %name, error = %err, "skipping record during id scan"),
            }
        }

        Err(StoreError::NotFound(format!("decision {id}")))
    }

    pub fn get_latest(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
    ) -> Result<SecurityDecision, StoreError> {
        self.valid_records()?
            .find(|d| {
                d.resource.kind == kind && d.resource.name == name && d.resource.namespace == namespace
            })
            .ok_or_else(|| {
                StoreError::NotFound(format!("latest decision for {kind}/{name} in {namespace}"))
            })
    }

    pub fn list(&self, namespace: &str, limit: usize) -> Result<Vec<SecurityDecision>, StoreError> {
        let matching = self
            .valid_records()?
            .filter(|d| namespace.is_empty() || d.resource.namespace == namespace);
        let out = if limit == 0 {
            matching.collect()
        } else {
            matching.take(limit).collect()
        };
        Ok(out)
    }

    /// The record in `latest.json`, validated like any other read.
    pub fn latest_pointer(&self) -> Result<SecurityDecision, StoreError> {
        let path = self.dir.join(LATEST_FILE);
        if !path.is_file() {
            return Err(StoreError::NotFound(format!("{path}")));
        }
        read_decision(&path)
    }

    /// Candidate record file names, newest first.
    fn record_names(&self) -> Result<Vec<String>, StoreError> {
        let entries = std::fs::read_dir(&self.dir).map_err(io_error("read_dir", &self.dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error("read_dir", &self.dir))?;
            let is_file = entry
                .file_type()
                .map_err(io_error("read_dir", &self.dir))?
                .is_file();
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_file && name != LATEST_FILE && name.ends_with(RECORD_EXT) {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    fn read_record(&self, name: &str) -> Result<SecurityDecision, StoreError> {
        read_decision(&self.dir.join(name))
    }

    /// Decodable, valid records, newest first. Bad files are logged and skipped.
    fn valid_records(&self) -> Result<impl Iterator<Item = SecurityDecision> + '_, StoreError> {
        let names = self.record_names()?;
        Ok(names
            .into_iter()
            .filter_map(move |name| match self.read_record(&name) {
                Ok(d) => Some(d),
                Err(err) => {
                    warn!(file = %name, error = %err, "skipping unreadable decision record");
                    None
                }
            }))
    }
}

fn read_decision(path: &Utf8Path) -> Result<SecurityDecision, StoreError> {
    let bytes = std::fs::read(path).map_err(io_error("read", path))?;
    let decision: SecurityDecision =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::InvalidData {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    decision.validate().map_err(|e| StoreError::InvalidData {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(decision)
}

impl DecisionRepository for FileDecisionStore {
    fn save(&self, decision: &SecurityDecision) -> Result<(), StoreError> {
        FileDecisionStore::save(self, decision).map(|_| ())
    }

    fn get_by_id(&self, id: &str) -> Result<SecurityDecision, StoreError> {
        FileDecisionStore::get_by_id(self, id)
    }

    fn get_latest(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
    ) -> Result<SecurityDecision, StoreError> {
        FileDecisionStore::get_latest(self, kind, name, namespace)
    }

    fn list(&self, namespace: &str, limit: usize) -> Result<Vec<SecurityDecision>, StoreError> {
        FileDecisionStore::list(self, namespace, limit)
    }

    fn latest_pointer(&self) -> Result<SecurityDecision, StoreError> {
        FileDecisionStore::latest_pointer(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubewhy_types::{DecisionStatus, ResourceRef, example_blocked_decision};
    use time::macros::datetime;

    #[test]
    fn separators_are_replaced() {
        assert_eq!(sanitize_id("team/dec-1"), "team-dec-1");
        assert_eq!(sanitize_id("dec-1"), "dec-1");
        #[cfg(windows)]
        assert_eq!(sanitize_id("a\\b"), "a-b");
    }

    #[test]
    fn file_name_starts_with_unix_seconds() {
        let mut d = example_blocked_decision();
        d.id = "ns/dec".to_string();
        d.timestamp = datetime!(2026-02-05 16:00 UTC);
        assert_eq!(record_file_name(&d), "1770307200_ns-dec.json");
    }

    #[test]
    fn invalid_decision_never_touches_disk() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = Utf8PathBuf::from_path_buf(tmp.path().join("store")).expect("utf8");
        let store = FileDecisionStore::open(dir.clone()).expect("open");

        let mut d = example_blocked_decision();
        d.status = DecisionStatus::Other("MAYBE".to_string());
        let err = store.save(&d).expect_err("invalid status");
        assert!(matches!(err, StoreError::Validation(_)), "{err:?}");

        d = example_blocked_decision();
        d.resource = ResourceRef::default();
        assert!(store.save(&d).is_err());

        assert_eq!(std::fs::read_dir(&dir).expect("read").count(), 0);
    }
}
