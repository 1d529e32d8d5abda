//! The `show` use case: read one stored decision back.

use anyhow::Context;
use kubewhy_store::DecisionRepository;
use kubewhy_types::SecurityDecision;
use tracing::warn;

const DEFAULT_NAMESPACE: &str = "default";

/// Which decision to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShowQuery {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
}

/// Resolve `query` against the store.
///
/// Lookup order: exact id, then the latest decision for a kind/name pair
/// (namespace defaults to `default`), then the store's latest pointer.
pub fn run_show(
    query: &ShowQuery,
    store: &dyn DecisionRepository,
) -> anyhow::Result<SecurityDecision> {
    let decision = match (&query.id, &query.kind, &query.name) {
        (Some(id), _, _) => store
            .get_by_id(id)
            .with_context(|| format!("load decision {id}"))?,
        (None, Some(kind), Some(name)) => {
            let namespace = query.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
            store
                .get_latest(kind, name, namespace)
                .with_context(|| format!("load latest decision for {kind}/{name} in {namespace}"))?
        }
        (None, Some(_), None) | (None, None, Some(_)) => {
            anyhow::bail!("--kind and --name must be given together")
        }
        (None, None, None) => store.latest_pointer().context("load latest decision")?,
    };

    if !decision.is_consistent() {
        warn!(
            id = %decision.id,
            status = %decision.status,
            violations = decision.violations.len(),
            "decision status disagrees with its violations"
        );
    }
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use kubewhy_store::{FileDecisionStore, StoreError};
    use kubewhy_types::{DecisionStatus, ResourceRef, SecurityDecision};
    use time::macros::datetime;

    fn decision(id: &str, name: &str, ns: &str, minute: u8) -> SecurityDecision {
        SecurityDecision {
            id: id.to_string(),
            timestamp: datetime!(2026-02-05 16:00 UTC) + time::Duration::minutes(minute.into()),
            resource: ResourceRef {
                kind: "Pod".to_string(),
                name: name.to_string(),
                namespace: ns.to_string(),
                ..ResourceRef::default()
            },
            status: DecisionStatus::Allowed,
            summary: "Resource meets security requirements".to_string(),
            summary_key: None,
            summary_args: Default::default(),
            violations: Vec::new(),
            next_actions: Vec::new(),
            metadata: Default::default(),
            version: "v1alpha1".to_string(),
        }
    }

    fn seeded() -> (tempfile::TempDir, FileDecisionStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 path");
        let store = FileDecisionStore::open(path).expect("open");
        store.save(&decision("a", "web", "default", 0)).expect("save");
        store.save(&decision("b", "web", "default", 1)).expect("save");
        store.save(&decision("c", "api", "prod", 2)).expect("save");
        (dir, store)
    }

    #[test]
    fn by_id() {
        let (_dir, store) = seeded();
        let query = ShowQuery {
            id: Some("a".to_string()),
            ..ShowQuery::default()
        };
        assert_eq!(run_show(&query, &store).expect("show").id, "a");
    }

    #[test]
    fn by_resource_defaults_namespace() {
        let (_dir, store) = seeded();
        let query = ShowQuery {
            kind: Some("Pod".to_string()),
            name: Some("web".to_string()),
            ..ShowQuery::default()
        };
        assert_eq!(run_show(&query, &store).expect("show").id, "b");

        let query = ShowQuery {
            kind: Some("Pod".to_string()),
            name: Some("api".to_string()),
            namespace: Some("prod".to_string()),
            ..ShowQuery::default()
        };
        assert_eq!(run_show(&query, &store).expect("show").id, "c");
    }

    #[test]
    fn no_query_uses_latest_pointer() {
        let (_dir, store) = seeded();
        assert_eq!(run_show(&ShowQuery::default(), &store).expect("show").id, "c");
    }

    #[test]
    fn kind_without_name_is_rejected() {
        let (_dir, store) = seeded();
        let query = ShowQuery {
            kind: Some("Pod".to_string()),
            ..ShowQuery::default()
        };
        let err = run_show(&query, &store).expect_err("incomplete");
        assert!(err.to_string().contains("together"), "{err}");
    }

    #[test]
    fn missing_id_keeps_not_found_cause() {
        let (_dir, store) = seeded();
        let query = ShowQuery {
            id: Some("nope".to_string()),
            ..ShowQuery::default()
        };
        let err = run_show(&query, &store).expect_err("missing");
        assert_eq!(err.to_string(), "load decision nope");
        let cause = err.downcast_ref::<StoreError>().expect("store error");
        assert!(cause.is_not_found());
    }

    #[test]
    fn inconsistent_decision_is_still_returned() {
        let (_dir, store) = seeded();
        let mut d = decision("odd", "web", "default", 5);
        d.status = DecisionStatus::Blocked;
        store.save(&d).expect("save");
        let query = ShowQuery {
            id: Some("odd".to_string()),
            ..ShowQuery::default()
        };
        assert_eq!(run_show(&query, &store).expect("show"), d);
    }
}
