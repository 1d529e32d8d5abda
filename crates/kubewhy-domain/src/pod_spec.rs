//! Locating the container-bearing spec inside a workload.
//!
//! Two shapes are recognised:
//! - `Direct`: a Pod, whose `spec` holds `containers` itself
//! - `Templated`: Deployment/StatefulSet/DaemonSet/Job, with `spec.template.spec`
//!
//! Supporting another shape means adding a variant here.

use crate::resource::Node;
use serde_json::{Map, Value, json};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodSpecShape {
    Direct,
    Templated,
}

impl PodSpecShape {
    /// Dotted path from the resource root to the pod spec.
    pub fn prefix(self) -> &'static str {
        match self {
            PodSpecShape::Direct => "spec",
            PodSpecShape::Templated => "spec.template.spec",
        }
    }

    /// Wrap a pod-spec fragment so it applies at the resource root.
    fn wrap(self, pod_spec: Value) -> Value {
        match self {
            PodSpecShape::Direct => json!({ "spec": pod_spec }),
            PodSpecShape::Templated => json!({ "spec": { "template": { "spec": pod_spec } } }),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PodSpec<'a> {
    pub shape: PodSpecShape,
    pub node: Node<'a>,
}

/// Find the pod spec of `resource`, if it has one.
pub fn extract_pod_spec(resource: Node<'_>) -> Option<PodSpec<'_>> {
    let spec = resource.get("spec");
    if spec.has("containers") {
        return Some(PodSpec {
            shape: PodSpecShape::Direct,
            node: spec,
        });
    }
    let templated = spec.path("template.spec");
    if templated.is_object() {
        return Some(PodSpec {
            shape: PodSpecShape::Templated,
            node: templated,
        });
    }
    None
}

impl<'a> PodSpec<'a> {
    /// Container entries with their list index. Non-object entries are skipped
    /// but still consume an index.
    pub fn containers(self) -> impl Iterator<Item = (usize, Node<'a>)> + 'a {
        self.node
            .get("containers")
            .items()
            .filter(|(_, c)| c.is_object())
    }

    pub fn volumes(self) -> impl Iterator<Item = (usize, Node<'a>)> + 'a {
        self.node
            .get("volumes")
            .items()
            .filter(|(_, v)| v.is_object())
    }

    /// Full dotted path to a field below the pod spec.
    pub fn field_path(&self, rest: &str) -> String {
        format!("{}.{}", self.shape.prefix(), rest)
    }

    /// Strategic-merge patch that merges `fields` into the named container.
    pub fn container_patch(&self, container: &str, fields: Value) -> String {
        let mut entry = Map::new();
        entry.insert("name".to_string(), Value::String(container.to_string()));
        if let Value::Object(extra) = fields {
            entry.extend(extra);
        }
        let patch = self
            .shape
            .wrap(json!({ "containers": [Value::Object(entry)] }));
        patch.to_string()
    }
}

/// Name of a container or volume entry, `unknown` when absent.
pub fn entry_name<'a>(entry: Node<'a>) -> &'a str {
    entry.str_at("name").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pod_is_direct() {
        let v = json!({"kind": "Pod", "spec": {"containers": [{"name": "a"}]}});
        let pod = extract_pod_spec(Node::new(&v)).expect("pod spec");
        assert_eq!(pod.shape, PodSpecShape::Direct);
        assert_eq!(pod.field_path("containers[0].image"), "spec.containers[0].image");
    }

    #[test]
    fn deployment_is_templated() {
        let v = json!({"spec": {"replicas": 2, "template": {"spec": {"containers": []}}}});
        let pod = extract_pod_spec(Node::new(&v)).expect("pod spec");
        assert_eq!(pod.shape, PodSpecShape::Templated);
        assert_eq!(
            pod.field_path("volumes[1].hostPath"),
            "spec.template.spec.volumes[1].hostPath"
        );
    }

    #[test]
    fn no_recognised_shape() {
        for v in [
            json!({}),
            json!({"spec": "nope"}),
            json!({"spec": {"template": {"spec": []}}}),
            json!({"data": {"key": "value"}}),
        ] {
            assert!(extract_pod_spec(Node::new(&v)).is_none(), "{v}");
        }
    }

    #[test]
    fn container_patch_targets_shape() {
        let v = json!({"spec": {"template": {"spec": {"containers": []}}}});
        let pod = extract_pod_spec(Node::new(&v)).expect("pod spec");
        let patch: Value = serde_json::from_str(
            &pod.container_patch("web", json!({"securityContext": {"runAsNonRoot": true}})),
        )
        .expect("patch is json");
        assert_eq!(
            patch,
            json!({"spec": {"template": {"spec": {"containers": [
                {"name": "web", "securityContext": {"runAsNonRoot": true}}
            ]}}}})
        );
    }

    #[test]
    fn non_object_entries_keep_their_index() {
        let v = json!({"spec": {"containers": ["junk", {"name": "real"}]}});
        let pod = extract_pod_spec(Node::new(&v)).expect("pod spec");
        let found: Vec<(usize, &str)> = pod
            .containers()
            .map(|(i, c)| (i, entry_name(c)))
            .collect();
        assert_eq!(found, vec![(1, "real")]);
    }
}
