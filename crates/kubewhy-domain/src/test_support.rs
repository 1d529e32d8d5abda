use serde_json::{Value, json};

/// A container that passes every check.
pub fn compliant_container(name: &str) -> Value {
    json!({
        "name": name,
        "image": format!("{name}:1.0.0"),
        "securityContext": {"runAsNonRoot": true, "privileged": false}
    })
}

pub fn container(name: &str, image: &str) -> Value {
    json!({"name": name, "image": image})
}

pub fn with_security_context(mut container: Value, ctx: Value) -> Value {
    if let Some(obj) = container.as_object_mut() {
        obj.insert("securityContext".to_string(), ctx);
    }
    container
}

pub fn deployment(name: &str, pod_spec: Value) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": name, "namespace": "production"},
        "spec": {
            "replicas": 1,
            "template": {"metadata": {"labels": {"app": name}}, "spec": pod_spec}
        }
    })
}

pub fn pod(name: &str, pod_spec: Value) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {"name": name, "namespace": "default"},
        "spec": pod_spec
    })
}

pub fn pod_spec(containers: Vec<Value>) -> Value {
    json!({ "containers": containers })
}
