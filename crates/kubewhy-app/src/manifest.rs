use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

/// Parse a YAML or JSON manifest into a generic tree.
///
/// For multi-document YAML the first non-empty document is used.
pub fn parse_manifest(text: &str) -> anyhow::Result<Value> {
    anyhow::ensure!(!text.trim().is_empty(), "manifest is empty");

    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document).context("parse manifest")?;
        if value.is_null() {
            continue;
        }
        anyhow::ensure!(
            value.is_object(),
            "manifest must be a mapping, got {}",
            kind_of(&value)
        );
        return Ok(value);
    }
    anyhow::bail!("manifest is empty")
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_manifest() {
        let v = parse_manifest(
            "apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\nspec:\n  containers:\n    - name: web\n      image: nginx:1.25\n",
        )
        .expect("parse");
        assert_eq!(v["kind"], "Pod");
        assert_eq!(v["spec"]["containers"][0]["image"], "nginx:1.25");
    }

    #[test]
    fn json_manifest() {
        let v = parse_manifest(r#"{"kind": "Deployment", "metadata": {"name": "api"}}"#)
            .expect("parse");
        assert_eq!(v, json!({"kind": "Deployment", "metadata": {"name": "api"}}));
    }

    #[test]
    fn first_document_wins() {
        let v = parse_manifest("---\n# leading comment\n---\nkind: Pod\n---\nkind: Service\n")
            .expect("parse");
        assert_eq!(v["kind"], "Pod");
    }

    #[test]
    fn booleans_survive_as_booleans() {
        let v = parse_manifest("spec:\n  containers:\n    - securityContext:\n        privileged: true\n")
            .expect("parse");
        assert_eq!(v["spec"]["containers"][0]["securityContext"]["privileged"], json!(true));
    }

    #[test]
    fn rejects_empty_and_non_mapping() {
        assert!(parse_manifest("").is_err());
        assert!(parse_manifest("  \n").is_err());
        let err = parse_manifest("- a\n- b\n").expect_err("list");
        assert!(err.to_string().contains("a list"), "{err}");
        assert!(parse_manifest("kind: [unclosed").is_err());
    }
}
