//! Developer tasks (schema generation and fixture checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn decision_fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures").join("decisions")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_decision_schema() -> schemars::Schema {
    schema_for!(kubewhy_types::SecurityDecision)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(kubewhy_settings::KubewhyConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "kubewhy.decision.v1.json",
            generate: generate_decision_schema,
        },
        SchemaSpec {
            filename: "kubewhy.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Fail if the committed schemas differ from what the types generate.
fn check_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema check failed")
}

/// Validate every decision fixture against the generated schema and the
/// model's own validation.
fn check_fixtures() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_decision_schema())
        .context("Failed to convert decision schema")?;
    let compiled = jsonschema::draft7::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))?;

    let dir = decision_fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for path in &entries {
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {filename}"))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {filename} as JSON"))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{filename}: schema validation: {err}"));
        }

        match serde_json::from_value::<kubewhy_types::SecurityDecision>(value) {
            Ok(decision) => {
                if let Err(err) = decision.validate() {
                    errors.push(format!("{filename}: {err}"));
                }
            }
            Err(err) => errors.push(format!("{filename}: decode: {err}")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} decision fixtures are valid", entries.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Fixture validation failed with {} errors", errors.len())
    }
}

/// Every policy id has a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let ids = kubewhy_types::all_policy_ids();
    let mut errors = Vec::new();

    for id in ids {
        match kubewhy_types::lookup_policy(id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                    ("examples.before", exp.examples.before),
                    ("examples.after", exp.examples.after),
                ] {
                    if text.trim().is_empty() {
                        errors.push(format!("Policy '{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("Policy '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} policies have explanations", ids.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Explain coverage failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  check-schemas     Check that schemas/ matches generated output (for CI)");
    eprintln!("  check-fixtures    Validate tests/fixtures/decisions against the decision schema");
    eprintln!("  explain-coverage  Check that every policy id has an explanation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "check-schemas" => check_schemas(),
        "check-fixtures" => check_fixtures(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
