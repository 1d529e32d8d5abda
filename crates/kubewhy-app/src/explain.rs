//! The `explain` use case: look up policy documentation.

use kubewhy_types::explain::{self, PolicyExplanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(PolicyExplanation),
    /// Unknown identifier; includes the known policy ids.
    NotFound {
        identifier: String,
        available: &'static [&'static str],
    },
}

/// Look up an explanation for a policy id. Matching ignores ASCII case.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let normalized = identifier.trim().to_ascii_uppercase();
    match explain::lookup_policy(&normalized) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: explain::all_policy_ids(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &PolicyExplanation) -> String {
    let mut out = String::new();

    let heading = format!("{}: {}", exp.policy_id, exp.title);
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count()));
    out.push_str("\n\n");
    out.push_str(&format!("Severity: {}\n\n", exp.severity));
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (blocked):\n");
    out.push_str("```yaml\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (allowed):\n");
    out.push_str("```yaml\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown policy id: {identifier}\n\n"));
    out.push_str("Available policy ids:\n");
    for id in available {
        out.push_str(&format!("  - {id}\n"));
    }

    out
}
