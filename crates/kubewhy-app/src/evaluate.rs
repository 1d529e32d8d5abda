//! The `evaluate` use case: manifest text in, persisted decision out.

use crate::manifest::parse_manifest;
use crate::scan::{container_images, enrich_with_scans};
use anyhow::Context;
use kubewhy_domain::Evaluator;
use kubewhy_scan::Scanner;
use kubewhy_settings::ResolvedConfig;
use kubewhy_store::DecisionRepository;
use kubewhy_types::SecurityDecision;
use time::OffsetDateTime;
use tracing::info;

/// Input for the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Manifest text (YAML or JSON).
    pub manifest: &'a str,
    /// Decision id; `dec-<unix seconds>` when absent.
    pub id: Option<String>,
    pub now: OffsetDateTime,
    pub save: bool,
}

/// Evaluate a manifest, optionally scan its images, and persist the result.
///
/// `scanners` is only consulted when scanning is enabled in `config`.
pub fn run_evaluate(
    input: EvaluateInput<'_>,
    config: &ResolvedConfig,
    store: &dyn DecisionRepository,
    scanners: &[Box<dyn Scanner>],
) -> anyhow::Result<SecurityDecision> {
    let resource = parse_manifest(input.manifest)?;

    let now = input.now.replace_nanosecond(0).unwrap_or(input.now);
    let id = input
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("dec-{}", now.unix_timestamp()));

    let evaluator = Evaluator::new(config.schema_version.clone());
    let mut decision = evaluator.evaluate(&resource, now, &id);

    if config.scan.enabled {
        let images = container_images(&resource);
        enrich_with_scans(&mut decision, &images, scanners, config.scan.timeout);
    }

    info!(
        id = %decision.id,
        status = %decision.status,
        violations = decision.violations.len(),
        "evaluated resource"
    );

    if input.save {
        store
            .save(&decision)
            .with_context(|| format!("save decision {}", decision.id))?;
    }

    Ok(decision)
}
