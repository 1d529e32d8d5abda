//! Optional image scanning layered onto an evaluated decision.

use kubewhy_domain::{Node, extract_pod_spec};
use kubewhy_i18n::Translator;
use kubewhy_scan::{CancelToken, Runner, ScanKind, ScanResult, Scanner, scanner_for};
use kubewhy_types::{Action, SecurityDecision, TextArgs, ids};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Build scanners for the configured names. Unknown names are skipped.
pub fn build_scanners<R>(names: &[String], runner: Arc<R>) -> Vec<Box<dyn Scanner>>
where
    R: Runner + 'static,
{
    names
        .iter()
        .filter_map(|name| {
            let scanner = scanner_for(name, Arc::clone(&runner));
            if scanner.is_none() {
                warn!(scanner = %name, "unknown scanner, skipping");
            }
            scanner
        })
        .collect()
}

/// Distinct container images in manifest order.
pub fn container_images(resource: &Value) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    let Some(pod) = extract_pod_spec(Node::new(resource)) else {
        return images;
    };
    for (_, container) in pod.containers() {
        if let Some(image) = container.str_at("image").filter(|s| !s.is_empty())
            && !images.iter().any(|seen| seen == image)
        {
            images.push(image.to_string());
        }
    }
    images
}

/// Scan every image with every available scanner and fold the results into
/// `decision`.
///
/// Results become evidence on the mutable-tag violation for the same image
/// and a `scan.<tool>.<n>` metadata entry, where `n` is the image's index.
/// Scanner failures are logged and never fail the evaluation.
pub fn enrich_with_scans(
    decision: &mut SecurityDecision,
    images: &[String],
    scanners: &[Box<dyn Scanner>],
    timeout: Duration,
) {
    let en = Translator::english();
    for scanner in scanners {
        if !scanner.available() {
            warn!(scanner = scanner.name(), "scanner not available, skipping");
            continue;
        }
        for (n, image) in images.iter().enumerate() {
            let cancel = CancelToken::with_timeout(timeout);
            match scanner.scan(image, &cancel) {
                Ok(result) => {
                    info!(scanner = scanner.name(), image = %image, summary = %result.summary(), "scanned image");
                    apply(decision, &en, image, n, &result);
                }
                Err(err) => {
                    warn!(scanner = scanner.name(), image = %image, error = %err, "scan failed");
                }
            }
        }
    }
}

fn apply(
    decision: &mut SecurityDecision,
    en: &Translator,
    image: &str,
    n: usize,
    result: &ScanResult,
) {
    decision.metadata.insert(
        format!("scan.{}.{n}", result.scanner),
        format!("{image}: {}", result.summary()),
    );

    let mut matched = false;
    for v in decision
        .violations
        .iter_mut()
        .filter(|v| v.policy_id == ids::POLICY_MUTABLE_IMAGE_TAG)
        .filter(|v| v.evidence.first().is_some_and(|e| e.detail == image))
    {
        v.evidence.push(result.to_evidence(image));
        matched = true;
    }

    if matched && result.kind == ScanKind::Vulnerability && result.vuln_count > 0 {
        push_scan_action(decision, en, image);
    }
}

fn push_scan_action(decision: &mut SecurityDecision, en: &Translator, image: &str) {
    let mut detail_args = TextArgs::new();
    detail_args.insert("image".to_string(), image.to_string());
    let action = Action {
        title: en.t(ids::KEY_NEXT_SCAN_IMAGE_TITLE),
        title_key: Some(ids::KEY_NEXT_SCAN_IMAGE_TITLE.to_string()),
        detail: en.t_args(ids::KEY_NEXT_SCAN_IMAGE_DETAIL, &detail_args),
        detail_key: Some(ids::KEY_NEXT_SCAN_IMAGE_DETAIL.to_string()),
        detail_args,
        ..Action::default()
    };
    if !decision.next_actions.contains(&action) {
        decision.next_actions.push(action);
    }
}
