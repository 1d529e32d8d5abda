//! Adapters for external image scanners.
//!
//! Nothing here is a scanner: the crate runs `trivy` / `syft` through a
//! [`Runner`] and normalizes their JSON into a [`ScanResult`]. Tests swap in
//! [`FakeRunner`].

#![forbid(unsafe_code)]

mod error;
mod fake;
mod runner;
mod syft;
mod trivy;

pub use error::ScanError;
pub use fake::{FakeCall, FakeResult, FakeRunner};
pub use runner::{CancelToken, Output, Runner, SystemRunner};
pub use syft::SyftScanner;
pub use trivy::TrivyScanner;

use kubewhy_types::{Evidence, EvidenceKind};
use serde::Serialize;
use serde_json::{Map, json};
use std::time::Duration;

/// Size of the "top" lists kept from a scan.
pub const TOP_LIMIT: usize = 5;

/// Scanner names accepted in configuration.
pub const KNOWN_SCANNERS: [&str; 2] = ["trivy", "syft"];

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Vulnerability,
    Sbom,
}

/// Normalized output of one scanner run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub scanner: String,
    pub kind: ScanKind,
    pub vuln_count: usize,
    pub top_cves: Vec<String>,
    pub package_count: usize,
    pub top_packages: Vec<String>,
}

impl ScanResult {
    /// One-line description, e.g. `3 vulnerabilities (top: CVE-1, CVE-2)`.
    pub fn summary(&self) -> String {
        let (count, noun, top) = match self.kind {
            ScanKind::Vulnerability => (self.vuln_count, "vulnerabilities", &self.top_cves),
            ScanKind::Sbom => (self.package_count, "packages", &self.top_packages),
        };
        if top.is_empty() {
            format!("{count} {noun}")
        } else {
            format!("{count} {noun} (top: {})", top.join(", "))
        }
    }

    /// Evidence entry for `image`, with the counts kept in `raw`.
    pub fn to_evidence(&self, image: &str) -> Evidence {
        let mut raw = Map::new();
        raw.insert("scanner".to_string(), json!(self.scanner));
        let kind = match self.kind {
            ScanKind::Vulnerability => {
                raw.insert("vulnCount".to_string(), json!(self.vuln_count));
                raw.insert("topCves".to_string(), json!(self.top_cves));
                EvidenceKind::ImageScan
            }
            ScanKind::Sbom => {
                raw.insert("packageCount".to_string(), json!(self.package_count));
                raw.insert("topPackages".to_string(), json!(self.top_packages));
                EvidenceKind::Sbom
            }
        };
        Evidence {
            kind,
            subject: image.to_string(),
            detail: self.summary(),
            raw: Some(raw),
        }
    }
}

/// An external tool that can describe a container image.
pub trait Scanner {
    fn name(&self) -> &'static str;

    /// Whether the tool is installed and answers its version probe.
    fn available(&self) -> bool;

    fn scan(&self, image: &str, cancel: &CancelToken) -> Result<ScanResult, ScanError>;
}

/// Build the scanner registered under `name`, if any.
pub fn scanner_for<R>(name: &str, runner: R) -> Option<Box<dyn Scanner>>
where
    R: Runner + 'static,
{
    match name {
        "trivy" => Some(Box::new(TrivyScanner::new(runner))),
        "syft" => Some(Box::new(SyftScanner::new(runner))),
        _ => None,
    }
}
