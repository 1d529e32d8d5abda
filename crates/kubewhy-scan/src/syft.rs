use crate::error::ScanError;
use crate::runner::{CancelToken, Runner, SystemRunner};
use crate::{PROBE_TIMEOUT, ScanKind, ScanResult, Scanner, TOP_LIMIT};
use serde::Deserialize;
use tracing::debug;

const TOOL: &str = "syft";

/// SBOM generation through the `syft` CLI.
#[derive(Clone, Debug, Default)]
pub struct SyftScanner<R = SystemRunner> {
    runner: R,
}

impl<R: Runner> SyftScanner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: Runner> Scanner for SyftScanner<R> {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn available(&self) -> bool {
        let probe = CancelToken::with_timeout(PROBE_TIMEOUT);
        let ok = self
            .runner
            .run(TOOL, &["version"], None, &probe)
            .is_ok_and(|out| out.success);
        debug!(tool = TOOL, available = ok, "probed scanner");
        ok
    }

    fn scan(&self, image: &str, cancel: &CancelToken) -> Result<ScanResult, ScanError> {
        let out = self.runner.run(TOOL, &[image, "-o", "json"], None, cancel)?;
        if !out.success {
            return Err(ScanError::exec(TOOL, &out.stderr));
        }
        parse_sbom(&out.stdout)
    }
}

#[derive(Deserialize)]
struct Sbom {
    #[serde(default)]
    artifacts: Option<Vec<Artifact>>,
}

#[derive(Deserialize)]
struct Artifact {
    #[serde(default)]
    name: String,
}

pub(crate) fn parse_sbom(bytes: &[u8]) -> Result<ScanResult, ScanError> {
    let sbom: Sbom = serde_json::from_slice(bytes).map_err(|source| ScanError::Parse {
        tool: TOOL.to_string(),
        source,
    })?;
    let names: Vec<String> = sbom
        .artifacts
        .unwrap_or_default()
        .into_iter()
        .map(|a| a.name)
        .collect();

    Ok(ScanResult {
        scanner: TOOL.to_string(),
        kind: ScanKind::Sbom,
        vuln_count: 0,
        top_cves: Vec::new(),
        package_count: names.len(),
        top_packages: names.into_iter().take(TOP_LIMIT).collect(),
    })
}
