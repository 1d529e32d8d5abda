use crate::error::ScanError;
use crate::runner::{CancelToken, Runner, SystemRunner};
use crate::{PROBE_TIMEOUT, ScanKind, ScanResult, Scanner, TOP_LIMIT};
use serde::Deserialize;
use tracing::debug;

const TOOL: &str = "trivy";

/// Vulnerability scanning through the `trivy` CLI.
#[derive(Clone, Debug, Default)]
pub struct TrivyScanner<R = SystemRunner> {
    runner: R,
}

impl<R: Runner> TrivyScanner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: Runner> Scanner for TrivyScanner<R> {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn available(&self) -> bool {
        let probe = CancelToken::with_timeout(PROBE_TIMEOUT);
        let ok = self
            .runner
            .run(TOOL, &["--version"], None, &probe)
            .is_ok_and(|out| out.success);
        debug!(tool = TOOL, available = ok, "probed scanner");
        ok
    }

    fn scan(&self, image: &str, cancel: &CancelToken) -> Result<ScanResult, ScanError> {
        let out = self.runner.run(
            TOOL,
            &["image", "--format", "json", "--quiet", image],
            None,
            cancel,
        )?;
        if !out.success {
            return Err(ScanError::exec(TOOL, &out.stderr));
        }
        parse_report(&out.stdout)
    }
}

#[derive(Deserialize)]
struct Report {
    #[serde(rename = "Results", default)]
    results: Option<Vec<Target>>,
}

#[derive(Deserialize)]
struct Target {
    #[serde(rename = "Vulnerabilities", default)]
    vulnerabilities: Option<Vec<Vulnerability>>,
}

#[derive(Deserialize)]
struct Vulnerability {
    #[serde(rename = "VulnerabilityID", default)]
    id: String,
}

/// Count vulnerabilities across all targets; keep the first few ids.
pub(crate) fn parse_report(bytes: &[u8]) -> Result<ScanResult, ScanError> {
    let report: Report = serde_json::from_slice(bytes).map_err(|source| ScanError::Parse {
        tool: TOOL.to_string(),
        source,
    })?;

    let ids: Vec<String> = report
        .results
        .unwrap_or_default()
        .into_iter()
        .flat_map(|t| t.vulnerabilities.unwrap_or_default())
        .map(|v| v.id)
        .collect();

    Ok(ScanResult {
        scanner: TOOL.to_string(),
        kind: ScanKind::Vulnerability,
        vuln_count: ids.len(),
        top_cves: ids.into_iter().take(TOP_LIMIT).collect(),
        package_count: 0,
        top_packages: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeRunner;

    const REPORT: &str = include_str!("../testdata/trivy_report.json");

    #[test]
    fn parses_fixture_and_caps_top_list() {
        let r = parse_report(REPORT.as_bytes()).expect("parse");
        assert_eq!(r.vuln_count, 7);
        assert_eq!(
            r.top_cves,
            vec![
                "CVE-2023-44487",
                "CVE-2023-4863",
                "CVE-2024-6387",
                "CVE-2023-5363",
                "CVE-2023-3817",
            ]
        );
        assert_eq!(r.kind, ScanKind::Vulnerability);
    }

    #[test]
    fn clean_image_is_empty_not_missing() {
        for body in [
            r#"{"Results": []}"#,
            r#"{"Results": [{"Target": "x", "Vulnerabilities": null}]}"#,
            r#"{"SchemaVersion": 2}"#,
        ] {
            let r = parse_report(body.as_bytes()).expect(body);
            assert_eq!(r.vuln_count, 0, "{body}");
            assert!(r.top_cves.is_empty());
        }
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse_report(b"not json").expect_err("garbage");
        assert!(matches!(err, ScanError::Parse { ref tool, .. } if tool == "trivy"));
    }

    #[test]
    fn scan_invokes_trivy_image() {
        let scanner = TrivyScanner::new(FakeRunner::new([FakeRunner::ok(REPORT)]));
        let r = scanner
            .scan("nginx:latest", &CancelToken::new())
            .expect("scan");
        assert_eq!(r.vuln_count, 7);

        let calls = scanner.runner().calls();
        assert_eq!(calls[0].program, "trivy");
        assert_eq!(
            calls[0].args,
            vec!["image", "--format", "json", "--quiet", "nginx:latest"]
        );
    }

    #[test]
    fn failed_scan_carries_stderr() {
        let scanner = TrivyScanner::new(FakeRunner::new([FakeRunner::failed(
            "FATAL image not found\n",
        )]));
        let err = scanner
            .scan("ghost:1.0", &CancelToken::new())
            .expect_err("failed");
        assert_eq!(err.to_string(), "trivy failed: FATAL image not found");
    }

    #[test]
    fn availability_follows_probe() {
        let up = TrivyScanner::new(FakeRunner::new([FakeRunner::ok("Version: 0.50.0")]));
        assert!(up.available());
        assert_eq!(up.runner().calls()[0].args, vec!["--version"]);

        let down = TrivyScanner::new(FakeRunner::new([Err(ScanError::NotFound(
            "trivy".to_string(),
        ))]));
        assert!(!down.available());
    }
}
