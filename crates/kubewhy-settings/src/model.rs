use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `kubewhy.toml` schema v1.
///
/// Every field is optional; unknown keys are ignored so older binaries accept
/// newer files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KubewhyConfigV1 {
    /// Optional schema string for tooling (`kubewhy.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Directory holding decision records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,

    /// Output language code, e.g. `en`, `ko`, `ja-JP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// `auto` (default), `always`, or `never`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Version string stamped on new decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Scanners to run, in order. Known: `trivy`, `syft`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanners: Option<Vec<String>>,

    /// Per-scan time limit in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}
