use crate::model::KubewhyConfigV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use kubewhy_render::ColorChoice;
use kubewhy_scan::KNOWN_SCANNERS;
use std::time::Duration;

pub const DEFAULT_STORE_DIR: &str = ".kubewhy/decisions";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_SCHEMA_VERSION: &str = kubewhy_types::DECISION_SCHEMA_VERSION;
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 120;

pub const ENV_LANG: &str = "KUBEWHY_LANG";
pub const ENV_STORE_DIR: &str = "KUBEWHY_STORE_DIR";

/// Values set on the command line. `None` means "not given".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub store_dir: Option<String>,
    pub lang: Option<String>,
    pub scan: Option<bool>,
}

/// Environment values relevant to resolution. Empty values count as unset.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub lang: Option<String>,
    pub store_dir: Option<String>,
}

impl Environment {
    /// Read the known variables through `lookup` (usually `std::env::var`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            lang: get(ENV_LANG),
            store_dir: get(ENV_STORE_DIR),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedScan {
    pub enabled: bool,
    pub scanners: Vec<String>,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub store_dir: Utf8PathBuf,
    pub lang: String,
    pub color: ColorChoice,
    pub schema_version: String,
    pub scan: ResolvedScan,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            store_dir: Utf8PathBuf::from(DEFAULT_STORE_DIR),
            lang: DEFAULT_LANG.to_string(),
            color: ColorChoice::Auto,
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            scan: ResolvedScan {
                enabled: false,
                scanners: default_scanners(),
                timeout: Duration::from_secs(DEFAULT_SCAN_TIMEOUT_SECS),
            },
        }
    }
}

fn default_scanners() -> Vec<String> {
    KNOWN_SCANNERS.iter().map(|s| s.to_string()).collect()
}

pub fn resolve_config(
    cfg: KubewhyConfigV1,
    env: Environment,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some(dir) = overrides.store_dir.or(env.store_dir).or(cfg.store_dir) {
        anyhow::ensure!(!dir.trim().is_empty(), "store_dir must not be empty");
        resolved.store_dir = Utf8PathBuf::from(dir);
    }

    if let Some(lang) = overrides.lang.or(env.lang).or(cfg.lang) {
        let lang = lang.trim();
        anyhow::ensure!(!lang.is_empty(), "lang must not be empty");
        resolved.lang = lang.to_string();
    }

    if let Some(color) = cfg.color.as_deref() {
        resolved.color = ColorChoice::parse(color)
            .with_context(|| format!("unknown color: {color} (expected auto|always|never)"))?;
    }

    if let Some(version) = cfg.schema_version {
        anyhow::ensure!(!version.trim().is_empty(), "schema_version must not be empty");
        resolved.schema_version = version;
    }

    resolved.scan.enabled = overrides.scan.or(cfg.scan.enabled).unwrap_or(false);
    if let Some(scanners) = cfg.scan.scanners {
        validate_scanners(&scanners)?;
        resolved.scan.scanners = scanners;
    }
    if let Some(secs) = cfg.scan.timeout_secs {
        anyhow::ensure!(secs > 0, "scan.timeout_secs must be greater than zero");
        resolved.scan.timeout = Duration::from_secs(secs);
    }

    Ok(resolved)
}

fn validate_scanners(names: &[String]) -> anyhow::Result<()> {
    for name in names {
        if !KNOWN_SCANNERS.contains(&name.as_str()) {
            anyhow::bail!(
                "unknown scanner: {name} (expected one of {})",
                KNOWN_SCANNERS.join(", ")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn empty_config_yields_defaults() {
        let cfg = parse_config_toml("").expect("parse");
        let r = resolve_config(cfg, Environment::default(), Overrides::default()).expect("resolve");
        assert_eq!(r, ResolvedConfig::default());
        assert_eq!(r.store_dir, ".kubewhy/decisions");
        assert_eq!(r.scan.scanners, vec!["trivy", "syft"]);
        assert_eq!(r.scan.timeout, Duration::from_secs(120));
        assert_eq!(r.schema_version, kubewhy_types::DECISION_SCHEMA_VERSION);
    }

    #[test]
    fn file_values_apply() {
        let cfg = parse_config_toml(
            r#"
            store_dir = "/var/lib/kubewhy"
            lang = "ko"
            color = "never"
            schema_version = "v1beta1"

            [scan]
            enabled = true
            scanners = ["syft"]
            timeout_secs = 30
            "#,
        )
        .expect("parse");
        let r = resolve_config(cfg, Environment::default(), Overrides::default()).expect("resolve");
        assert_eq!(r.store_dir, "/var/lib/kubewhy");
        assert_eq!(r.lang, "ko");
        assert_eq!(r.color, ColorChoice::Never);
        assert_eq!(r.schema_version, "v1beta1");
        assert!(r.scan.enabled);
        assert_eq!(r.scan.scanners, vec!["syft"]);
        assert_eq!(r.scan.timeout, Duration::from_secs(30));
    }

    #[test]
    fn precedence_is_cli_then_env_then_file() {
        let cfg = parse_config_toml("lang = \"ja\"\nstore_dir = \"file-dir\"").expect("parse");

        let r = resolve_config(
            cfg.clone(),
            env(&[(ENV_LANG, "es"), (ENV_STORE_DIR, "env-dir")]),
            Overrides::default(),
        )
        .expect("resolve");
        assert_eq!(r.lang, "es");
        assert_eq!(r.store_dir, "env-dir");

        let r = resolve_config(
            cfg.clone(),
            env(&[(ENV_LANG, "es")]),
            Overrides {
                lang: Some("zh".to_string()),
                store_dir: Some("cli-dir".to_string()),
                scan: None,
            },
        )
        .expect("resolve");
        assert_eq!(r.lang, "zh");
        assert_eq!(r.store_dir, "cli-dir");

        let r = resolve_config(cfg, Environment::default(), Overrides::default()).expect("resolve");
        assert_eq!(r.lang, "ja");
        assert_eq!(r.store_dir, "file-dir");
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let e = env(&[(ENV_LANG, "  "), (ENV_STORE_DIR, "")]);
        assert!(e.lang.is_none());
        assert!(e.store_dir.is_none());
    }

    #[test]
    fn cli_scan_flag_enables_scanning() {
        let r = resolve_config(
            KubewhyConfigV1::default(),
            Environment::default(),
            Overrides {
                scan: Some(true),
                ..Overrides::default()
            },
        )
        .expect("resolve");
        assert!(r.scan.enabled);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (toml, needle) in [
            ("color = \"sometimes\"", "unknown color"),
            ("[scan]\nscanners = [\"grype\"]", "unknown scanner: grype"),
            ("[scan]\ntimeout_secs = 0", "timeout_secs"),
            ("lang = \"\"", "lang"),
        ] {
            let cfg = parse_config_toml(toml).expect("parse");
            let err = resolve_config(cfg, Environment::default(), Overrides::default())
                .expect_err(toml);
            assert!(err.to_string().contains(needle), "{toml}: {err}");
        }
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let cfg = parse_config_toml("future_option = 1\n[scan]\nparallel = true").expect("parse");
        assert_eq!(cfg, KubewhyConfigV1::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config_toml("lang = ").is_err());
    }
}
