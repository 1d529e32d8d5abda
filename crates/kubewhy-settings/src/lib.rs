//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses configuration provided as
//! strings and takes environment values through [`Environment`].

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{KubewhyConfigV1, ScanConfig};
pub use resolve::{
    DEFAULT_LANG, DEFAULT_SCAN_TIMEOUT_SECS, DEFAULT_STORE_DIR, ENV_LANG, ENV_STORE_DIR,
    Environment, Overrides, ResolvedConfig, ResolvedScan,
};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "kubewhy.toml";

/// Parse `kubewhy.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<KubewhyConfigV1> {
    let cfg: KubewhyConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings: overrides, then environment, then file, then defaults.
pub fn resolve_config(
    cfg: KubewhyConfigV1,
    env: Environment,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, env, overrides)
}
