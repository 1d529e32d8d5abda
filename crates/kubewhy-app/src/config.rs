use anyhow::Context;
use kubewhy_settings::{Environment, KubewhyConfigV1, Overrides, ResolvedConfig};

/// Parse and resolve configuration. An empty `config_text` means "no file".
pub fn load_config(
    config_text: &str,
    env: Environment,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        KubewhyConfigV1::default()
    } else {
        kubewhy_settings::parse_config_toml(config_text).context("parse config")?
    };
    kubewhy_settings::resolve_config(cfg, env, overrides).context("resolve config")
}
