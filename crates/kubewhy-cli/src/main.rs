//! CLI entry point for kubectl-why.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `kubewhy-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use kubewhy_app::{
    EvaluateInput, ExplainOutput, OutputFormat, ShowQuery, build_scanners, decision_exit_code,
    load_config, render_decision, render_decisions, run_evaluate, run_example, run_explain,
    run_list, run_show,
};
use kubewhy_i18n::Translator;
use kubewhy_render::RenderContext;
use kubewhy_scan::{Scanner, SystemRunner};
use kubewhy_settings::{CONFIG_FILE_NAME, Environment, Overrides, ResolvedConfig};
use kubewhy_store::FileDecisionStore;
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "kubectl-why",
    version,
    about = "Explain why a Kubernetes resource was allowed or blocked"
)]
struct Cli {
    /// Path to kubewhy config TOML (default: ./kubewhy.toml if present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Directory holding stored decisions.
    #[arg(long, global = true)]
    store_dir: Option<String>,

    /// Output language (en, es, ja, ko, zh).
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Disable ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a manifest and record the decision.
    Evaluate {
        /// Manifest file (YAML or JSON), or `-` for stdin.
        #[arg(short = 'f', long = "filename")]
        file: String,

        /// Decision id (default: dec-<unix seconds>).
        #[arg(long)]
        id: Option<String>,

        /// Do not write the decision to the store.
        #[arg(long)]
        no_save: bool,

        /// Scan container images with the configured scanners.
        #[arg(long)]
        scan: bool,

        /// Output format (text or json).
        #[arg(long, short, default_value = "text")]
        output: String,
    },

    /// Show a stored decision (latest when no selector is given).
    Show {
        /// Decision id.
        id: Option<String>,

        /// Resource kind; requires --name.
        #[arg(long)]
        kind: Option<String>,

        /// Resource name; requires --kind.
        #[arg(long)]
        name: Option<String>,

        /// Resource namespace (default: default).
        #[arg(long, short)]
        namespace: Option<String>,

        /// Output format (text or json).
        #[arg(long, short, default_value = "text")]
        output: String,
    },

    /// List stored decisions, newest first.
    List {
        /// Only decisions for this namespace.
        #[arg(long, short)]
        namespace: Option<String>,

        /// Maximum number of decisions (0 = all).
        #[arg(long, default_value = "0")]
        limit: usize,

        /// Output format (text or json).
        #[arg(long, short, default_value = "text")]
        output: String,
    },

    /// Explain a policy id with remediation guidance.
    Explain {
        /// The policy id (e.g. "POL-SEC-001").
        policy_id: String,
    },

    /// Print an example blocked decision.
    Example {
        /// Emit the JSON envelope instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("kubectl-why error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    if let Commands::Explain { policy_id } = &cli.cmd {
        return Ok(cmd_explain(policy_id));
    }

    let scan_flag = matches!(cli.cmd, Commands::Evaluate { scan: true, .. });
    let config = resolve(&cli, scan_flag)?;
    debug!(store_dir = %config.store_dir, lang = %config.lang, "resolved config");

    let tr = Translator::new(&config.lang);
    let ctx = RenderContext::resolve(
        config.color,
        cli.no_color,
        std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        std::io::stdout().is_terminal(),
    );

    match cli.cmd {
        Commands::Evaluate {
            file,
            id,
            no_save,
            output,
            ..
        } => cmd_evaluate(&config, &tr, &ctx, &file, id, !no_save, &output),
        Commands::Show {
            id,
            kind,
            name,
            namespace,
            output,
        } => {
            let query = ShowQuery {
                id,
                kind,
                name,
                namespace,
            };
            cmd_show(&config, &tr, &ctx, &query, &output)
        }
        Commands::List {
            namespace,
            limit,
            output,
        } => cmd_list(&config, namespace.as_deref().unwrap_or(""), limit, &output),
        Commands::Example { json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            print!("{}", run_example(format, &tr, &ctx)?);
            Ok(0)
        }
        Commands::Explain { .. } => Ok(0),
    }
}

/// Load the config file and apply environment and CLI overrides.
///
/// A missing default config file is fine; a missing explicit `--config` is not.
fn resolve(cli: &Cli, scan_flag: bool) -> anyhow::Result<ResolvedConfig> {
    let config_text = match &cli.config {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))?,
        None => match std::fs::read_to_string(CONFIG_FILE_NAME) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("read config: {CONFIG_FILE_NAME}"));
            }
        },
    };
    let overrides = Overrides {
        store_dir: cli.store_dir.clone(),
        lang: cli.lang.clone(),
        scan: scan_flag.then_some(true),
    };
    load_config(
        &config_text,
        Environment::from_lookup(|key| std::env::var(key).ok()),
        overrides,
    )
}

fn open_store(config: &ResolvedConfig) -> anyhow::Result<FileDecisionStore> {
    FileDecisionStore::open(config.store_dir.clone())
        .with_context(|| format!("open decision store: {}", config.store_dir))
}

fn read_manifest(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read manifest from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("read manifest: {file}"))
}

fn cmd_evaluate(
    config: &ResolvedConfig,
    tr: &Translator,
    ctx: &RenderContext,
    file: &str,
    id: Option<String>,
    save: bool,
    output: &str,
) -> anyhow::Result<i32> {
    let format = OutputFormat::parse(output)?;
    let manifest = read_manifest(file)?;
    let store = open_store(config)?;
    let scanners: Vec<Box<dyn Scanner>> = if config.scan.enabled {
        build_scanners(&config.scan.scanners, Arc::new(SystemRunner))
    } else {
        Vec::new()
    };

    let input = EvaluateInput {
        manifest: &manifest,
        id,
        now: OffsetDateTime::now_utc(),
        save,
    };
    let decision = run_evaluate(input, config, &store, &scanners)?;

    print!("{}", render_decision(&decision, format, tr, ctx)?);
    Ok(decision_exit_code(&decision.status))
}

fn cmd_show(
    config: &ResolvedConfig,
    tr: &Translator,
    ctx: &RenderContext,
    query: &ShowQuery,
    output: &str,
) -> anyhow::Result<i32> {
    let format = OutputFormat::parse(output)?;
    let store = open_store(config)?;
    let decision = run_show(query, &store)?;
    print!("{}", render_decision(&decision, format, tr, ctx)?);
    Ok(0)
}

fn cmd_list(
    config: &ResolvedConfig,
    namespace: &str,
    limit: usize,
    output: &str,
) -> anyhow::Result<i32> {
    let format = OutputFormat::parse(output)?;
    let store = open_store(config)?;
    let decisions = run_list(&store, namespace, limit)?;
    print!("{}", render_decisions(&decisions, format)?);
    Ok(0)
}

fn cmd_explain(policy_id: &str) -> i32 {
    match run_explain(policy_id) {
        ExplainOutput::Found(exp) => {
            print!("{}", kubewhy_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", kubewhy_app::format_not_found(&identifier, available));
            1
        }
    }
}
