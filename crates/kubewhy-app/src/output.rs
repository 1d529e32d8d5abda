//! Rendering and exit-code helpers shared by the CLI commands.

use crate::list::format_list;
use anyhow::Context;
use kubewhy_i18n::Translator;
use kubewhy_render::{RenderContext, render_human, render_json, render_json_list};
use kubewhy_types::{DecisionStatus, SecurityDecision, example_blocked_decision};

/// How decisions are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format: {other} (expected text or json)"),
        }
    }
}

pub fn render_decision(
    d: &SecurityDecision,
    format: OutputFormat,
    tr: &Translator,
    ctx: &RenderContext,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_human(d, tr, ctx)),
        OutputFormat::Json => render_json(d).context("serialize decision"),
    }
}

/// Text output is one line per decision; JSON output is an array of envelopes.
pub fn render_decisions(decisions: &[SecurityDecision], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_list(decisions)),
        OutputFormat::Json => render_json_list(decisions).context("serialize decisions"),
    }
}

/// 0 when allowed, 2 when blocked, 1 for anything else.
pub fn decision_exit_code(status: &DecisionStatus) -> i32 {
    match status {
        DecisionStatus::Allowed => 0,
        DecisionStatus::Blocked => 2,
        DecisionStatus::Other(_) => 1,
    }
}

/// Render the built-in example decision.
pub fn run_example(
    format: OutputFormat,
    tr: &Translator,
    ctx: &RenderContext,
) -> anyhow::Result<String> {
    render_decision(&example_blocked_decision(), format, tr, ctx)
}
