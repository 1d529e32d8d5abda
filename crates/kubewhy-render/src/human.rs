use crate::format_timestamp;
use crate::style::RenderContext;
use crate::wrap::{WRAP_WIDTH, wrap_indent};
use kubewhy_i18n::Translator;
use kubewhy_types::{Action, SecurityDecision, TextArgs, Violation, ids};
use std::fmt::Write;

/// Next actions shown in the report; extra entries are dropped.
pub const NEXT_ACTION_LIMIT: usize = 4;

const WHAT_INDENT: &str = "   ";
const ITEM_INDENT: &str = "     ";
const ACTION_INDENT: &str = "  ";

/// Render a decision as terminal text in the translator's language.
///
/// Labels and keyed texts are translated. Evidence subjects and details are
/// printed as stored.
pub fn render_human(d: &SecurityDecision, tr: &Translator, ctx: &RenderContext) -> String {
    let mut out = String::new();
    render_header(&mut out, d, tr, ctx);
    render_violations(&mut out, &d.violations, tr, ctx);
    render_next_actions(&mut out, &d.next_actions, tr, ctx);
    out
}

fn render_header(out: &mut String, d: &SecurityDecision, tr: &Translator, ctx: &RenderContext) {
    let summary = resolve(tr, d.summary_key.as_deref(), &d.summary_args, &d.summary);
    let status = d.status.as_str();
    let time = format_timestamp(d.timestamp);

    line(out, &ctx.bold(&tr.t_with(ids::KEY_OUTPUT_REASON, &[("summary", &summary)])));
    line(out, &ctx.bold(&tr.t_with(ids::KEY_OUTPUT_STATUS, &[("status", status)])));
    out.push('\n');

    let r = &d.resource;
    line(
        out,
        &tr.t_with(ids::KEY_OUTPUT_RESOURCE, &[("kind", &r.kind), ("name", &r.name)]),
    );
    if !r.namespace.is_empty() {
        line(
            out,
            &tr.t_with(ids::KEY_OUTPUT_NAMESPACE, &[("namespace", &r.namespace)]),
        );
    }
    line(out, &tr.t_with(ids::KEY_OUTPUT_DECISION, &[("id", &d.id)]));
    line(out, &tr.t_with(ids::KEY_OUTPUT_TIME, &[("time", &time)]));
    out.push('\n');
}

fn render_violations(out: &mut String, violations: &[Violation], tr: &Translator, ctx: &RenderContext) {
    if violations.is_empty() {
        return;
    }

    let count = violations.len().to_string();
    line(
        out,
        &ctx.bold(&tr.t_with(ids::KEY_SECTION_VIOLATIONS, &[("count", &count)])),
    );

    for (i, v) in violations.iter().enumerate() {
        let title = resolve(tr, v.title_key.as_deref(), &v.title_args, &v.title);
        let _ = writeln!(out, "{}) [{}] {}", i + 1, ctx.severity(v.severity), title);

        let message = resolve(tr, v.message_key.as_deref(), &v.message_args, &v.message);
        if !message.is_empty() {
            let _ = writeln!(
                out,
                "{WHAT_INDENT}{} {}",
                tr.t(ids::KEY_LABEL_WHAT),
                wrap_indent(&message, WRAP_WIDTH, WHAT_INDENT)
            );
        }

        if !v.evidence.is_empty() {
            let _ = writeln!(out, "{WHAT_INDENT}{}", tr.t(ids::KEY_LABEL_EVIDENCE));
            for e in &v.evidence {
                let text = format!("({}) {}: {}", e.kind, e.subject, e.detail);
                let _ = writeln!(out, "{ITEM_INDENT}- {}", wrap_indent(&text, WRAP_WIDTH, ITEM_INDENT));
            }
        }

        if !v.fix.is_empty() {
            let _ = writeln!(out, "{WHAT_INDENT}{}", tr.t(ids::KEY_LABEL_FIX));
            for f in &v.fix {
                let text = action_line(f, tr);
                let _ = writeln!(out, "{ITEM_INDENT}- {}", wrap_indent(&text, WRAP_WIDTH, ITEM_INDENT));
            }
        }

        if i + 1 < violations.len() {
            out.push('\n');
        }
    }
    out.push('\n');
}

fn render_next_actions(out: &mut String, actions: &[Action], tr: &Translator, ctx: &RenderContext) {
    if actions.is_empty() {
        return;
    }

    line(out, &ctx.bold(&tr.t(ids::KEY_SECTION_NEXT_ACTIONS)));
    for a in actions.iter().take(NEXT_ACTION_LIMIT) {
        let text = action_line(a, tr);
        let _ = writeln!(out, "- {}", wrap_indent(&text, WRAP_WIDTH, ACTION_INDENT));
    }
}

/// `title: detail`, or just the title when there is no detail.
fn action_line(a: &Action, tr: &Translator) -> String {
    let title = resolve(tr, a.title_key.as_deref(), &a.title_args, &a.title);
    let detail = resolve(tr, a.detail_key.as_deref(), &a.detail_args, &a.detail);
    if detail.is_empty() {
        title
    } else {
        format!("{title}: {detail}")
    }
}

/// Keyed text when a key is set, the stored plain text otherwise.
fn resolve(tr: &Translator, key: Option<&str>, args: &TextArgs, fallback: &str) -> String {
    match key {
        Some(key) if !key.is_empty() => tr.t_args(key, args),
        _ => fallback.to_string(),
    }
}

fn line(out: &mut String, s: &str) {
    out.push_str(s);
    out.push('\n');
}
