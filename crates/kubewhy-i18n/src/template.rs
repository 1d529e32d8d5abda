//! `{{name}}` placeholder substitution.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
enum TemplateError {
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
    #[error("empty placeholder at byte {0}")]
    EmptyName(usize),
    #[error("no argument named {0:?}")]
    MissingArg(String),
}

/// Substitute `{{name}}` placeholders using `lookup`.
///
/// Fails open: a template without markers comes back verbatim, and a template
/// that cannot be fully rendered (missing argument, unterminated marker) comes
/// back unchanged rather than half-substituted.
pub fn render_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !template.contains("{{") {
        return template.to_string();
    }
    interpolate(template, lookup).unwrap_or_else(|_| template.to_string())
}

fn interpolate<F>(template: &str, lookup: F) -> Result<String, TemplateError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            return Err(TemplateError::Unterminated(offset + open));
        };
        let name = after_open[..close].trim();
        // Accept `{{.name}}` as written by Go-style templates.
        let name = name.strip_prefix('.').unwrap_or(name);
        if name.is_empty() {
            return Err(TemplateError::EmptyName(offset + open));
        }
        let value = lookup(name).ok_or_else(|| TemplateError::MissingArg(name.to_string()))?;
        out.push_str(&value);

        let consumed = open + 2 + close + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}
