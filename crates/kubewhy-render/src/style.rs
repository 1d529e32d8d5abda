//! Terminal styling, resolved once per invocation.

use kubewhy_types::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Configured color preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorChoice::Auto),
            "always" => Some(ColorChoice::Always),
            "never" => Some(ColorChoice::Never),
            _ => None,
        }
    }
}

/// Presentation settings threaded into the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub color: bool,
}

impl RenderContext {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Decide whether to emit ANSI codes.
    ///
    /// Priority: `--no-color` flag, then a `NO_COLOR` environment variable,
    /// then the configured choice, then whether stdout is a terminal.
    pub fn resolve(
        choice: ColorChoice,
        no_color_flag: bool,
        no_color_env: bool,
        is_terminal: bool,
    ) -> Self {
        let color = if no_color_flag || no_color_env {
            false
        } else {
            match choice {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => is_terminal,
            }
        };
        Self { color }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    /// Severity label, colored by impact. LOW is left plain.
    pub fn severity(&self, severity: Severity) -> String {
        let label = severity.as_str();
        match severity {
            Severity::Critical => self.paint(RED, label),
            Severity::High => self.paint(YELLOW, label),
            Severity::Medium => self.paint(CYAN, label),
            Severity::Low => label.to_string(),
        }
    }
}
