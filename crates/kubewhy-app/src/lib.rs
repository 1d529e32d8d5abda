//! Use case orchestration for kubewhy.
//!
//! This crate provides the application layer: use cases that coordinate the
//! domain, store, scan, and render layers. It is intentionally thin and
//! delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod config;
mod evaluate;
mod explain;
mod list;
mod manifest;
mod output;
mod scan;
mod show;

pub use config::load_config;
pub use evaluate::{EvaluateInput, run_evaluate};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use list::{format_list, format_list_line, run_list};
pub use manifest::parse_manifest;
pub use output::{OutputFormat, decision_exit_code, render_decision, render_decisions, run_example};
pub use scan::{build_scanners, container_images, enrich_with_scans};
pub use show::{ShowQuery, run_show};
