//! Tracing configuration for debugging receiver resolution.
//!
//! Supports three output formats controlled by `THISCTX_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! # Follow contextual types into object literals and their methods
//! THISCTX_LOG="thisctx_checker=trace" THISCTX_LOG_FORMAT=tree cargo test -p thisctx-checker
//!
//! # Only the solver's union discrimination
//! THISCTX_LOG="thisctx_solver::contextual=trace" cargo test
//! ```
//!
//! The subscriber is only installed when `THISCTX_LOG` (or `RUST_LOG`) is
//! set, so normal runs pay nothing.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat text lines (default).
    Text,
    /// Indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parse a `THISCTX_LOG_FORMAT` value; anything unrecognized is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("THISCTX_LOG_FORMAT").unwrap_or_default())
    }
}

/// `THISCTX_LOG` wins over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("THISCTX_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Does nothing when neither `THISCTX_LOG` nor `RUST_LOG` is set. Calling it
/// again after a subscriber is installed is harmless.
pub fn init_tracing() {
    if std::env::var_os("THISCTX_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    // `try_init` so repeated calls (one per test) don't panic.
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            // `HierarchicalLayer` writes to stderr by default.
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}
