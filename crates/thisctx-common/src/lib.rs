//! Shared building blocks for the thisctx crates.
//!
//! - `interner` - string interning (`Atom`) for member and identifier names
//! - `diagnostics` - diagnostic records, codes and message templates
//! - `limits` - recursion limits shared by the checker

pub mod diagnostics;
pub mod interner;
pub mod limits;

pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    diagnostic_codes, diagnostic_messages, format_message, get_message_template,
};
pub use interner::{Atom, ShardedInterner};
