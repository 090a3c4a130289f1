//! AST for the thisctx checker.
//!
//! Nodes live in a `NodeArena` and are referenced by `NodeIndex`. There is no
//! parser: `AstBuilder` assembles trees directly.

pub mod base;
pub mod builder;
pub mod node;
pub mod node_access;
pub mod syntax_kind;

pub use base::{NodeIndex, NodeList};
pub use builder::AstBuilder;
pub use node::{Node, NodeArena};
pub use syntax_kind::{SyntaxKind, syntax_kind_ext};
