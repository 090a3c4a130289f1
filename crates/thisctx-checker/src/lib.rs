//! Checker for object literals and their method receivers.
//!
//! This crate is organized into several submodules:
//! - `context` - `CheckerContext` for shared state, `CheckerOptions`
//! - `state` - `CheckerState`, the entry point and per-node type cache
//! - `declarations` - binder-lite pre-pass and variable declarations
//! - `type_lowering` - type annotations to solver types
//! - `expr` - expressions, property access and operators
//! - `object_literals` - object literals and receiver resolution
//! - `function_type` - method bodies
//! - `call_checker` - call sites and arity
//! - `statements` / `flow_narrowing` - statement walk and truthiness narrowing
//! - `error_reporter` - diagnostic helpers

pub mod call_checker;
pub mod context;
pub mod declarations;
pub mod error_reporter;
pub mod expr;
pub mod flow_narrowing;
pub mod function_type;
pub mod object_literals;
pub mod state;
pub mod statements;
pub mod type_lowering;

pub use context::{CheckerContext, CheckerOptions};
pub use state::CheckerState;

#[cfg(test)]
#[path = "tests/checker_state_tests.rs"]
mod checker_state_tests;

#[cfg(test)]
#[path = "tests/type_lowering_tests.rs"]
mod type_lowering_tests;

#[cfg(test)]
#[path = "tests/flow_narrowing_tests.rs"]
mod flow_narrowing_tests;
