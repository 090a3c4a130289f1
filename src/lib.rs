//! Contextual `this` typing for methods of object literals.
//!
//! Inside a method written on an object literal, `this` has the literal's
//! contextual type with `null` and `undefined` stripped, or the literal's
//! own type when there is no contextual type:
//!
//! ```typescript
//! type Point = { x: number; z?: number; moveBy(dx: number): void };
//! let p: Point | null = {
//!     x: 10,
//!     moveBy(dx) { this.x += dx; if (this.z) { this.z += dx; } },  // this: Point
//! };
//! ```
//!
//! The crates, leaves first:
//! - [`common`]: atoms, diagnostics and limits
//! - [`ast`]: the node arena and `AstBuilder`
//! - [`solver`]: interned types, unions, nullish stripping and contextual types
//! - [`checker`]: object literals, method bodies, calls and declarations
//!
//! [`check_program`] runs the checker over a source file;
//! [`config::load_checker_options`] reads the relevant `tsconfig.json` flags.

pub use thisctx_ast as ast;
pub use thisctx_checker as checker;
pub use thisctx_common as common;
pub use thisctx_solver as solver;

pub use thisctx_ast::{AstBuilder, NodeArena, NodeIndex, SyntaxKind};
pub use thisctx_checker::{CheckerOptions, CheckerState};
pub use thisctx_common::diagnostics::{Diagnostic, DiagnosticCategory};
pub use thisctx_solver::{TypeFormatter, TypeId, TypeInterner};

pub mod config;

mod driver;
pub use driver::{CheckResult, check_program};

pub mod tracing_config;
