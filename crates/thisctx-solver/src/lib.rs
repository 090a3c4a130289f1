//! Structural type solver for the thisctx checker.
//!
//! - **Interning**: `TypeKey` structures become `TypeId` handles; type
//!   equality is id equality
//! - **Unions**: flattened, deduplicated and normalized on construction
//! - **Contextual typing**: expected types flow into object literals, their
//!   members and their methods' parameters and receiver
//!
//! All operations take `&dyn TypeDatabase`. `TypeInterner` is the only
//! implementation and is safe to share between threads.
pub mod binary_ops;
mod contextual;
mod db;
mod format;
mod intern;
mod narrowing;
pub mod objects;
pub mod operations_property;
pub mod types;
pub mod visitor;
pub mod widening;

pub use binary_ops::{
    BinaryOpEvaluator, BinaryOpResult, binary_operator_text, is_arithmetic_operator,
};
pub use contextual::{
    ContextualTypeContext, contextual_type_for, contextual_type_for_object_literal,
};
pub use db::{TypeDatabase, function_shape_of, object_shape_of, union_members};
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use narrowing::{
    NullishKind, narrow_by_truthiness, nullish_kind, split_nullish_type, strip_nullish,
};
pub use objects::{DeclarationError, MemberDecl, declare_method_type, declare_object_type};
pub use operations_property::{PropertyAccessResult, resolve_property_access};
pub use types::*;
pub use visitor::{TypeVisitor, is_object_type};
pub use widening::widen_literal_type;
