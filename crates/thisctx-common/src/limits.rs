//! Limits shared by the checker.

/// Maximum depth for expression type checking.
///
/// Each nested expression adds a frame to the call stack; past this depth
/// the checker stops descending and types the expression as `ERROR`.
///
/// ```typescript
/// const x = ((((((((1 + 2) + 3) + 4) /* ... 500 levels ... */))));
/// ```
pub const MAX_EXPR_CHECK_DEPTH: u32 = 500;

/// Maximum nesting of type nodes lowered from annotations.
pub const MAX_TYPE_LOWERING_DEPTH: u32 = 100;
