//! Contextual typing (reverse inference).
//!
//! Contextual typing lets type information flow from an expected type down
//! into an expression:
//! - variable initializers: `let p: Point = { ... }`
//! - call arguments: `f1({ ... })` with `declare function f1(p: Point)`
//! - members of object literals, and the parameters and receiver of the
//!   methods defined in them
//!
//! Nullish constituents never contribute a contextual type: `Point | null`
//! contextually types a literal exactly like `Point` does.

use crate::db::{TypeDatabase, union_members};
use crate::narrowing::strip_nullish;
use crate::types::*;
use crate::visitor::{TypeVisitor, is_object_type};
use thisctx_common::interner::Atom;
use tracing::trace;

// =============================================================================
// Visitor Pattern Implementations
// =============================================================================

/// Visitor to extract the return type from function types.
struct ReturnTypeExtractor<'a> {
    db: &'a dyn TypeDatabase,
}

impl<'a> TypeVisitor for ReturnTypeExtractor<'a> {
    type Output = Option<TypeId>;

    fn visit_intrinsic(&mut self, _kind: IntrinsicKind) -> Self::Output {
        None
    }

    fn visit_literal(&mut self, _value: &LiteralValue) -> Self::Output {
        None
    }

    fn visit_function(&mut self, shape_id: u32) -> Self::Output {
        Some(self.db.function_shape(FunctionShapeId(shape_id)).return_type)
    }

    fn default_output() -> Self::Output {
        None
    }
}

/// Visitor to extract the parameter at `index` from function types.
///
/// Positions past a rest parameter resolve to the rest parameter.
struct ParameterExtractor<'a> {
    db: &'a dyn TypeDatabase,
    index: usize,
}

impl<'a> TypeVisitor for ParameterExtractor<'a> {
    type Output = Option<ParamInfo>;

    fn visit_intrinsic(&mut self, _kind: IntrinsicKind) -> Self::Output {
        None
    }

    fn visit_literal(&mut self, _value: &LiteralValue) -> Self::Output {
        None
    }

    fn visit_function(&mut self, shape_id: u32) -> Self::Output {
        let shape = self.db.function_shape(FunctionShapeId(shape_id));
        if let Some(param) = shape.params.get(self.index) {
            return Some(param.clone());
        }
        shape.params.last().filter(|p| p.rest).cloned()
    }

    fn default_output() -> Self::Output {
        None
    }
}

/// Visitor to extract a named member from object types.
struct PropertyExtractor<'a> {
    db: &'a dyn TypeDatabase,
    name: Atom,
}

impl<'a> TypeVisitor for PropertyExtractor<'a> {
    type Output = Option<TypeId>;

    fn visit_intrinsic(&mut self, _kind: IntrinsicKind) -> Self::Output {
        None
    }

    fn visit_literal(&mut self, _value: &LiteralValue) -> Self::Output {
        None
    }

    fn visit_object(&mut self, shape_id: u32) -> Self::Output {
        let shape = self.db.object_shape(ObjectShapeId(shape_id));
        shape.find(self.name).map(|prop| prop.type_id)
    }

    fn default_output() -> Self::Output {
        None
    }
}

/// Collect `extract` over the members of a union, joining the results.
fn collect_from_union<F>(db: &dyn TypeDatabase, members: &[TypeId], mut extract: F) -> Option<TypeId>
where
    F: FnMut(TypeId) -> Option<TypeId>,
{
    let found: Vec<TypeId> = members.iter().filter_map(|&m| extract(m)).collect();
    match found.len() {
        0 => None,
        1 => Some(found[0]),
        _ => Some(db.union(found)),
    }
}

// =============================================================================
// ContextualTypeContext
// =============================================================================

/// Context for contextual typing.
/// Holds the expected type and extracts the pieces nested expressions need.
pub struct ContextualTypeContext<'a> {
    db: &'a dyn TypeDatabase,
    expected: Option<TypeId>,
}

impl<'a> ContextualTypeContext<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        ContextualTypeContext { db, expected: None }
    }

    /// Create a context with an expected type.
    /// Nullish constituents of `expected` are stripped first.
    pub fn with_expected(db: &'a dyn TypeDatabase, expected: TypeId) -> Self {
        ContextualTypeContext {
            db,
            expected: contextual_type_for(db, Some(expected)),
        }
    }

    pub fn expected(&self) -> Option<TypeId> {
        self.expected
    }

    /// Contextual type for the object literal member `name`.
    ///
    /// ```typescript
    /// const obj: { x: number, y: string } = { x: 1, y: "hi" };
    /// ```
    pub fn get_property_type(&self, name: &str) -> Option<TypeId> {
        let expected = self.expected?;
        let name = self.db.intern_string(name);

        if let Some(members) = union_members(self.db, expected) {
            return collect_from_union(self.db, &members, |m| {
                PropertyExtractor { db: self.db, name }.visit_type(self.db, m)
            });
        }

        PropertyExtractor { db: self.db, name }.visit_type(self.db, expected)
    }

    /// Contextual type for the parameter at `index` of a function expression
    /// or method.
    ///
    /// ```typescript
    /// type Point = { moveBy(dx: number, dy: number): void };
    /// const p: Point = { moveBy(dx, dy) {} };  // dx: number, dy: number
    /// ```
    pub fn get_parameter_type(&self, index: usize) -> Option<TypeId> {
        let expected = self.expected?;

        if let Some(members) = union_members(self.db, expected) {
            return collect_from_union(self.db, &members, |m| {
                ParameterExtractor { db: self.db, index }
                    .visit_type(self.db, m)
                    .map(|p| p.type_id)
            });
        }

        ParameterExtractor { db: self.db, index }
            .visit_type(self.db, expected)
            .map(|p| p.type_id)
    }

    /// Whether the contextual parameter at `index` is optional (or rest).
    pub fn is_parameter_optional(&self, index: usize) -> bool {
        let Some(expected) = self.expected else {
            return false;
        };
        let members: Vec<TypeId> = match union_members(self.db, expected) {
            Some(members) => members.to_vec(),
            None => vec![expected],
        };
        members.iter().any(|&m| {
            ParameterExtractor { db: self.db, index }
                .visit_type(self.db, m)
                .is_some_and(|p| p.optional || p.rest)
        })
    }

    pub fn get_return_type(&self) -> Option<TypeId> {
        let expected = self.expected?;

        if let Some(members) = union_members(self.db, expected) {
            return collect_from_union(self.db, &members, |m| {
                ReturnTypeExtractor { db: self.db }.visit_type(self.db, m)
            });
        }

        ReturnTypeExtractor { db: self.db }.visit_type(self.db, expected)
    }

    /// Child context for the value of member `name`.
    pub fn for_property(&self, name: &str) -> ContextualTypeContext<'a> {
        match self.get_property_type(name) {
            Some(ty) => ContextualTypeContext::with_expected(self.db, ty),
            None => ContextualTypeContext::new(self.db),
        }
    }
}

// =============================================================================
// Contextual type selection
// =============================================================================

/// Contextual type for an expression checked against `expected`.
///
/// `None` in, `None` out. Otherwise nullish constituents are stripped; a
/// type made only of `null`/`undefined` provides no context at all.
/// Pure: the result depends only on `expected`.
pub fn contextual_type_for(db: &dyn TypeDatabase, expected: Option<TypeId>) -> Option<TypeId> {
    let expected = expected?;
    if expected == TypeId::NONE {
        return None;
    }
    strip_nullish(db, expected)
}

/// Contextual type for an object literal whose own members are `member_names`.
///
/// After nullish stripping, a union of several object constituents is
/// narrowed to the constituents that declare every member the literal
/// defines. One survivor is used directly; several are kept as a union;
/// none means the literal gets no contextual type.
pub fn contextual_type_for_object_literal(
    db: &dyn TypeDatabase,
    expected: Option<TypeId>,
    member_names: &[Atom],
) -> Option<TypeId> {
    let contextual = contextual_type_for(db, expected)?;
    let Some(members) = union_members(db, contextual) else {
        return Some(contextual);
    };

    let objects: Vec<TypeId> = members
        .iter()
        .copied()
        .filter(|&m| is_object_type(db, m))
        .collect();
    if objects.len() <= 1 {
        trace!(?contextual, ?objects, "single object constituent in contextual union");
        return objects.first().copied();
    }

    let matching: Vec<TypeId> = objects
        .into_iter()
        .filter(|&m| declares_all_members(db, m, member_names))
        .collect();
    trace!(?contextual, ?matching, "discriminated contextual union by member names");
    match matching.len() {
        0 => None,
        1 => Some(matching[0]),
        _ => Some(db.union(matching)),
    }
}

fn declares_all_members(db: &dyn TypeDatabase, type_id: TypeId, names: &[Atom]) -> bool {
    let Some(TypeKey::Object(shape_id)) = db.lookup(type_id) else {
        return false;
    };
    let shape = db.object_shape(shape_id);
    names.iter().all(|&name| shape.find(name).is_some())
}

#[cfg(test)]
#[path = "tests/contextual_tests.rs"]
mod tests;
