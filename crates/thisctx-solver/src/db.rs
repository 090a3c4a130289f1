//! Type database abstraction for the solver.
//!
//! This trait isolates solver logic from concrete storage; every solver
//! operation takes `&dyn TypeDatabase` rather than the interner itself.

use crate::intern::TypeInterner;
use crate::types::{
    FunctionShape, FunctionShapeId, ObjectShape, ObjectShapeId, PropertyInfo, TypeId, TypeKey,
    TypeListId,
};
use std::sync::Arc;
use thisctx_common::interner::Atom;

/// Query interface for the solver.
pub trait TypeDatabase {
    fn intern(&self, key: TypeKey) -> TypeId;
    fn lookup(&self, id: TypeId) -> Option<TypeKey>;
    fn intern_string(&self, s: &str) -> Atom;
    fn resolve_atom(&self, atom: Atom) -> String;
    fn resolve_atom_ref(&self, atom: Atom) -> Arc<str>;
    fn type_list(&self, id: TypeListId) -> Arc<[TypeId]>;
    fn object_shape(&self, id: ObjectShapeId) -> Arc<ObjectShape>;
    fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape>;

    fn literal_string(&self, value: &str) -> TypeId;
    fn literal_number(&self, value: f64) -> TypeId;
    fn literal_boolean(&self, value: bool) -> TypeId;

    fn union(&self, members: Vec<TypeId>) -> TypeId;
    fn union2(&self, left: TypeId, right: TypeId) -> TypeId;
    fn object(&self, properties: Vec<PropertyInfo>) -> TypeId;
    fn function(&self, shape: FunctionShape) -> TypeId;
}

impl TypeDatabase for TypeInterner {
    fn intern(&self, key: TypeKey) -> TypeId {
        TypeInterner::intern(self, key)
    }

    fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        TypeInterner::lookup(self, id)
    }

    fn intern_string(&self, s: &str) -> Atom {
        TypeInterner::intern_string(self, s)
    }

    fn resolve_atom(&self, atom: Atom) -> String {
        TypeInterner::resolve_atom(self, atom)
    }

    fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        TypeInterner::resolve_atom_ref(self, atom)
    }

    fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        TypeInterner::type_list(self, id)
    }

    fn object_shape(&self, id: ObjectShapeId) -> Arc<ObjectShape> {
        TypeInterner::object_shape(self, id)
    }

    fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape> {
        TypeInterner::function_shape(self, id)
    }

    fn literal_string(&self, value: &str) -> TypeId {
        TypeInterner::literal_string(self, value)
    }

    fn literal_number(&self, value: f64) -> TypeId {
        TypeInterner::literal_number(self, value)
    }

    fn literal_boolean(&self, value: bool) -> TypeId {
        TypeInterner::literal_boolean(self, value)
    }

    fn union(&self, members: Vec<TypeId>) -> TypeId {
        TypeInterner::union(self, members)
    }

    fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        TypeInterner::union2(self, left, right)
    }

    fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        TypeInterner::object(self, properties)
    }

    fn function(&self, shape: FunctionShape) -> TypeId {
        TypeInterner::function(self, shape)
    }
}

/// Members of a union, or `None` if `type_id` is not a union.
pub fn union_members(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<[TypeId]>> {
    match db.lookup(type_id) {
        Some(TypeKey::Union(list_id)) => Some(db.type_list(list_id)),
        _ => None,
    }
}

/// Object shape of `type_id`, or `None` for non-object types.
pub fn object_shape_of(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<ObjectShape>> {
    match db.lookup(type_id) {
        Some(TypeKey::Object(shape_id)) => Some(db.object_shape(shape_id)),
        _ => None,
    }
}

/// Call signature of `type_id`, or `None` for non-function types.
pub fn function_shape_of(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<FunctionShape>> {
    match db.lookup(type_id) {
        Some(TypeKey::Function(shape_id)) => Some(db.function_shape(shape_id)),
        _ => None,
    }
}
