//! Type visitor pattern.
//!
//! Implementors override the `visit_*` methods for the type kinds they care
//! about; everything else falls through to `default_output`.

use crate::db::TypeDatabase;
use crate::types::{IntrinsicKind, LiteralValue, TypeId, TypeKey};

pub trait TypeVisitor: Sized {
    type Output;

    fn visit_intrinsic(&mut self, kind: IntrinsicKind) -> Self::Output;

    fn visit_literal(&mut self, value: &LiteralValue) -> Self::Output;

    fn visit_object(&mut self, _shape_id: u32) -> Self::Output {
        Self::default_output()
    }

    fn visit_union(&mut self, _list_id: u32) -> Self::Output {
        Self::default_output()
    }

    fn visit_function(&mut self, _shape_id: u32) -> Self::Output {
        Self::default_output()
    }

    fn visit_error(&mut self) -> Self::Output {
        Self::default_output()
    }

    fn default_output() -> Self::Output;

    fn visit_type(&mut self, db: &dyn TypeDatabase, type_id: TypeId) -> Self::Output {
        match db.lookup(type_id) {
            Some(ref type_key) => self.visit_type_key(type_key),
            None => Self::default_output(),
        }
    }

    fn visit_type_key(&mut self, type_key: &TypeKey) -> Self::Output {
        match type_key {
            TypeKey::Intrinsic(kind) => self.visit_intrinsic(*kind),
            TypeKey::Literal(value) => self.visit_literal(value),
            TypeKey::Object(id) => self.visit_object(id.0),
            TypeKey::Union(id) => self.visit_union(id.0),
            TypeKey::Function(id) => self.visit_function(id.0),
            TypeKey::Error => self.visit_error(),
        }
    }
}

/// Whether `type_id` is an object type (not a union or function).
pub fn is_object_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeKey::Object(_)))
}
