//! Literal widening for mutable locations.
//!
//! `let x = 1` and `{ x: 1 }` store `number`, not the literal `1`.

use crate::db::{TypeDatabase, union_members};
use crate::types::{LiteralValue, TypeId, TypeKey};

/// Widen literal types to their primitive. Unions are widened member-wise.
pub fn widen_literal_type(db: &dyn TypeDatabase, type_id: TypeId) -> TypeId {
    match db.lookup(type_id) {
        Some(TypeKey::Literal(LiteralValue::String(_))) => TypeId::STRING,
        Some(TypeKey::Literal(LiteralValue::Number(_))) => TypeId::NUMBER,
        Some(TypeKey::Literal(LiteralValue::Boolean(_))) => TypeId::BOOLEAN,
        Some(TypeKey::Union(_)) => {
            let Some(members) = union_members(db, type_id) else {
                return type_id;
            };
            let widened: Vec<TypeId> = members
                .iter()
                .map(|&member| widen_literal_type(db, member))
                .collect();
            db.union(widened)
        }
        _ => type_id,
    }
}
