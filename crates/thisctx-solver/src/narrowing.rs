//! Nullish stripping and truthiness narrowing.
//!
//! `strip_nullish` is the single place where `null`/`undefined` constituents
//! are removed from a type. Contextual typing and truthiness narrowing both
//! go through it.

use crate::db::{TypeDatabase, union_members};
use crate::types::{LiteralValue, TypeId, TypeKey};
use tracing::trace;

/// Which nullish values a type admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullishKind {
    Null,
    Undefined,
    NullOrUndefined,
}

/// `void` is not nullish here: only `null` and `undefined` are stripped.
#[inline]
fn is_nullish_intrinsic(type_id: TypeId) -> bool {
    matches!(type_id, TypeId::NULL | TypeId::UNDEFINED)
}

fn split_nullish_members(
    db: &dyn TypeDatabase,
    type_id: TypeId,
    non_nullish: &mut Vec<TypeId>,
    nullish: &mut Vec<TypeId>,
) {
    if is_nullish_intrinsic(type_id) {
        nullish.push(type_id);
        return;
    }

    if let Some(members) = union_members(db, type_id) {
        for &member in members.iter() {
            split_nullish_members(db, member, non_nullish, nullish);
        }
        return;
    }

    non_nullish.push(type_id);
}

/// Split a type into its non-nullish part and its nullish part.
pub fn split_nullish_type(db: &dyn TypeDatabase, type_id: TypeId) -> (Option<TypeId>, Option<TypeId>) {
    let mut non_nullish = Vec::new();
    let mut nullish = Vec::new();

    split_nullish_members(db, type_id, &mut non_nullish, &mut nullish);

    if nullish.is_empty() {
        return (Some(type_id), None);
    }

    let non_nullish_type = match non_nullish.len() {
        0 => None,
        1 => Some(non_nullish[0]),
        _ => Some(db.union(non_nullish)),
    };

    let nullish_type = if nullish.len() == 1 {
        Some(nullish[0])
    } else {
        Some(db.union(nullish))
    };

    (non_nullish_type, nullish_type)
}

/// Remove `null` and `undefined` constituents.
///
/// Returns `None` when nothing remains (`null`, `undefined`, `null | undefined`).
/// Idempotent: stripping an already stripped type returns it unchanged.
pub fn strip_nullish(db: &dyn TypeDatabase, type_id: TypeId) -> Option<TypeId> {
    let (non_nullish, nullish) = split_nullish_type(db, type_id);
    if nullish.is_some() {
        trace!(?type_id, ?non_nullish, "stripped nullish constituents");
    }
    non_nullish
}

/// Which nullish values `type_id` admits, if any.
pub fn nullish_kind(db: &dyn TypeDatabase, type_id: TypeId) -> Option<NullishKind> {
    let (_, nullish) = split_nullish_type(db, type_id);
    let nullish = nullish?;
    let has_null = type_contains(db, nullish, TypeId::NULL);
    let has_undefined = type_contains(db, nullish, TypeId::UNDEFINED);
    match (has_null, has_undefined) {
        (true, true) => Some(NullishKind::NullOrUndefined),
        (true, false) => Some(NullishKind::Null),
        (false, true) => Some(NullishKind::Undefined),
        (false, false) => None,
    }
}

fn type_contains(db: &dyn TypeDatabase, type_id: TypeId, member: TypeId) -> bool {
    if type_id == member {
        return true;
    }
    union_members(db, type_id).is_some_and(|members| members.contains(&member))
}

/// Narrow `type_id` to the values that can be truthy.
///
/// Drops nullish constituents, `void`, and the falsy literals `false`, `0`
/// and `""`.
/// `any` and `unknown` are left alone.
pub fn narrow_by_truthiness(db: &dyn TypeDatabase, type_id: TypeId) -> TypeId {
    if type_id.is_any_or_unknown() || type_id.is_error() {
        return type_id;
    }
    let Some(non_nullish) = strip_nullish(db, type_id) else {
        return TypeId::NEVER;
    };

    let members: Vec<TypeId> = match union_members(db, non_nullish) {
        Some(members) => members.to_vec(),
        None => vec![non_nullish],
    };
    let truthy: Vec<TypeId> = members
        .into_iter()
        .filter(|&member| member != TypeId::VOID && !is_falsy_literal(db, member))
        .collect();
    db.union(truthy)
}

fn is_falsy_literal(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    match db.lookup(type_id) {
        Some(TypeKey::Literal(LiteralValue::Boolean(value))) => !value,
        Some(TypeKey::Literal(LiteralValue::Number(value))) => value.0 == 0.0 || value.0.is_nan(),
        Some(TypeKey::Literal(LiteralValue::String(atom))) => atom.is_none(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/narrowing_tests.rs"]
mod tests;
