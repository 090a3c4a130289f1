//! Property access resolution (`obj.prop`).

use crate::db::TypeDatabase;
use crate::narrowing::split_nullish_type;
use crate::types::*;
use crate::visitor::TypeVisitor;
use thisctx_common::interner::Atom;
use thisctx_common::limits::MAX_TYPE_LOWERING_DEPTH;

/// Result of attempting to access a property on a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyAccessResult {
    /// Property exists. Optional members already include `undefined`.
    Success { type_id: TypeId, optional: bool },

    /// Property does not exist on this type
    PropertyNotFound { type_id: TypeId, property_name: Atom },

    /// Type is possibly null or undefined.
    PossiblyNullOrUndefined {
        /// Type from the non-nullable members, for recovery
        property_type: Option<TypeId>,
        /// NULL, UNDEFINED, or their union
        cause: TypeId,
    },

    /// Type is unknown
    IsUnknown,
}

/// Evaluates property access on a type.
pub struct PropertyAccessEvaluator<'a> {
    db: &'a dyn TypeDatabase,
    name: Atom,
    depth: u32,
}

impl<'a> PropertyAccessEvaluator<'a> {
    pub fn new(db: &'a dyn TypeDatabase, name: Atom) -> Self {
        PropertyAccessEvaluator { db, name, depth: 0 }
    }

    pub fn resolve(&mut self, obj_type: TypeId) -> PropertyAccessResult {
        if self.depth >= MAX_TYPE_LOWERING_DEPTH {
            return PropertyAccessResult::Success {
                type_id: TypeId::ERROR,
                optional: false,
            };
        }
        self.depth += 1;
        let db = self.db;
        let result = self.visit_type(db, obj_type).unwrap_or(
            PropertyAccessResult::PropertyNotFound {
                type_id: obj_type,
                property_name: self.name,
            },
        );
        self.depth -= 1;
        result
    }

    fn resolve_union(&mut self, union_type: TypeId, members: &[TypeId]) -> PropertyAccessResult {
        let (non_nullish, nullish) = split_nullish_type(self.db, union_type);

        if let Some(cause) = nullish {
            let property_type = match non_nullish {
                Some(rest) => match self.resolve(rest) {
                    PropertyAccessResult::Success { type_id, .. } => Some(type_id),
                    other => return other,
                },
                None => None,
            };
            return PropertyAccessResult::PossiblyNullOrUndefined {
                property_type,
                cause,
            };
        }

        let mut types = Vec::with_capacity(members.len());
        let mut optional = false;
        for &member in members {
            match self.resolve(member) {
                PropertyAccessResult::Success {
                    type_id,
                    optional: member_optional,
                } => {
                    types.push(type_id);
                    optional |= member_optional;
                }
                PropertyAccessResult::PropertyNotFound { .. } => {
                    return PropertyAccessResult::PropertyNotFound {
                        type_id: union_type,
                        property_name: self.name,
                    };
                }
                other => return other,
            }
        }

        PropertyAccessResult::Success {
            type_id: self.db.union(types),
            optional,
        }
    }
}

impl<'a> TypeVisitor for PropertyAccessEvaluator<'a> {
    type Output = Option<PropertyAccessResult>;

    fn visit_intrinsic(&mut self, kind: IntrinsicKind) -> Self::Output {
        match kind {
            IntrinsicKind::Any => Some(PropertyAccessResult::Success {
                type_id: TypeId::ANY,
                optional: false,
            }),
            // Unreachable code
            IntrinsicKind::Never => Some(PropertyAccessResult::Success {
                type_id: TypeId::NEVER,
                optional: false,
            }),
            IntrinsicKind::Unknown => Some(PropertyAccessResult::IsUnknown),
            IntrinsicKind::Void | IntrinsicKind::Undefined => {
                Some(PropertyAccessResult::PossiblyNullOrUndefined {
                    property_type: None,
                    cause: TypeId::UNDEFINED,
                })
            }
            IntrinsicKind::Null => Some(PropertyAccessResult::PossiblyNullOrUndefined {
                property_type: None,
                cause: TypeId::NULL,
            }),
            IntrinsicKind::Boolean | IntrinsicKind::Number | IntrinsicKind::String => None,
        }
    }

    fn visit_literal(&mut self, _value: &LiteralValue) -> Self::Output {
        None
    }

    fn visit_object(&mut self, shape_id: u32) -> Self::Output {
        let shape = self.db.object_shape(ObjectShapeId(shape_id));
        let prop = shape.find(self.name)?;
        let type_id = if prop.optional {
            self.db.union2(prop.type_id, TypeId::UNDEFINED)
        } else {
            prop.type_id
        };
        Some(PropertyAccessResult::Success {
            type_id,
            optional: prop.optional,
        })
    }

    fn visit_union(&mut self, list_id: u32) -> Self::Output {
        let members = self.db.type_list(TypeListId(list_id));
        let union_type = self.db.intern(TypeKey::Union(TypeListId(list_id)));
        Some(self.resolve_union(union_type, &members))
    }

    fn visit_error(&mut self) -> Self::Output {
        Some(PropertyAccessResult::Success {
            type_id: TypeId::ERROR,
            optional: false,
        })
    }

    fn default_output() -> Self::Output {
        None
    }
}

/// Resolve member `name` on `obj_type`.
///
/// Reading an optional member yields `T | undefined`. On a union every
/// constituent must declare the member.
pub fn resolve_property_access(
    db: &dyn TypeDatabase,
    obj_type: TypeId,
    name: Atom,
) -> PropertyAccessResult {
    PropertyAccessEvaluator::new(db, name).resolve(obj_type)
}
