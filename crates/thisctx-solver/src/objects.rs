//! Structural object and method declarations.
//!
//! Declarations are immutable once interned. The only way to build an object
//! type from checker-side member lists is `declare_object_type`, which rejects
//! duplicate member names.

use crate::db::TypeDatabase;
use crate::types::{FunctionShape, ParamInfo, PropertyInfo, TypeId};
use rustc_hash::FxHashSet;
use thisctx_common::interner::Atom;
use tracing::trace;

/// One member of an object type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub is_method: bool,
}

impl MemberDecl {
    pub fn property(name: Atom, type_id: TypeId) -> Self {
        MemberDecl {
            name,
            type_id,
            optional: false,
            is_method: false,
        }
    }

    pub fn method(name: Atom, type_id: TypeId) -> Self {
        MemberDecl {
            is_method: true,
            ..Self::property(name, type_id)
        }
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// Two members share a name. `index` is the position of the later one.
    #[error("duplicate member '{name}' in object type declaration")]
    DuplicateMember { name: String, index: usize },
}

/// Build an object type from members in declaration order.
pub fn declare_object_type(
    db: &dyn TypeDatabase,
    members: Vec<MemberDecl>,
) -> Result<TypeId, DeclarationError> {
    let mut seen: FxHashSet<Atom> = FxHashSet::default();
    let mut properties = Vec::with_capacity(members.len());

    for (index, member) in members.into_iter().enumerate() {
        if !seen.insert(member.name) {
            return Err(DeclarationError::DuplicateMember {
                name: db.resolve_atom(member.name),
                index,
            });
        }
        properties.push(PropertyInfo {
            name: member.name,
            type_id: member.type_id,
            optional: member.optional,
            readonly: false,
            is_method: member.is_method,
        });
    }

    let type_id = db.object(properties);
    trace!(?type_id, "declared object type");
    Ok(type_id)
}

/// Build a method signature. The receiver stays unresolved until the method
/// is checked inside an object literal.
pub fn declare_method_type(
    db: &dyn TypeDatabase,
    params: Vec<ParamInfo>,
    return_type: TypeId,
) -> TypeId {
    db.function(FunctionShape {
        params,
        return_type,
        is_method: true,
    })
}
