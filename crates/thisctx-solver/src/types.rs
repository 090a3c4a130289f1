//! Structural type keys and their interned handles.
//!
//! A `TypeId` is a `u32` handle into the `TypeInterner`. Structurally
//! identical keys intern to the same id, so type identity is `==` on ids.

use thisctx_common::interner::Atom;

/// Handle to an interned type.
///
/// Ids below `FIRST_USER` are reserved for intrinsics and never hit the
/// interner's shards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Absent type (no annotation, unresolved).
    pub const NONE: TypeId = TypeId(0);
    /// Poison type produced after a reported error; absorbs further errors.
    pub const ERROR: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const UNKNOWN: TypeId = TypeId(3);
    pub const ANY: TypeId = TypeId(4);
    pub const VOID: TypeId = TypeId(5);
    pub const UNDEFINED: TypeId = TypeId(6);
    pub const NULL: TypeId = TypeId(7);
    pub const BOOLEAN: TypeId = TypeId(8);
    pub const NUMBER: TypeId = TypeId(9);
    pub const STRING: TypeId = TypeId(10);

    /// First id handed out for interned (non-intrinsic) types.
    pub const FIRST_USER: u32 = 100;

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self == Self::ERROR
    }

    #[inline]
    pub fn is_any_or_unknown(self) -> bool {
        self == Self::ANY || self == Self::UNKNOWN
    }

    #[inline]
    pub fn is_nullable(self) -> bool {
        self == Self::NULL || self == Self::UNDEFINED
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
}

impl IntrinsicKind {
    pub fn to_type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Any => TypeId::ANY,
            IntrinsicKind::Unknown => TypeId::UNKNOWN,
            IntrinsicKind::Never => TypeId::NEVER,
            IntrinsicKind::Void => TypeId::VOID,
            IntrinsicKind::Undefined => TypeId::UNDEFINED,
            IntrinsicKind::Null => TypeId::NULL,
            IntrinsicKind::Boolean => TypeId::BOOLEAN,
            IntrinsicKind::Number => TypeId::NUMBER,
            IntrinsicKind::String => TypeId::STRING,
        }
    }

    pub fn from_type_id(id: TypeId) -> Option<IntrinsicKind> {
        Some(match id {
            TypeId::ANY => IntrinsicKind::Any,
            TypeId::UNKNOWN => IntrinsicKind::Unknown,
            TypeId::NEVER => IntrinsicKind::Never,
            TypeId::VOID => IntrinsicKind::Void,
            TypeId::UNDEFINED => IntrinsicKind::Undefined,
            TypeId::NULL => IntrinsicKind::Null,
            TypeId::BOOLEAN => IntrinsicKind::Boolean,
            TypeId::NUMBER => IntrinsicKind::Number,
            TypeId::STRING => IntrinsicKind::String,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
        }
    }
}

/// `f64` wrapper with bitwise equality so literal keys can be hashed.
#[derive(Clone, Copy, Debug)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(Atom),
    Number(OrderedFloat),
    Boolean(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShapeId(pub u32);

/// Structural key of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    Object(ObjectShapeId),
    /// Members are flattened, deduplicated and sorted by id.
    Union(TypeListId),
    Function(FunctionShapeId),
    Error,
}

/// A member of an object type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
    pub is_method: bool,
}

impl PropertyInfo {
    pub fn new(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            name,
            type_id,
            optional: false,
            readonly: false,
            is_method: false,
        }
    }

    pub fn opt(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            optional: true,
            ..Self::new(name, type_id)
        }
    }

    pub fn method(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            is_method: true,
            ..Self::new(name, type_id)
        }
    }
}

/// Members of an object type, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
}

impl ObjectShape {
    pub fn find(&self, name: Atom) -> Option<&PropertyInfo> {
        self.properties.iter().find(|prop| prop.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

impl ParamInfo {
    pub fn required(name: Atom, type_id: TypeId) -> Self {
        ParamInfo {
            name: Some(name),
            type_id,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(name: Atom, type_id: TypeId) -> Self {
        ParamInfo {
            optional: true,
            ..Self::required(name, type_id)
        }
    }
}

/// A call signature.
///
/// Methods carry no receiver of their own; they take it from the object
/// literal they are checked in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub is_method: bool,
}

impl FunctionShape {
    /// Number of arguments a call must supply.
    pub fn min_arity(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.optional && !p.rest)
            .count()
    }

    /// Upper bound on the argument count, `None` with a rest parameter.
    pub fn max_arity(&self) -> Option<usize> {
        if self.params.iter().any(|p| p.rest) {
            None
        } else {
            Some(self.params.len())
        }
    }

    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_arity() && self.max_arity().is_none_or(|max| count <= max)
    }
}
