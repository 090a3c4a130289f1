//! Type interning for structural deduplication.
//!
//! Converts `TypeKey` structures into `TypeId` handles. Structurally equal
//! keys share one id, so equality checks compare integers and each distinct
//! structure is stored once.
//!
//! Storage is sharded behind `RwLock`s; a `&TypeInterner` can be shared
//! across threads while independent checks intern concurrently.

use crate::types::*;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};
use thisctx_common::interner::{Atom, ShardedInterner};

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 64 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;
const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PrimitiveClass {
    String,
    Number,
    Boolean,
}

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeKey, u32>>,
    index_to_key: RwLock<Vec<TypeKey>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: Vec<T>) -> u32 {
        if items.is_empty() {
            return 0;
        }
        if let Some(&id) = self.map.get(items.as_slice()) {
            return id;
        }
        let arc: Arc<[T]> = items.into();
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }

    fn empty(&self) -> Arc<[T]> {
        self.items
            .first()
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }
}

struct ValueInterner<T> {
    items: Vec<Arc<T>>,
    map: FxHashMap<Arc<T>, u32>,
}

impl<T> ValueInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        ValueInterner {
            items: Vec::new(),
            map: FxHashMap::default(),
        }
    }

    fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }
        let arc = Arc::new(value);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<T>> {
        self.items.get(id as usize).cloned()
    }
}

/// Type interning table.
/// Thread-safe via RwLock for concurrent access.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// Member names and string literal values.
    pub string_interner: ShardedInterner,
    type_lists: RwLock<SliceInterner<TypeId>>,
    object_shapes: RwLock<ValueInterner<ObjectShape>>,
    function_shapes: RwLock<ValueInterner<FunctionShape>>,
}

impl TypeInterner {
    /// Create a new type interner with pre-registered intrinsics
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            string_interner: {
                let interner = ShardedInterner::new();
                interner.intern_common();
                interner
            },
            type_lists: RwLock::new(SliceInterner::new()),
            object_shapes: RwLock::new(ValueInterner::new()),
            function_shapes: RwLock::new(ValueInterner::new()),
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.string_interner.resolve(atom).to_string()
    }

    /// Resolve an Atom without allocating a new String.
    pub fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        let lists = self.type_lists.read().unwrap_or_else(PoisonError::into_inner);
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    pub fn object_shape(&self, id: ObjectShapeId) -> Arc<ObjectShape> {
        self.object_shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id.0)
            .unwrap_or_else(|| Arc::new(ObjectShape::default()))
    }

    pub fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape> {
        self.function_shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id.0)
            .unwrap_or_else(|| {
                Arc::new(FunctionShape {
                    params: Vec::new(),
                    return_type: TypeId::ERROR,
                    is_method: false,
                })
            })
    }

    /// Intern a type key and return its TypeId.
    /// If the key already exists, returns the existing TypeId.
    pub fn intern(&self, key: TypeKey) -> TypeId {
        if let Some(id) = self.get_intrinsic_id(&key) {
            return id;
        }

        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard
                .key_to_index
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(&local_index) = map.get(&key) {
                return self.make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard
            .key_to_index
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut storage = shard
            .index_to_key
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Another thread may have interned the key between the locks.
        if let Some(&local_index) = map.get(&key) {
            return self.make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        if local_index > ((u32::MAX - TypeId::FIRST_USER) >> SHARD_BITS) {
            return TypeId::ERROR;
        }

        storage.push(key.clone());
        map.insert(key, local_index);

        self.make_id(local_index, shard_idx as u32)
    }

    /// Look up the TypeKey for a given TypeId
    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        if id.is_intrinsic() {
            return self.get_intrinsic_key(id);
        }

        let raw_val = id.0.checked_sub(TypeId::FIRST_USER)?;
        let shard_idx = (raw_val & SHARD_MASK) as usize;
        let local_index = raw_val >> SHARD_BITS;

        let shard = self.shards.get(shard_idx)?;
        let storage = shard
            .index_to_key
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        storage.get(local_index as usize).cloned()
    }

    fn intern_type_list(&self, members: Vec<TypeId>) -> TypeListId {
        let mut lists = self
            .type_lists
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        TypeListId(lists.intern(members))
    }

    fn intern_object_shape(&self, shape: ObjectShape) -> ObjectShapeId {
        let mut shapes = self
            .object_shapes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        ObjectShapeId(shapes.intern(shape))
    }

    fn intern_function_shape(&self, shape: FunctionShape) -> FunctionShapeId {
        let mut shapes = self
            .function_shapes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        FunctionShapeId(shapes.intern(shape))
    }

    /// Get the number of interned types, intrinsics included
    pub fn len(&self) -> usize {
        let mut total = TypeId::FIRST_USER as usize;
        for shard in &self.shards {
            total += shard
                .index_to_key
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len();
        }
        total
    }

    /// Check if the interner is empty (only has intrinsics)
    pub fn is_empty(&self) -> bool {
        self.len() <= TypeId::FIRST_USER as usize
    }

    #[inline]
    fn make_id(&self, local_index: u32, shard_idx: u32) -> TypeId {
        let raw_val = (local_index << SHARD_BITS) | (shard_idx & SHARD_MASK);
        TypeId(TypeId::FIRST_USER + raw_val)
    }

    fn get_intrinsic_id(&self, key: &TypeKey) -> Option<TypeId> {
        match key {
            TypeKey::Intrinsic(kind) => Some(kind.to_type_id()),
            TypeKey::Error => Some(TypeId::ERROR),
            _ => None,
        }
    }

    fn get_intrinsic_key(&self, id: TypeId) -> Option<TypeKey> {
        match id {
            TypeId::NONE | TypeId::ERROR => Some(TypeKey::Error),
            _ => IntrinsicKind::from_type_id(id).map(TypeKey::Intrinsic),
        }
    }

    // =========================================================================
    // Convenience methods for common type constructions
    // =========================================================================

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeKey::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        self.intern(TypeKey::Literal(LiteralValue::Number(OrderedFloat(value))))
    }

    pub fn literal_boolean(&self, value: bool) -> TypeId {
        self.intern(TypeKey::Literal(LiteralValue::Boolean(value)))
    }

    /// Intern a union type, normalizing and deduplicating members
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        self.union_from_iter(members)
    }

    /// Fast path for unions that already fit in registers.
    pub fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.union_from_iter([left, right])
    }

    fn union_from_iter<I>(&self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut iter = members.into_iter();
        let Some(first) = iter.next() else {
            return TypeId::NEVER;
        };
        let Some(second) = iter.next() else {
            return first;
        };

        let mut flat: TypeListBuffer = SmallVec::new();
        self.push_union_member(&mut flat, first);
        self.push_union_member(&mut flat, second);
        for member in iter {
            self.push_union_member(&mut flat, member);
        }

        self.normalize_union(flat)
    }

    fn push_union_member(&self, flat: &mut TypeListBuffer, member: TypeId) {
        if let Some(TypeKey::Union(inner)) = self.lookup(member) {
            let members = self.type_list(inner);
            flat.extend(members.iter().copied());
        } else {
            flat.push(member);
        }
    }

    fn normalize_union(&self, mut flat: TypeListBuffer) -> TypeId {
        // Deduplicate and sort for consistent hashing
        flat.sort_by_key(|id| id.0);
        flat.dedup();

        if flat.contains(&TypeId::ERROR) {
            return TypeId::ERROR;
        }
        if flat.is_empty() {
            return TypeId::NEVER;
        }
        if flat.len() == 1 {
            return flat[0];
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|id| *id != TypeId::NEVER);
        if flat.is_empty() {
            return TypeId::NEVER;
        }
        if flat.len() == 1 {
            return flat[0];
        }

        // "a" | string => string, 1 | number => number
        self.absorb_literals_into_primitives(&mut flat);

        if flat.len() == 1 {
            return flat[0];
        }

        let list_id = self.intern_type_list(flat.into_vec());
        self.intern(TypeKey::Union(list_id))
    }

    fn primitive_class_for_literal(literal: &LiteralValue) -> PrimitiveClass {
        match literal {
            LiteralValue::String(_) => PrimitiveClass::String,
            LiteralValue::Number(_) => PrimitiveClass::Number,
            LiteralValue::Boolean(_) => PrimitiveClass::Boolean,
        }
    }

    fn absorb_literals_into_primitives(&self, flat: &mut TypeListBuffer) {
        let has_string = flat.contains(&TypeId::STRING);
        let has_number = flat.contains(&TypeId::NUMBER);
        let has_boolean = flat.contains(&TypeId::BOOLEAN);
        if !has_string && !has_number && !has_boolean {
            return;
        }

        flat.retain(|type_id| {
            let Some(TypeKey::Literal(literal)) = self.lookup(*type_id) else {
                return true;
            };
            match Self::primitive_class_for_literal(&literal) {
                PrimitiveClass::String => !has_string,
                PrimitiveClass::Number => !has_number,
                PrimitiveClass::Boolean => !has_boolean,
            }
        });
    }

    /// Intern an object type. Members keep their declaration order.
    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        let shape_id = self.intern_object_shape(ObjectShape { properties });
        self.intern(TypeKey::Object(shape_id))
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        let shape_id = self.intern_function_shape(shape);
        self.intern(TypeKey::Function(shape_id))
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
