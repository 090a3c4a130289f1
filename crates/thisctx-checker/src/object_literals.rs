//! Object literal checking and receiver resolution for literal methods.
//!
//! Inside a method written on an object literal, `this` is:
//!
//! 1. the literal's contextual type, when it has one (after nullish
//!    constituents are stripped), so members the literal does not define
//!    itself are still visible, optional ones as `T | undefined`;
//! 2. otherwise the literal's own structural type.
//!
//! The literal's resulting type is always built from its own members; the
//! contextual type only guides the checking of member values and methods.

use crate::state::CheckerState;
use indexmap::IndexMap;
use thisctx_ast::NodeIndex;
use thisctx_common::diagnostics::diagnostic_codes;
use thisctx_common::interner::Atom;
use thisctx_solver::{
    ContextualTypeContext, PropertyInfo, TypeId, contextual_type_for_object_literal,
    widen_literal_type,
};
use tracing::trace;

/// Members collected so far, in source order, with the node that defined each.
type LiteralMembers = IndexMap<Atom, (NodeIndex, PropertyInfo)>;

impl<'a> CheckerState<'a> {
    /// Check the object literal at `idx` against `contextual` and return its type.
    ///
    /// ```typescript
    /// type Point = { x: number; z?: number; moveBy(dx: number): void };
    /// let p: Point | null = {
    ///     x: 10,
    ///     moveBy(dx) { this.x += dx; }   // this: Point, dx: number
    /// };
    /// ```
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_object_literal(&mut self, idx: NodeIndex, contextual: Option<TypeId>) -> TypeId {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(literal) = arena.get(idx).and_then(|node| arena.get_literal_expr(node)) else {
            return TypeId::ERROR;
        };
        let elements = &literal.elements.nodes;

        let own_names: Vec<Atom> = elements
            .iter()
            .filter_map(|&elem| arena.member_name(elem))
            .map(|name| db.intern_string(name))
            .collect();
        let contextual = contextual_type_for_object_literal(db, contextual, &own_names);

        let mut members = LiteralMembers::default();
        match contextual {
            Some(receiver) => {
                trace!(receiver = %self.format_type(receiver), "object literal has contextual type");
                let context = ContextualTypeContext::with_expected(db, receiver);
                for &elem in elements {
                    self.check_literal_element(elem, &context, receiver, &mut members);
                }
            }
            None => {
                // The receiver is the literal's own type, which needs every
                // member's type first. Methods enter it with their annotated
                // signature and are checked once the receiver is known.
                for &elem in elements {
                    self.check_literal_element_shallow(elem, &mut members);
                }
                let receiver = db.object(members.values().map(|(_, p)| p.clone()).collect());
                trace!(receiver = %self.format_type(receiver), "object literal uses its own type");
                for &elem in elements {
                    if arena.get(elem).and_then(|node| arena.get_method_decl(node)).is_none() {
                        continue;
                    }
                    let Some(name) = arena.member_name(elem).map(|n| db.intern_string(n)) else {
                        continue;
                    };
                    let method_type = self.check_method(elem, receiver, None);
                    if let Some((owner, info)) = members.get_mut(&name)
                        && *owner == elem
                    {
                        info.type_id = method_type;
                    }
                }
            }
        }

        db.object(members.into_values().map(|(_, info)| info).collect())
    }

    /// Check one member of a literal that has a contextual type.
    fn check_literal_element(
        &mut self,
        elem: NodeIndex,
        context: &ContextualTypeContext<'_>,
        receiver: TypeId,
        members: &mut LiteralMembers,
    ) {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(node) = arena.get(elem) else {
            return;
        };
        let Some(name_text) = arena.member_name(elem) else {
            return;
        };
        let name = db.intern_string(name_text);
        let member_context = context.for_property(name_text).expected();

        if let Some(prop) = arena.get_property_assignment(node) {
            let value = self.check_expression(prop.initializer, member_context);
            let info = PropertyInfo::new(name, widen_literal_type(db, value));
            self.add_literal_member(members, elem, prop.name, info);
        } else if let Some(method) = arena.get_method_decl(node) {
            let method_type = self.check_method(elem, receiver, member_context);
            let mut info = PropertyInfo::method(name, method_type);
            info.optional = method.question_token;
            self.add_literal_member(members, elem, method.name, info);
        }
    }

    /// First pass for a literal without contextual type: property values
    /// are checked, methods get their annotated signature.
    fn check_literal_element_shallow(&mut self, elem: NodeIndex, members: &mut LiteralMembers) {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(node) = arena.get(elem) else {
            return;
        };
        let Some(name_text) = arena.member_name(elem) else {
            return;
        };
        let name = db.intern_string(name_text);

        if let Some(prop) = arena.get_property_assignment(node) {
            let value = self.check_expression(prop.initializer, None);
            let info = PropertyInfo::new(name, widen_literal_type(db, value));
            self.add_literal_member(members, elem, prop.name, info);
        } else if let Some(method) = arena.get_method_decl(node) {
            let signature = self.method_signature_type(elem);
            let mut info = PropertyInfo::method(name, signature);
            info.optional = method.question_token;
            self.add_literal_member(members, elem, method.name, info);
        }
    }

    /// Insert a member. A repeated name reports TS1117 at the later name,
    /// and the later member replaces the earlier one in place.
    fn add_literal_member(
        &mut self,
        members: &mut LiteralMembers,
        elem: NodeIndex,
        name_node: NodeIndex,
        info: PropertyInfo,
    ) {
        if members.contains_key(&info.name) {
            self.error_at_node_msg(
                name_node,
                diagnostic_codes::AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME,
                &[],
            );
        }
        members.insert(info.name, (elem, info));
    }
}
