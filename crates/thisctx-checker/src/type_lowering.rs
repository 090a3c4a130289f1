//! Lowering of type annotation nodes into solver types.
//!
//! Type references resolve lazily through the alias table, so aliases may
//! refer to aliases declared later in the file. A reference cycle lowers
//! to `ERROR`.

use crate::state::CheckerState;
use thisctx_ast::{NodeIndex, NodeList, SyntaxKind, syntax_kind_ext};
use thisctx_common::limits::MAX_TYPE_LOWERING_DEPTH;
use thisctx_solver::{
    DeclarationError, MemberDecl, ParamInfo, TypeId, declare_method_type, declare_object_type,
};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Lower a type annotation node. `NodeIndex::NONE` lowers to `ANY`.
    pub fn lower_type_node(&mut self, idx: NodeIndex) -> TypeId {
        self.lower_type_node_at(idx, 0)
    }

    fn lower_type_node_at(&mut self, idx: NodeIndex, depth: u32) -> TypeId {
        if idx.is_none() {
            return TypeId::ANY;
        }
        if depth >= MAX_TYPE_LOWERING_DEPTH {
            return TypeId::ERROR;
        }
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return TypeId::ERROR;
        };

        match node.kind {
            k if k == SyntaxKind::AnyKeyword as u16 => TypeId::ANY,
            k if k == SyntaxKind::UnknownKeyword as u16 => TypeId::UNKNOWN,
            k if k == SyntaxKind::NeverKeyword as u16 => TypeId::NEVER,
            k if k == SyntaxKind::VoidKeyword as u16 => TypeId::VOID,
            k if k == SyntaxKind::UndefinedKeyword as u16 => TypeId::UNDEFINED,
            k if k == SyntaxKind::NullKeyword as u16 => TypeId::NULL,
            k if k == SyntaxKind::BooleanKeyword as u16 => TypeId::BOOLEAN,
            k if k == SyntaxKind::NumberKeyword as u16 => TypeId::NUMBER,
            k if k == SyntaxKind::StringKeyword as u16 => TypeId::STRING,

            syntax_kind_ext::TYPE_REFERENCE => {
                let Some(type_ref) = arena.get_type_ref(node) else {
                    return TypeId::ERROR;
                };
                let Some(name) = arena.identifier_text(type_ref.type_name) else {
                    return TypeId::ERROR;
                };
                match self.resolve_type_alias(name) {
                    Some(type_id) => type_id,
                    None => {
                        self.error_cannot_find_name_at(name, type_ref.type_name);
                        TypeId::ERROR
                    }
                }
            }

            syntax_kind_ext::UNION_TYPE => {
                let Some(composite) = arena.get_composite_type(node) else {
                    return TypeId::ERROR;
                };
                let members: Vec<TypeId> = composite
                    .types
                    .iter()
                    .map(|&member| self.lower_type_node_at(member, depth + 1))
                    .collect();
                self.ctx.types.union(members)
            }

            syntax_kind_ext::TYPE_LITERAL => self.lower_type_literal(idx, depth),

            _ => TypeId::ERROR,
        }
    }

    /// Type of the alias `name`, lowering it on first use.
    ///
    /// `None` when no alias of that name was declared.
    pub fn resolve_type_alias(&mut self, name: &str) -> Option<TypeId> {
        if let Some(&cached) = self.ctx.type_alias_types.get(name) {
            return Some(cached);
        }
        let type_node = *self.ctx.type_alias_nodes.get(name)?;
        if !self.ctx.alias_resolution_set.insert(name.to_string()) {
            trace!(alias = name, "circular type alias");
            return Some(TypeId::ERROR);
        }

        let type_id = self.lower_type_node(type_node);

        self.ctx.alias_resolution_set.remove(name);
        self.ctx.type_alias_types.insert(name.to_string(), type_id);
        trace!(alias = name, ty = %self.format_type(type_id), "lowered type alias");
        Some(type_id)
    }

    /// Lower `{ x: number; z?: number; moveBy(dx: number): void }`.
    ///
    /// Duplicate member names report TS2300 at every occurrence and the
    /// whole literal lowers to `ERROR`.
    fn lower_type_literal(&mut self, idx: NodeIndex, depth: u32) -> TypeId {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(literal) = arena.get(idx).and_then(|node| arena.get_type_literal(node)) else {
            return TypeId::ERROR;
        };

        let mut decls = Vec::with_capacity(literal.members.len());
        let mut name_nodes = Vec::with_capacity(literal.members.len());
        for &member in literal.members.iter() {
            let Some(sig) = arena.get(member).and_then(|node| arena.get_signature(node)) else {
                continue;
            };
            let Some(name_text) = arena.identifier_text(sig.name) else {
                continue;
            };
            let name = db.intern_string(name_text);

            let decl = match &sig.parameters {
                Some(params) => {
                    let params = self.lower_parameters(params, depth + 1);
                    let return_type = self.lower_type_node_at(sig.type_annotation, depth + 1);
                    MemberDecl::method(name, declare_method_type(db, params, return_type))
                }
                None => MemberDecl::property(
                    name,
                    self.lower_type_node_at(sig.type_annotation, depth + 1),
                ),
            };
            decls.push(decl.with_optional(sig.question_token));
            name_nodes.push((name_text, sig.name));
        }

        match declare_object_type(db, decls) {
            Ok(type_id) => type_id,
            Err(DeclarationError::DuplicateMember { name, .. }) => {
                for &(text, name_idx) in &name_nodes {
                    if text == name {
                        self.error_duplicate_identifier_at(&name, name_idx);
                    }
                }
                TypeId::ERROR
            }
        }
    }

    /// Lower signature parameters. Unannotated parameters are `any`.
    pub(crate) fn lower_parameters(&mut self, params: &NodeList, depth: u32) -> Vec<ParamInfo> {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        params
            .iter()
            .filter_map(|&param_idx| {
                let param = arena.get(param_idx).and_then(|node| arena.get_parameter(node))?;
                let name = arena.identifier_text(param.name).map(|text| db.intern_string(text));
                Some(ParamInfo {
                    name,
                    type_id: self.lower_type_node_at(param.type_annotation, depth),
                    optional: param.question_token || param.initializer.is_some(),
                    rest: param.dot_dot_dot_token,
                })
            })
            .collect()
    }
}
