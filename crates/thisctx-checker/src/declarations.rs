//! Binder-lite pre-pass and variable declarations.
//!
//! Before any statement is checked, type aliases and ambient function
//! declarations of the file are registered so that statements can refer
//! to them regardless of order.

use crate::state::CheckerState;
use thisctx_ast::{NodeIndex, syntax_kind_ext};
use thisctx_solver::{FunctionShape, TypeId, contextual_type_for, widen_literal_type};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Register the file's type aliases and declared functions.
    pub fn bind_declarations(&mut self, statements: &[NodeIndex]) {
        let arena = self.ctx.arena;

        let mut alias_order = Vec::new();
        let mut first_alias_name: Vec<(&str, NodeIndex)> = Vec::new();
        for &stmt in statements {
            let Some(alias) = arena.get(stmt).and_then(|node| arena.get_type_alias(node)) else {
                continue;
            };
            let Some(name) = arena.identifier_text(alias.name) else {
                continue;
            };
            if self.ctx.type_alias_nodes.contains_key(name) {
                if let Some(&(_, first)) = first_alias_name.iter().find(|(n, _)| *n == name) {
                    self.error_duplicate_identifier_at(name, first);
                }
                self.error_duplicate_identifier_at(name, alias.name);
                continue;
            }
            self.ctx
                .type_alias_nodes
                .insert(name.to_string(), alias.type_node);
            first_alias_name.push((name, alias.name));
            alias_order.push(name);
        }

        // Lower every alias now so errors inside unused aliases surface.
        for name in alias_order {
            self.resolve_type_alias(name);
        }

        for &stmt in statements {
            if arena.kind_of(stmt) == syntax_kind_ext::FUNCTION_DECLARATION {
                self.bind_function_declaration(stmt);
            }
        }
    }

    /// Bind `declare function name(params): R;` as a callable value.
    fn bind_function_declaration(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(func) = arena.get(idx).and_then(|node| arena.get_function(node)) else {
            return;
        };
        let Some(name) = arena.identifier_text(func.name) else {
            return;
        };

        let params = self.lower_parameters(&func.parameters, 0);
        let return_type = if func.type_annotation.is_some() {
            self.lower_type_node(func.type_annotation)
        } else {
            TypeId::VOID
        };
        let func_type = self.ctx.types.function(FunctionShape {
            params,
            return_type,
            is_method: false,
        });

        trace!(name, ty = %self.format_type(func_type), "bound declared function");
        if !self.ctx.declare_value(name, func_type) {
            self.error_duplicate_identifier_at(name, func.name);
        }
    }

    pub fn check_variable_statement(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(var) = arena.get(idx).and_then(|node| arena.get_variable(node)) else {
            return;
        };
        for &decl in var.declarations.iter() {
            self.check_variable_declaration(decl);
        }
    }

    /// Check `let name: T = init` and bind `name`.
    ///
    /// The binding gets the declared type when annotated, otherwise the
    /// widened type of the initializer.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_variable_declaration(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let Some(decl) = arena
            .get(idx)
            .and_then(|node| arena.get_variable_declaration(node))
        else {
            return TypeId::ERROR;
        };

        let declared = decl
            .type_annotation
            .is_some()
            .then(|| self.lower_type_node(decl.type_annotation));

        let initializer_type = decl
            .initializer
            .is_some()
            .then(|| self.check_initializer(decl.initializer, declared));

        let bound = match (declared, initializer_type) {
            (Some(declared), _) => declared,
            (None, Some(init)) => widen_literal_type(self.ctx.types, init),
            (None, None) => TypeId::ANY,
        };

        if let Some(name) = arena.identifier_text(decl.name) {
            if !self.ctx.declare_value(name, bound) {
                self.error_duplicate_identifier_at(name, decl.name);
            }
        }
        bound
    }

    /// Check an initializer against an optional declared type.
    ///
    /// The initializer's contextual type is the declared type with its
    /// nullish constituents stripped.
    pub fn check_initializer(&mut self, initializer: NodeIndex, declared: Option<TypeId>) -> TypeId {
        let contextual = contextual_type_for(self.ctx.types, declared);
        self.check_expression(initializer, contextual)
    }
}
