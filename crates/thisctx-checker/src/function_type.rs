//! Object-literal method bodies.

use crate::state::CheckerState;
use thisctx_ast::{NodeArena, NodeIndex};
use thisctx_solver::{
    ContextualTypeContext, FunctionShape, ParamInfo, TypeId, widen_literal_type,
};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Check the method at `idx` with `receiver` bound to `this`.
    ///
    /// `member_context` is the contextual type of the member itself (the
    /// method signature declared on the literal's contextual type). It
    /// types unannotated parameters and `return` expressions.
    ///
    /// Returns the method's function type.
    pub fn check_method(
        &mut self,
        idx: NodeIndex,
        receiver: TypeId,
        member_context: Option<TypeId>,
    ) -> TypeId {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(method) = arena.get(idx).and_then(|node| arena.get_method_decl(node)) else {
            return TypeId::ERROR;
        };
        let ctx_helper = member_context.map(|t| ContextualTypeContext::with_expected(db, t));

        self.ctx.receiver_types.insert(idx.0, receiver);
        trace!(
            method = arena.identifier_text(method.name).unwrap_or("<anonymous>"),
            receiver = %self.format_type(receiver),
            "resolved method receiver"
        );

        let strict_null_checks = self.ctx.compiler_options.strict_null_checks;
        let mut params = Vec::with_capacity(method.parameters.len());
        let mut bindings = Vec::with_capacity(method.parameters.len());
        for (index, &param_idx) in method.parameters.iter().enumerate() {
            let Some(param) = arena.get(param_idx).and_then(|node| arena.get_parameter(node))
            else {
                continue;
            };
            let name = arena.identifier_text(param.name).unwrap_or("");
            let mut optional = param.question_token || param.initializer.is_some();

            let type_id = if param.type_annotation.is_some() {
                self.lower_type_node(param.type_annotation)
            } else if let Some(contextual) =
                ctx_helper.as_ref().and_then(|c| c.get_parameter_type(index))
            {
                if ctx_helper
                    .as_ref()
                    .is_some_and(|c| c.is_parameter_optional(index))
                {
                    optional = true;
                }
                contextual
            } else {
                self.maybe_report_implicit_any_parameter(name, param.name);
                TypeId::ANY
            };

            let binding = if optional && strict_null_checks && !param.dot_dot_dot_token {
                db.union2(type_id, TypeId::UNDEFINED)
            } else {
                type_id
            };
            params.push(ParamInfo {
                name: Some(db.intern_string(name)),
                type_id,
                optional: optional && !param.dot_dot_dot_token,
                rest: param.dot_dot_dot_token,
            });
            bindings.push((name, binding, param.name));
        }

        let declared_return = method
            .type_annotation
            .is_some()
            .then(|| self.lower_type_node(method.type_annotation));
        let expected_return = declared_return
            .or_else(|| ctx_helper.as_ref().and_then(|c| c.get_return_type()))
            .unwrap_or(TypeId::NONE);

        // Narrowings of the enclosing code do not apply inside the body.
        let saved_frames = std::mem::take(&mut self.ctx.narrowing_frames);
        self.ctx.push_scope();
        for (name, binding, name_idx) in bindings {
            if !self.ctx.declare_value(name, binding) {
                self.error_duplicate_identifier_at(name, name_idx);
            }
        }
        self.ctx.this_type_stack.push(receiver);
        self.ctx.push_return_type(expected_return);
        self.ctx.inferred_returns_stack.push(Vec::new());

        if method.body.is_some() {
            self.check_statement(method.body);
        }

        let returns = self.ctx.inferred_returns_stack.pop().unwrap_or_default();
        self.ctx.pop_return_type();
        self.ctx.this_type_stack.pop();
        self.ctx.pop_scope();
        self.ctx.narrowing_frames = saved_frames;

        let return_type = declared_return.unwrap_or_else(|| {
            if returns.is_empty() {
                TypeId::VOID
            } else {
                db.union(
                    returns
                        .into_iter()
                        .map(|ty| widen_literal_type(db, ty))
                        .collect(),
                )
            }
        });

        db.function(FunctionShape {
            params,
            return_type,
            is_method: true,
        })
    }

    /// Signature of a method from its annotations alone.
    ///
    /// Unannotated parameters are `any`. An unannotated return is `void`
    /// when no `return` in the body carries a value, `any` otherwise. Used
    /// for the literal's own type before its method bodies are checked.
    pub fn method_signature_type(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let Some(method) = arena.get(idx).and_then(|node| arena.get_method_decl(node)) else {
            return TypeId::ERROR;
        };
        let params = self.lower_parameters(&method.parameters, 0);
        let return_type = if method.type_annotation.is_some() {
            self.lower_type_node(method.type_annotation)
        } else if returns_value(arena, method.body) {
            TypeId::ANY
        } else {
            TypeId::VOID
        };
        self.ctx.types.function(FunctionShape {
            params,
            return_type,
            is_method: true,
        })
    }
}

/// Whether a `return <expr>` is reachable syntactically from `stmt`.
fn returns_value(arena: &NodeArena, stmt: NodeIndex) -> bool {
    let Some(node) = arena.get(stmt) else {
        return false;
    };
    if let Some(block) = arena.get_block(node) {
        block.statements.iter().any(|&s| returns_value(arena, s))
    } else if let Some(branch) = arena.get_if_statement(node) {
        returns_value(arena, branch.then_statement) || returns_value(arena, branch.else_statement)
    } else if let Some(ret) = arena.get_return_statement(node) {
        ret.expression.is_some()
    } else {
        false
    }
}
