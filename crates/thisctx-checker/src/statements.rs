//! Statement checking.

use crate::state::CheckerState;
use thisctx_ast::{NodeIndex, syntax_kind_ext};
use thisctx_solver::{TypeId, contextual_type_for};

impl<'a> CheckerState<'a> {
    pub fn check_statement(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            syntax_kind_ext::BLOCK => {
                let Some(block) = arena.get_block(node) else {
                    return;
                };
                self.ctx.push_scope();
                for &stmt in block.statements.iter() {
                    self.check_statement(stmt);
                }
                self.ctx.pop_scope();
            }
            syntax_kind_ext::VARIABLE_STATEMENT => self.check_variable_statement(idx),
            syntax_kind_ext::EXPRESSION_STATEMENT => {
                if let Some(stmt) = arena.get_expression_statement(node) {
                    self.check_expression(stmt.expression, None);
                }
            }
            syntax_kind_ext::IF_STATEMENT => self.check_if_statement(idx),
            syntax_kind_ext::RETURN_STATEMENT => self.check_return_statement(idx),
            // Bound by the pre-pass.
            syntax_kind_ext::TYPE_ALIAS_DECLARATION | syntax_kind_ext::FUNCTION_DECLARATION => {}
            _ => {}
        }
    }

    /// `if (cond) then else`. The then-branch sees `cond`'s truthy narrowings.
    fn check_if_statement(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(stmt) = arena.get(idx).and_then(|node| arena.get_if_statement(node)) else {
            return;
        };

        self.check_expression(stmt.expression, None);
        let narrowed = self.collect_truthy_narrowings(stmt.expression);

        self.ctx.narrowing_frames.push(narrowed);
        self.check_statement(stmt.then_statement);
        self.ctx.narrowing_frames.pop();

        if stmt.else_statement.is_some() {
            self.check_statement(stmt.else_statement);
        }
    }

    /// `return expr;` is checked against the enclosing method's return type,
    /// and its type is collected for return type inference.
    fn check_return_statement(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(ret) = arena.get(idx).and_then(|node| arena.get_return_statement(node)) else {
            return;
        };

        let return_type = if ret.expression.is_some() {
            let contextual = contextual_type_for(self.ctx.types, self.ctx.current_return_type());
            self.check_expression(ret.expression, contextual)
        } else {
            TypeId::VOID
        };

        if let Some(returns) = self.ctx.inferred_returns_stack.last_mut() {
            returns.push(return_type);
        }
    }
}
