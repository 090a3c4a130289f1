//! Call expressions: callee resolution, arity, and argument contextual typing.

use crate::state::CheckerState;
use thisctx_ast::NodeIndex;
use thisctx_solver::{FunctionShape, TypeId, contextual_type_for, function_shape_of};
use tracing::trace;

impl<'a> CheckerState<'a> {
    pub fn check_call_expression(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let Some(call) = arena.get(idx).and_then(|node| arena.get_call_expr(node)) else {
            return TypeId::ERROR;
        };
        let arguments = &call.arguments.nodes;

        let callee_type = self.check_expression(call.expression, None);
        if callee_type == TypeId::ANY || callee_type.is_error() {
            for &arg in arguments {
                self.check_expression(arg, None);
            }
            return callee_type;
        }

        let Some(shape) = function_shape_of(self.ctx.types, callee_type) else {
            self.error_not_callable_at(callee_type, call.expression);
            for &arg in arguments {
                self.check_expression(arg, None);
            }
            return TypeId::ERROR;
        };

        self.check_call_arguments(&shape, call.expression, arguments);
        shape.return_type
    }

    /// Check `arguments` against `shape`.
    ///
    /// Each argument is checked with the parameter type at its position as
    /// contextual type (nullish constituents stripped). On an arity mismatch
    /// TS2554/TS2555 is reported and the arguments that line up with a
    /// parameter are still contextualized; excess ones are checked without
    /// context.
    pub fn check_call_arguments(
        &mut self,
        shape: &FunctionShape,
        callee: NodeIndex,
        arguments: &[NodeIndex],
    ) -> Vec<TypeId> {
        if !shape.accepts_arity(arguments.len()) {
            let anchor = match shape.max_arity() {
                Some(max) if arguments.len() > max => arguments[max],
                _ => callee,
            };
            self.error_argument_count_at(shape, arguments.len(), anchor);
        }

        arguments
            .iter()
            .enumerate()
            .map(|(index, &arg)| {
                let param_type = parameter_type_at(shape, index);
                let contextual = contextual_type_for(self.ctx.types, param_type);
                trace!(index, ?param_type, ?contextual, "checking call argument");
                self.check_expression(arg, contextual)
            })
            .collect()
    }
}

/// Declared type of the parameter receiving argument `index`.
/// A trailing rest parameter receives every remaining argument.
fn parameter_type_at(shape: &FunctionShape, index: usize) -> Option<TypeId> {
    match shape.params.get(index) {
        Some(param) => Some(param.type_id),
        None => shape
            .params
            .last()
            .filter(|last| last.rest)
            .map(|last| last.type_id),
    }
}
