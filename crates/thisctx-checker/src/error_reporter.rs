//! Diagnostic emission helpers for `CheckerState`.
//!
//! Every diagnostic goes through `error_at_node`, which anchors it to a
//! node's span and drops repeats of the same code at the same position.

use crate::state::CheckerState;
use thisctx_ast::NodeIndex;
use thisctx_common::diagnostics::{
    diagnostic_codes, diagnostic_messages, format_message, get_message_template,
};
use thisctx_solver::{FunctionShape, NullishKind, TypeId};

impl<'a> CheckerState<'a> {
    /// Report an error spanning the node at `idx`.
    pub fn error_at_node(&mut self, idx: NodeIndex, message: &str, code: u32) {
        if let Some((start, end)) = self.ctx.get_node_span(idx) {
            self.ctx
                .error(start, end.saturating_sub(start), message.to_string(), code);
        }
    }

    /// Report `code` at `idx`, filling its message template with `args`.
    pub fn error_at_node_msg(&mut self, idx: NodeIndex, code: u32, args: &[&str]) {
        let template = get_message_template(code).unwrap_or("");
        let message = format_message(template, args);
        self.error_at_node(idx, &message, code);
    }

    /// TS2304: Cannot find name '{0}'.
    pub fn error_cannot_find_name_at(&mut self, name: &str, idx: NodeIndex) {
        self.error_at_node_msg(idx, diagnostic_codes::CANNOT_FIND_NAME, &[name]);
    }

    /// TS2300: Duplicate identifier '{0}'.
    pub fn error_duplicate_identifier_at(&mut self, name: &str, idx: NodeIndex) {
        self.error_at_node_msg(idx, diagnostic_codes::DUPLICATE_IDENTIFIER, &[name]);
    }

    /// TS2339: Property '{0}' does not exist on type '{1}'.
    pub fn error_property_not_exist_at(&mut self, name: &str, type_id: TypeId, idx: NodeIndex) {
        // Errors on ERROR were already reported.
        if type_id.is_error() {
            return;
        }
        let type_text = self.format_type(type_id);
        self.error_at_node_msg(
            idx,
            diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
            &[name, &type_text],
        );
    }

    /// Report a possibly-nullish operand or property receiver.
    ///
    /// Named references (`p`, `this.z`) get TS18047/18048/18049; anything
    /// else gets the "Object is possibly ..." forms TS2531/2532/2533.
    pub fn report_possibly_nullish(&mut self, idx: NodeIndex, kind: NullishKind) {
        match self.ctx.arena.reference_text(idx) {
            Some(name) => {
                let code = match kind {
                    NullishKind::Null => diagnostic_codes::IS_POSSIBLY_NULL,
                    NullishKind::Undefined => diagnostic_codes::IS_POSSIBLY_UNDEFINED,
                    NullishKind::NullOrUndefined => diagnostic_codes::IS_POSSIBLY_NULL_OR_UNDEFINED,
                };
                self.error_at_node_msg(idx, code, &[&name]);
            }
            None => {
                let (message, code) = match kind {
                    NullishKind::Null => (
                        diagnostic_messages::OBJECT_IS_POSSIBLY_NULL,
                        diagnostic_codes::OBJECT_IS_POSSIBLY_NULL,
                    ),
                    NullishKind::Undefined => (
                        diagnostic_messages::OBJECT_IS_POSSIBLY_UNDEFINED,
                        diagnostic_codes::OBJECT_IS_POSSIBLY_UNDEFINED,
                    ),
                    NullishKind::NullOrUndefined => (
                        diagnostic_messages::OBJECT_IS_POSSIBLY_NULL_OR_UNDEFINED,
                        diagnostic_codes::OBJECT_IS_POSSIBLY_NULL_OR_UNDEFINED,
                    ),
                };
                self.error_at_node(idx, message, code);
            }
        }
    }

    /// TS18050: The value '{0}' cannot be used here.
    pub fn error_value_cannot_be_used_at(&mut self, value: &str, idx: NodeIndex) {
        self.error_at_node_msg(idx, diagnostic_codes::THE_VALUE_CANNOT_BE_USED_HERE, &[value]);
    }

    /// TS18046: '{0}' is of type 'unknown'.
    pub fn error_is_of_type_unknown_at(&mut self, idx: NodeIndex) {
        let name = self
            .ctx
            .arena
            .reference_text(idx)
            .unwrap_or_else(|| "Object".to_string());
        self.error_at_node_msg(idx, diagnostic_codes::IS_OF_TYPE_UNKNOWN, &[&name]);
    }

    /// TS2365: Operator '{0}' cannot be applied to types '{1}' and '{2}'.
    pub fn error_operator_not_applicable_at(
        &mut self,
        op: &str,
        left: TypeId,
        right: TypeId,
        idx: NodeIndex,
    ) {
        let left_text = self.format_type(left);
        let right_text = self.format_type(right);
        self.error_at_node_msg(
            idx,
            diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED_TO_TYPES_AND,
            &[op, &left_text, &right_text],
        );
    }

    /// TS2554 / TS2555 for a call supplying `got` arguments.
    pub fn error_argument_count_at(&mut self, shape: &FunctionShape, got: usize, idx: NodeIndex) {
        let min = shape.min_arity();
        let got = got.to_string();
        match shape.max_arity() {
            None => {
                let expected = min.to_string();
                self.error_at_node_msg(
                    idx,
                    diagnostic_codes::EXPECTED_AT_LEAST_ARGUMENTS_BUT_GOT,
                    &[&expected, &got],
                );
            }
            Some(max) => {
                let expected = if min == max {
                    max.to_string()
                } else {
                    format!("{min}-{max}")
                };
                self.error_at_node_msg(
                    idx,
                    diagnostic_codes::EXPECTED_ARGUMENTS_BUT_GOT,
                    &[&expected, &got],
                );
            }
        }
    }

    /// TS2349: This expression is not callable.
    pub fn error_not_callable_at(&mut self, type_id: TypeId, idx: NodeIndex) {
        let type_text = self.format_type(type_id);
        self.error_at_node_msg(
            idx,
            diagnostic_codes::THIS_EXPRESSION_IS_NOT_CALLABLE,
            &[&type_text],
        );
    }

    /// TS7006, only under `noImplicitAny`.
    pub fn maybe_report_implicit_any_parameter(&mut self, name: &str, idx: NodeIndex) {
        if !self.ctx.compiler_options.no_implicit_any {
            return;
        }
        self.error_at_node_msg(
            idx,
            diagnostic_codes::PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE,
            &[name, "any"],
        );
    }

    /// TS2683, only under `noImplicitThis`.
    pub fn maybe_report_implicit_this(&mut self, idx: NodeIndex) {
        if !self.ctx.compiler_options.no_implicit_this {
            return;
        }
        self.error_at_node_msg(
            idx,
            diagnostic_codes::THIS_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_IT_DOES_NOT_HAVE_A_TYPE_ANNOTATION,
            &[],
        );
    }
}
