//! Expression type computation.
//!
//! `compute_type_of_node` dispatches on the node kind. Children are always
//! checked through `check_expression` with an explicit contextual type.

use crate::state::CheckerState;
use thisctx_ast::{NodeIndex, SyntaxKind, syntax_kind_ext};
use thisctx_solver::{
    BinaryOpEvaluator, BinaryOpResult, NullishKind, PropertyAccessResult, TypeId,
    binary_operator_text, contextual_type_for, is_arithmetic_operator, nullish_kind,
    resolve_property_access, strip_nullish,
};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Compute the type of an expression (internal, not cached).
    pub(crate) fn compute_type_of_node(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return TypeId::ERROR;
        };

        match node.kind {
            k if k == SyntaxKind::NumericLiteral as u16 => {
                let value = arena
                    .get_literal(node)
                    .and_then(|lit| lit.value.or_else(|| lit.text.parse().ok()));
                value.map_or(TypeId::NUMBER, |value| db.literal_number(value))
            }
            k if k == SyntaxKind::StringLiteral as u16 => arena
                .get_literal(node)
                .map_or(TypeId::STRING, |lit| db.literal_string(&lit.text)),
            k if k == SyntaxKind::TrueKeyword as u16 => db.literal_boolean(true),
            k if k == SyntaxKind::FalseKeyword as u16 => db.literal_boolean(false),
            k if k == SyntaxKind::NullKeyword as u16 => TypeId::NULL,
            k if k == SyntaxKind::ThisKeyword as u16 => self.get_type_of_this(idx),
            k if k == SyntaxKind::Identifier as u16 => self.get_type_of_identifier(idx),

            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => self.get_type_of_property_access(idx),
            syntax_kind_ext::BINARY_EXPRESSION => self.get_type_of_binary_expression(idx),
            syntax_kind_ext::CALL_EXPRESSION => self.check_call_expression(idx),
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION => {
                self.check_object_literal(idx, self.ctx.contextual_type)
            }
            syntax_kind_ext::PARENTHESIZED_EXPRESSION => match arena.get_parenthesized(node) {
                Some(paren) => self.check_expression(paren.expression, self.ctx.contextual_type),
                None => TypeId::ERROR,
            },

            // Unhandled expression kinds stay visible as `unknown`.
            _ => TypeId::UNKNOWN,
        }
    }

    fn get_type_of_identifier(&mut self, idx: NodeIndex) -> TypeId {
        let Some(name) = self.ctx.arena.identifier_text(idx) else {
            return TypeId::ERROR;
        };
        if let Some(narrowed) = self.ctx.lookup_narrowed(name) {
            return narrowed;
        }
        if let Some(type_id) = self.ctx.lookup_value(name) {
            return type_id;
        }
        self.error_cannot_find_name_at(name, idx);
        TypeId::ERROR
    }

    /// `this` is the innermost receiver; outside any method it is `any`.
    fn get_type_of_this(&mut self, idx: NodeIndex) -> TypeId {
        match self.ctx.current_this_type() {
            Some(receiver) => receiver,
            None => {
                self.maybe_report_implicit_this(idx);
                TypeId::ANY
            }
        }
    }

    fn get_type_of_property_access(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(access) = arena.get(idx).and_then(|node| arena.get_access_expr(node)) else {
            return TypeId::ERROR;
        };
        let Some(name) = arena.identifier_text(access.name) else {
            return TypeId::ERROR;
        };

        let object_type = self.check_expression(access.expression, None);
        if let Some(narrowed) = arena
            .reference_text(idx)
            .and_then(|reference| self.ctx.lookup_narrowed(&reference))
        {
            return narrowed;
        }

        match resolve_property_access(db, object_type, db.intern_string(name)) {
            PropertyAccessResult::Success { type_id, .. } => type_id,
            PropertyAccessResult::PropertyNotFound { type_id, .. } => {
                trace!(property = name, on = %self.format_type(type_id), "unresolved member");
                self.error_property_not_exist_at(name, type_id, access.name);
                TypeId::ERROR
            }
            PropertyAccessResult::PossiblyNullOrUndefined {
                property_type,
                cause,
            } => {
                if self.ctx.compiler_options.strict_null_checks {
                    let kind = nullish_kind(db, cause).unwrap_or(NullishKind::NullOrUndefined);
                    self.report_possibly_nullish(access.expression, kind);
                }
                property_type.unwrap_or(TypeId::ERROR)
            }
            PropertyAccessResult::IsUnknown => {
                self.error_is_of_type_unknown_at(access.expression);
                TypeId::ERROR
            }
        }
    }

    fn get_type_of_binary_expression(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let Some(binary) = arena.get(idx).and_then(|node| arena.get_binary_expr(node)) else {
            return TypeId::ERROR;
        };
        let op = binary.operator_token;

        if op == SyntaxKind::EqualsToken as u16 {
            let target = self.check_expression(binary.left, None);
            let contextual = contextual_type_for(db, Some(target));
            return self.check_expression(binary.right, contextual);
        }

        let Some(op_text) = binary_operator_text(op) else {
            self.check_expression(binary.left, None);
            self.check_expression(binary.right, None);
            return TypeId::UNKNOWN;
        };

        let left = self.check_expression(binary.left, None);
        let right = if op == SyntaxKind::AmpersandAmpersandToken as u16 {
            // The right operand only runs when the left one is truthy.
            let narrowed = self.collect_truthy_narrowings(binary.left);
            self.ctx.narrowing_frames.push(narrowed);
            let right = self.check_expression(binary.right, None);
            self.ctx.narrowing_frames.pop();
            right
        } else {
            self.check_expression(binary.right, None)
        };

        if is_arithmetic_operator(op) {
            return self.check_arithmetic_operands(idx, binary.left, left, binary.right, right, op_text);
        }

        match BinaryOpEvaluator::new(db).evaluate(left, right, op_text) {
            BinaryOpResult::Success(result) => result,
            BinaryOpResult::TypeError { left, right } => {
                self.error_operator_not_applicable_at(op_text, left, right, idx);
                TypeId::ERROR
            }
        }
    }

    /// Operands of `+ - * / %` and their compound assignments.
    ///
    /// Under `strictNullChecks` a nullish operand is reported (TS18048 and
    /// friends, or TS18050 for a bare `null`/`undefined`), then the
    /// operator is evaluated on the non-nullish parts.
    fn check_arithmetic_operands(
        &mut self,
        idx: NodeIndex,
        left_idx: NodeIndex,
        left: TypeId,
        right_idx: NodeIndex,
        right: TypeId,
        op_text: &str,
    ) -> TypeId {
        let db = self.ctx.types;
        let strict = self.ctx.compiler_options.strict_null_checks;

        let operand = |this: &mut Self, node: NodeIndex, type_id: TypeId| -> TypeId {
            if type_id.is_error() || type_id.is_any_or_unknown() {
                return type_id;
            }
            let Some(kind) = nullish_kind(db, type_id) else {
                return type_id;
            };
            match strip_nullish(db, type_id) {
                Some(non_nullish) => {
                    if strict {
                        this.report_possibly_nullish(node, kind);
                    }
                    non_nullish
                }
                None if strict => {
                    let value = if kind == NullishKind::Null { "null" } else { "undefined" };
                    this.error_value_cannot_be_used_at(value, node);
                    TypeId::ERROR
                }
                None => TypeId::ANY,
            }
        };
        let left = operand(self, left_idx, left);
        let right = operand(self, right_idx, right);

        match BinaryOpEvaluator::new(db).evaluate(left, right, op_text) {
            BinaryOpResult::Success(result) => result,
            BinaryOpResult::TypeError { left, right } => {
                self.error_operator_not_applicable_at(op_text, left, right, idx);
                TypeId::ERROR
            }
        }
    }
}
