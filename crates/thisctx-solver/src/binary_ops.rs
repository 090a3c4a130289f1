//! Result types of binary and compound-assignment operators.

use crate::db::{TypeDatabase, union_members};
use crate::narrowing::narrow_by_truthiness;
use crate::types::{LiteralValue, TypeId, TypeKey};
use thisctx_ast::SyntaxKind;

/// Result of evaluating a binary operator over operand types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOpResult {
    Success(TypeId),
    /// The operator does not apply to these operands.
    TypeError { left: TypeId, right: TypeId },
}

pub struct BinaryOpEvaluator<'a> {
    db: &'a dyn TypeDatabase,
}

impl<'a> BinaryOpEvaluator<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        BinaryOpEvaluator { db }
    }

    /// Evaluate `left <op> right`, `op` being the operator text.
    pub fn evaluate(&self, left: TypeId, right: TypeId, op: &str) -> BinaryOpResult {
        if left.is_error() || right.is_error() {
            return BinaryOpResult::Success(TypeId::ERROR);
        }
        match op {
            "+" => self.evaluate_plus(left, right),
            "-" | "*" | "/" | "%" => self.evaluate_arithmetic(left, right),
            "&&" => BinaryOpResult::Success(self.db.union2(self.falsy_part(left), right)),
            "||" => BinaryOpResult::Success(
                self.db.union2(narrow_by_truthiness(self.db, left), right),
            ),
            "===" | "!==" => BinaryOpResult::Success(TypeId::BOOLEAN),
            _ => BinaryOpResult::TypeError { left, right },
        }
    }

    fn evaluate_plus(&self, left: TypeId, right: TypeId) -> BinaryOpResult {
        if self.is_string_like(left) || self.is_string_like(right) {
            return BinaryOpResult::Success(TypeId::STRING);
        }
        if left == TypeId::ANY || right == TypeId::ANY {
            return BinaryOpResult::Success(TypeId::ANY);
        }
        if self.is_number_like(left) && self.is_number_like(right) {
            return BinaryOpResult::Success(TypeId::NUMBER);
        }
        BinaryOpResult::TypeError { left, right }
    }

    fn evaluate_arithmetic(&self, left: TypeId, right: TypeId) -> BinaryOpResult {
        let operand_ok = |t: TypeId| t == TypeId::ANY || self.is_number_like(t);
        if operand_ok(left) && operand_ok(right) {
            BinaryOpResult::Success(TypeId::NUMBER)
        } else {
            BinaryOpResult::TypeError { left, right }
        }
    }

    pub fn is_number_like(&self, type_id: TypeId) -> bool {
        if type_id == TypeId::NUMBER || type_id == TypeId::NEVER {
            return true;
        }
        match self.db.lookup(type_id) {
            Some(TypeKey::Literal(LiteralValue::Number(_))) => true,
            Some(TypeKey::Union(_)) => union_members(self.db, type_id)
                .is_some_and(|members| members.iter().all(|&m| self.is_number_like(m))),
            _ => false,
        }
    }

    pub fn is_string_like(&self, type_id: TypeId) -> bool {
        if type_id == TypeId::STRING {
            return true;
        }
        match self.db.lookup(type_id) {
            Some(TypeKey::Literal(LiteralValue::String(_))) => true,
            Some(TypeKey::Union(_)) => union_members(self.db, type_id)
                .is_some_and(|members| members.iter().all(|&m| self.is_string_like(m))),
            _ => false,
        }
    }

    /// Constituents of `type_id` that may be falsy at runtime.
    fn falsy_part(&self, type_id: TypeId) -> TypeId {
        if type_id.is_any_or_unknown() {
            return type_id;
        }
        let members: Vec<TypeId> = match union_members(self.db, type_id) {
            Some(members) => members.to_vec(),
            None => vec![type_id],
        };
        let falsy: Vec<TypeId> = members
            .into_iter()
            .filter(|&m| self.can_be_falsy(m))
            .collect();
        self.db.union(falsy)
    }

    fn can_be_falsy(&self, type_id: TypeId) -> bool {
        match type_id {
            TypeId::NULL | TypeId::UNDEFINED | TypeId::VOID => true,
            TypeId::NUMBER | TypeId::STRING | TypeId::BOOLEAN => true,
            _ => match self.db.lookup(type_id) {
                Some(TypeKey::Literal(LiteralValue::Boolean(b))) => !b,
                Some(TypeKey::Literal(LiteralValue::Number(n))) => n.0 == 0.0 || n.0.is_nan(),
                Some(TypeKey::Literal(LiteralValue::String(atom))) => atom.is_none(),
                _ => false,
            },
        }
    }
}

pub const fn is_compound_assignment_operator(operator_token: u16) -> bool {
    matches!(
        operator_token,
        k if k == SyntaxKind::PlusEqualsToken as u16
            || k == SyntaxKind::MinusEqualsToken as u16
            || k == SyntaxKind::AsteriskEqualsToken as u16
            || k == SyntaxKind::SlashEqualsToken as u16
            || k == SyntaxKind::PercentEqualsToken as u16
    )
}

pub const fn map_compound_assignment_to_binary(operator_token: u16) -> Option<&'static str> {
    match operator_token {
        k if k == SyntaxKind::PlusEqualsToken as u16 => Some("+"),
        k if k == SyntaxKind::MinusEqualsToken as u16 => Some("-"),
        k if k == SyntaxKind::AsteriskEqualsToken as u16 => Some("*"),
        k if k == SyntaxKind::SlashEqualsToken as u16 => Some("/"),
        k if k == SyntaxKind::PercentEqualsToken as u16 => Some("%"),
        _ => None,
    }
}

/// Operator text for a binary operator token.
pub const fn binary_operator_text(operator_token: u16) -> Option<&'static str> {
    match operator_token {
        k if k == SyntaxKind::PlusToken as u16 => Some("+"),
        k if k == SyntaxKind::MinusToken as u16 => Some("-"),
        k if k == SyntaxKind::AsteriskToken as u16 => Some("*"),
        k if k == SyntaxKind::SlashToken as u16 => Some("/"),
        k if k == SyntaxKind::PercentToken as u16 => Some("%"),
        k if k == SyntaxKind::AmpersandAmpersandToken as u16 => Some("&&"),
        k if k == SyntaxKind::BarBarToken as u16 => Some("||"),
        k if k == SyntaxKind::EqualsEqualsEqualsToken as u16 => Some("==="),
        k if k == SyntaxKind::ExclamationEqualsEqualsToken as u16 => Some("!=="),
        _ => map_compound_assignment_to_binary(operator_token),
    }
}

/// Whether `operator_token` requires numeric (or string, for `+`) operands.
pub const fn is_arithmetic_operator(operator_token: u16) -> bool {
    matches!(
        operator_token,
        k if k == SyntaxKind::PlusToken as u16
            || k == SyntaxKind::MinusToken as u16
            || k == SyntaxKind::AsteriskToken as u16
            || k == SyntaxKind::SlashToken as u16
            || k == SyntaxKind::PercentToken as u16
    ) || is_compound_assignment_operator(operator_token)
}

#[cfg(test)]
#[path = "tests/binary_ops_tests.rs"]
mod tests;
