use super::*;
use crate::intern::TypeInterner;

#[test]
fn test_arithmetic_on_numbers() {
    let interner = TypeInterner::new();
    let eval = BinaryOpEvaluator::new(&interner);
    let one = interner.literal_number(1.0);

    assert_eq!(
        eval.evaluate(TypeId::NUMBER, one, "-"),
        BinaryOpResult::Success(TypeId::NUMBER)
    );
    assert_eq!(
        eval.evaluate(TypeId::NUMBER, TypeId::NUMBER, "+"),
        BinaryOpResult::Success(TypeId::NUMBER)
    );
    assert_eq!(
        eval.evaluate(TypeId::ANY, TypeId::NUMBER, "*"),
        BinaryOpResult::Success(TypeId::NUMBER)
    );
}

#[test]
fn test_plus_with_string_is_string() {
    let interner = TypeInterner::new();
    let eval = BinaryOpEvaluator::new(&interner);

    assert_eq!(
        eval.evaluate(TypeId::STRING, TypeId::NUMBER, "+"),
        BinaryOpResult::Success(TypeId::STRING)
    );
}

#[test]
fn test_arithmetic_rejects_undefined_operand() {
    let interner = TypeInterner::new();
    let eval = BinaryOpEvaluator::new(&interner);
    let opt = interner.union2(TypeId::NUMBER, TypeId::UNDEFINED);

    assert_eq!(
        eval.evaluate(TypeId::NUMBER, opt, "+"),
        BinaryOpResult::TypeError {
            left: TypeId::NUMBER,
            right: opt
        }
    );
}

#[test]
fn test_logical_operators() {
    let interner = TypeInterner::new();
    let eval = BinaryOpEvaluator::new(&interner);
    let opt = interner.union2(TypeId::NUMBER, TypeId::UNDEFINED);

    assert_eq!(
        eval.evaluate(opt, TypeId::STRING, "&&"),
        BinaryOpResult::Success(interner.union(vec![
            TypeId::NUMBER,
            TypeId::UNDEFINED,
            TypeId::STRING
        ]))
    );
    assert_eq!(
        eval.evaluate(opt, TypeId::STRING, "||"),
        BinaryOpResult::Success(interner.union2(TypeId::NUMBER, TypeId::STRING))
    );
}

#[test]
fn test_operator_token_mapping() {
    assert!(is_compound_assignment_operator(SyntaxKind::PlusEqualsToken as u16));
    assert!(!is_compound_assignment_operator(SyntaxKind::PlusToken as u16));
    assert_eq!(
        map_compound_assignment_to_binary(SyntaxKind::PercentEqualsToken as u16),
        Some("%")
    );
    assert_eq!(
        binary_operator_text(SyntaxKind::AmpersandAmpersandToken as u16),
        Some("&&")
    );
    assert!(is_arithmetic_operator(SyntaxKind::MinusEqualsToken as u16));
    assert!(!is_arithmetic_operator(SyntaxKind::BarBarToken as u16));
}
