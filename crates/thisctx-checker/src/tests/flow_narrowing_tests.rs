use crate::context::CheckerOptions;
use crate::state::CheckerState;
use thisctx_ast::{AstBuilder, NodeIndex, SyntaxKind};
use thisctx_common::diagnostics::diagnostic_codes;
use thisctx_solver::{TypeId, TypeInterner};

struct BodyResult {
    codes: Vec<u32>,
    /// Types of the watched nodes, in the order the builder returned them.
    watched: Vec<Option<TypeId>>,
    /// `number | undefined`, the declared type of `a` under strict checks.
    optional_number: TypeId,
}

/// Check `{ m(a?: number) { ... } }` under strict options.
///
/// `build` returns the body statements and the nodes to watch.
fn check_method_body(
    build: impl FnOnce(&mut AstBuilder) -> (Vec<NodeIndex>, Vec<NodeIndex>),
) -> BodyResult {
    let mut b = AstBuilder::new("test.ts");
    let num = b.keyword_type(SyntaxKind::NumberKeyword);
    let a = b.parameter("a", num, true, false);
    let (body, watched) = build(&mut b);
    let m = b.method("m", vec![a], body);
    let literal = b.object_literal(vec![m]);
    let stmt = b.expression_statement(literal);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::strict());
    checker.check_source_file(root);

    BodyResult {
        codes: checker.diagnostics().iter().map(|d| d.code).collect(),
        watched: watched.iter().map(|&n| checker.node_type(n)).collect(),
        optional_number: types.union2(TypeId::NUMBER, TypeId::UNDEFINED),
    }
}

#[test]
fn test_guarded_use_is_narrowed() {
    let result = check_method_body(|b| {
        let cond = b.identifier("a");
        let a = b.identifier("a");
        let one = b.number(1.0);
        let sum = b.binary(a, SyntaxKind::PlusToken, one);
        let stmt = b.expression_statement(sum);
        let then = b.block(vec![stmt]);
        (vec![b.if_statement(cond, then, NodeIndex::NONE)], vec![cond, a])
    });
    assert!(result.codes.is_empty(), "unexpected: {:?}", result.codes);
    assert_eq!(
        result.watched,
        vec![Some(result.optional_number), Some(TypeId::NUMBER)]
    );
}

#[test]
fn test_unguarded_use_reports_possibly_undefined() {
    let result = check_method_body(|b| {
        let a = b.identifier("a");
        let one = b.number(1.0);
        let sum = b.binary(a, SyntaxKind::PlusToken, one);
        (vec![b.expression_statement(sum)], vec![sum])
    });
    assert_eq!(result.codes, vec![diagnostic_codes::IS_POSSIBLY_UNDEFINED]);
    // The operator is still evaluated on the non-nullish part.
    assert_eq!(result.watched, vec![Some(TypeId::NUMBER)]);
}

#[test]
fn test_narrowing_does_not_leak_into_else_branch() {
    let result = check_method_body(|b| {
        let cond = b.identifier("a");
        let then = b.block(vec![]);
        let a = b.identifier("a");
        let one = b.number(1.0);
        let diff = b.binary(a, SyntaxKind::MinusToken, one);
        let stmt = b.expression_statement(diff);
        let otherwise = b.block(vec![stmt]);
        (vec![b.if_statement(cond, then, otherwise)], vec![a])
    });
    assert_eq!(result.codes, vec![diagnostic_codes::IS_POSSIBLY_UNDEFINED]);
    assert_eq!(result.watched, vec![Some(result.optional_number)]);
}

#[test]
fn test_right_operand_of_and_sees_left_narrowing() {
    let result = check_method_body(|b| {
        let left = b.identifier("a");
        let a = b.identifier("a");
        let two = b.number(2.0);
        let product = b.binary(a, SyntaxKind::AsteriskToken, two);
        let both = b.binary(left, SyntaxKind::AmpersandAmpersandToken, product);
        (vec![b.expression_statement(both)], vec![a, product])
    });
    assert!(result.codes.is_empty(), "unexpected: {:?}", result.codes);
    assert_eq!(
        result.watched,
        vec![Some(TypeId::NUMBER), Some(TypeId::NUMBER)]
    );
}

#[test]
fn test_bare_undefined_operand_reports_ts18050() {
    let result = check_method_body(|b| {
        let undefined = b.identifier("undefined");
        let one = b.number(1.0);
        let sum = b.binary(undefined, SyntaxKind::PlusToken, one);
        (vec![b.expression_statement(sum)], vec![])
    });
    assert_eq!(
        result.codes,
        vec![diagnostic_codes::THE_VALUE_CANNOT_BE_USED_HERE]
    );
}
