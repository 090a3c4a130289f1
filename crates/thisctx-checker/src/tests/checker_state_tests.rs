use crate::context::CheckerOptions;
use crate::state::CheckerState;
use thisctx_ast::{AstBuilder, NodeIndex, SyntaxKind};
use thisctx_common::diagnostics::diagnostic_codes;
use thisctx_solver::{TypeId, TypeInterner};

fn codes(checker: &CheckerState<'_>) -> Vec<u32> {
    checker.diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn test_strict_defaults_enable_all_flags() {
    let options = CheckerOptions {
        strict: true,
        ..Default::default()
    }
    .apply_strict_defaults();
    assert!(options.strict_null_checks);
    assert!(options.no_implicit_this);
    assert!(options.no_implicit_any);

    let loose = CheckerOptions::default().apply_strict_defaults();
    assert!(!loose.strict_null_checks);
}

#[test]
fn test_explicit_flag_under_strict_is_respected() {
    // `grow(by?: number)` on a contextual type, `this.size += by` in the body.
    let mut b = AstBuilder::new("test.ts");
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let size = b.property_signature("size", t, false);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let by = b.parameter("by", t, true, false);
    let void = b.keyword_type(SyntaxKind::VoidKeyword);
    let grow = b.method_signature("grow", vec![by], void, false);
    let shape = b.type_literal(vec![size, grow]);
    let alias = b.type_alias("Box", shape);

    let zero = b.number(0.0);
    let size = b.property_assignment("size", zero);
    let by = b.param("by");
    let this = b.this();
    let target = b.property_access(this, "size");
    let by_ref = b.identifier("by");
    let add = b.binary(target, SyntaxKind::PlusEqualsToken, by_ref);
    let stmt = b.expression_statement(add);
    let grow = b.method("grow", vec![by], vec![stmt]);
    let literal = b.object_literal(vec![size, grow]);
    let annotation = b.type_reference("Box");
    let decl = b.variable_statement("b", annotation, literal);
    let (arena, root) = b.finish(vec![alias, decl]);

    let types = TypeInterner::new();
    let options = CheckerOptions {
        strict: true,
        strict_null_checks: false,
        no_implicit_this: true,
        no_implicit_any: true,
    };
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &options);
    checker.check_source_file(root);
    assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());

    let mut strict = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::strict());
    strict.check_source_file(root);
    assert_eq!(
        codes(&strict),
        vec![diagnostic_codes::IS_POSSIBLY_UNDEFINED]
    );
}

#[test]
fn test_literal_without_context_uses_own_type_as_receiver() {
    let mut b = AstBuilder::new("test.ts");
    let one = b.number(1.0);
    let a = b.property_assignment("a", one);
    let this = b.this();
    let read = b.property_access(this, "a");
    let ret = b.return_statement(read);
    let get = b.method("get", vec![], vec![ret]);
    let literal = b.object_literal(vec![a, get]);
    let stmt = b.variable_statement("o", NodeIndex::NONE, literal);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::default());
    checker.check_source_file(root);

    assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
    let receiver = checker.receiver_type(get).expect("receiver recorded");
    assert_eq!(checker.format_type(receiver), "{ a: number; get(): any }");
    let o = checker.global_value_type("o").expect("o is bound");
    assert_eq!(checker.format_type(o), "{ a: number; get(): number }");
    assert_eq!(checker.node_type(read), Some(TypeId::NUMBER));
}

#[test]
fn test_duplicate_literal_member_reports_ts1117_and_later_wins() {
    let mut b = AstBuilder::new("test.ts");
    let one = b.number(1.0);
    let first = b.property_assignment("a", one);
    let text = b.string("s");
    let second = b.property_assignment("a", text);
    let literal = b.object_literal(vec![first, second]);
    let stmt = b.expression_statement(literal);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::default());
    checker.check_source_file(root);

    assert_eq!(
        codes(&checker),
        vec![diagnostic_codes::AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME]
    );
    let ty = checker.node_type(literal).expect("literal typed");
    assert_eq!(checker.format_type(ty), "{ a: string }");
}

#[test]
fn test_this_outside_method_is_implicit_any() {
    let mut b = AstBuilder::new("test.ts");
    let this = b.this();
    let stmt = b.expression_statement(this);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut loose = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::default());
    loose.check_source_file(root);
    assert!(loose.diagnostics().is_empty());
    assert_eq!(loose.node_type(this), Some(TypeId::ANY));

    let mut strict = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::strict());
    strict.check_source_file(root);
    assert_eq!(
        codes(&strict),
        vec![diagnostic_codes::THIS_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_IT_DOES_NOT_HAVE_A_TYPE_ANNOTATION]
    );
}

#[test]
fn test_unannotated_parameter_without_context_is_implicit_any() {
    let mut b = AstBuilder::new("test.ts");
    let p = b.param("p");
    let m = b.method("m", vec![p], vec![]);
    let literal = b.object_literal(vec![m]);
    let stmt = b.expression_statement(literal);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::strict());
    checker.check_source_file(root);

    assert_eq!(
        codes(&checker),
        vec![diagnostic_codes::PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE]
    );
    assert_eq!(
        checker.diagnostics()[0].message_text,
        "Parameter 'p' implicitly has an 'any' type."
    );
}

#[test]
fn test_initializer_contextual_type_strips_nullish() {
    let mut b = AstBuilder::new("test.ts");
    let num = b.keyword_type(SyntaxKind::NumberKeyword);
    let x = b.property_signature("x", num, false);
    let shape = b.type_literal(vec![x]);
    let this = b.this();
    let read = b.property_access(this, "x");
    let stmt = b.expression_statement(read);
    let m = b.method("m", vec![], vec![stmt]);
    let literal = b.object_literal(vec![m]);
    let (arena, _root) = b.finish(vec![]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::strict());
    let declared = checker.lower_type_node(shape);
    let nullable = types.union(vec![declared, TypeId::NULL, TypeId::UNDEFINED]);

    checker.check_initializer(literal, Some(nullable));

    assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
    assert_eq!(checker.receiver_type(m), Some(declared));
    assert_eq!(checker.node_type(read), Some(TypeId::NUMBER));
}

#[test]
fn test_method_return_type_is_inferred_and_widened() {
    let mut b = AstBuilder::new("test.ts");
    let yes = b.boolean(true);
    let ret = b.return_statement(yes);
    let m = b.method("ok", vec![], vec![ret]);
    let empty = b.method("nothing", vec![], vec![]);
    let literal = b.object_literal(vec![m, empty]);
    let stmt = b.expression_statement(literal);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::default());
    checker.check_source_file(root);

    let ty = checker.node_type(literal).expect("literal typed");
    assert_eq!(checker.format_type(ty), "{ ok(): boolean; nothing(): void }");
}

#[test]
fn test_unknown_identifier_reports_ts2304() {
    let mut b = AstBuilder::new("test.ts");
    let missing = b.identifier("missing");
    let stmt = b.expression_statement(missing);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::default());
    checker.check_source_file(root);

    assert_eq!(codes(&checker), vec![diagnostic_codes::CANNOT_FIND_NAME]);
    assert_eq!(
        checker.diagnostics()[0].message_text,
        "Cannot find name 'missing'."
    );
    assert_eq!(checker.node_type(missing), Some(TypeId::ERROR));
}

#[test]
fn test_take_diagnostics_drains() {
    let mut b = AstBuilder::new("test.ts");
    let missing = b.identifier("missing");
    let stmt = b.expression_statement(missing);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "test.ts", &CheckerOptions::default());
    checker.check_source_file(root);

    let taken = checker.take_diagnostics();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].file, "test.ts");
    assert!(checker.diagnostics().is_empty());
}
