//! The whole `this`-in-object-literal program: four annotated variables and
//! two calls, every literal sharing the same `moveBy` body.

use thisctx_ast::{AstBuilder, NodeIndex, SyntaxKind};
use thisctx_checker::{CheckerOptions, CheckerState};
use thisctx_common::diagnostics::diagnostic_codes;
use thisctx_solver::{TypeId, TypeInterner};

fn point_alias(b: &mut AstBuilder) -> NodeIndex {
    let number = |b: &mut AstBuilder| b.keyword_type(SyntaxKind::NumberKeyword);
    let t = number(b);
    let x = b.property_signature("x", t, false);
    let t = number(b);
    let y = b.property_signature("y", t, false);
    let t = number(b);
    let z = b.property_signature("z", t, true);
    let t = number(b);
    let dx = b.parameter("dx", t, false, false);
    let t = number(b);
    let dy = b.parameter("dy", t, false, false);
    let t = number(b);
    let dz = b.parameter("dz", t, true, false);
    let void = b.keyword_type(SyntaxKind::VoidKeyword);
    let move_by = b.method_signature("moveBy", vec![dx, dy, dz], void, false);
    let shape = b.type_literal(vec![x, y, z, move_by]);
    b.type_alias("Point", shape)
}

fn add_assign(b: &mut AstBuilder, member: &str, param: &str) -> NodeIndex {
    let this = b.this();
    let target = b.property_access(this, member);
    let value = b.identifier(param);
    let assign = b.binary(target, SyntaxKind::PlusEqualsToken, value);
    b.expression_statement(assign)
}

/// `{ x: 10, y: 20, moveBy(dx, dy, dz) { ... } }`; `guarded` wraps the
/// update of `this.z` in `if (this.z && dz)`.
fn point_literal(b: &mut AstBuilder, guarded: bool) -> (NodeIndex, NodeIndex) {
    let ten = b.number(10.0);
    let x = b.property_assignment("x", ten);
    let twenty = b.number(20.0);
    let y = b.property_assignment("y", twenty);

    let dx = b.param("dx");
    let dy = b.param("dy");
    let dz = b.param("dz");
    let move_x = add_assign(b, "x", "dx");
    let move_y = add_assign(b, "y", "dy");
    let move_z = if guarded {
        let this = b.this();
        let z = b.property_access(this, "z");
        let dz_ref = b.identifier("dz");
        let guard = b.binary(z, SyntaxKind::AmpersandAmpersandToken, dz_ref);
        let update = add_assign(b, "z", "dz");
        let then = b.block(vec![update]);
        b.if_statement(guard, then, NodeIndex::NONE)
    } else {
        add_assign(b, "z", "dz")
    };

    let move_by = b.method("moveBy", vec![dx, dy, dz], vec![move_x, move_y, move_z]);
    (b.object_literal(vec![x, y, move_by]), move_by)
}

/// `Point`, `Point | null`, ... as a type node.
fn point_or(b: &mut AstBuilder, nullish: &[SyntaxKind]) -> NodeIndex {
    let point = b.type_reference("Point");
    if nullish.is_empty() {
        return point;
    }
    let mut members = vec![point];
    members.extend(nullish.iter().map(|&kind| b.keyword_type(kind)));
    b.union_type(members)
}

struct Fixture {
    arena: thisctx_ast::NodeArena,
    root: NodeIndex,
    methods: Vec<NodeIndex>,
}

fn build_fixture(guarded: bool) -> Fixture {
    use SyntaxKind::{NullKeyword as Null, UndefinedKeyword as Undefined};

    let mut b = AstBuilder::new("thisInObjectLiterals.ts");
    let mut statements = vec![point_alias(&mut b)];
    let mut methods = Vec::new();

    let variables: [(&str, &[SyntaxKind]); 4] = [
        ("p1", &[]),
        ("p2", &[Null]),
        ("p3", &[Undefined]),
        ("p4", &[Null, Undefined]),
    ];
    for (name, nullish) in variables {
        let annotation = point_or(&mut b, nullish);
        let (literal, method) = point_literal(&mut b, guarded);
        statements.push(b.variable_statement(name, annotation, literal));
        methods.push(method);
    }

    let functions: [(&str, &[SyntaxKind]); 2] = [("f1", &[]), ("f2", &[Null, Undefined])];
    for (name, nullish) in functions {
        let param_type = point_or(&mut b, nullish);
        let p = b.parameter("p", param_type, false, false);
        let void = b.keyword_type(SyntaxKind::VoidKeyword);
        statements.push(b.declare_function(name, vec![p], void));

        let (literal, method) = point_literal(&mut b, guarded);
        let callee = b.identifier(name);
        let call = b.call(callee, vec![literal]);
        statements.push(b.expression_statement(call));
        methods.push(method);
    }

    let (arena, root) = b.finish(statements);
    Fixture {
        arena,
        root,
        methods,
    }
}

#[test]
fn whole_program_checks_cleanly_under_strict() {
    let fixture = build_fixture(true);
    let types = TypeInterner::new();
    let mut checker = CheckerState::new(
        &fixture.arena,
        &types,
        "thisInObjectLiterals.ts",
        &CheckerOptions::strict(),
    );
    checker.check_source_file(fixture.root);

    assert!(
        checker.diagnostics().is_empty(),
        "unexpected diagnostics: {:#?}",
        checker.diagnostics()
    );
    let point = checker.resolve_type_alias("Point").expect("Point declared");
    for &method in &fixture.methods {
        assert_eq!(checker.receiver_type(method), Some(point));
    }
}

#[test]
fn variables_keep_their_declared_types() {
    let fixture = build_fixture(true);
    let types = TypeInterner::new();
    let mut checker = CheckerState::new(
        &fixture.arena,
        &types,
        "thisInObjectLiterals.ts",
        &CheckerOptions::strict(),
    );
    checker.check_source_file(fixture.root);

    let point = checker.resolve_type_alias("Point").expect("Point declared");
    assert_eq!(checker.global_value_type("p1"), Some(point));
    assert_eq!(
        checker.global_value_type("p2"),
        Some(types.union2(point, TypeId::NULL))
    );
    assert_eq!(
        checker.global_value_type("p3"),
        Some(types.union2(point, TypeId::UNDEFINED))
    );
    assert_eq!(
        checker.global_value_type("p4"),
        Some(types.union(vec![point, TypeId::NULL, TypeId::UNDEFINED]))
    );
}

#[test]
fn whole_program_checks_cleanly_without_strict() {
    let fixture = build_fixture(true);
    let types = TypeInterner::new();
    let mut checker = CheckerState::new(
        &fixture.arena,
        &types,
        "thisInObjectLiterals.ts",
        &CheckerOptions::default(),
    );
    checker.check_source_file(fixture.root);
    assert!(checker.diagnostics().is_empty(), "{:#?}", checker.diagnostics());
}

#[test]
fn unguarded_optional_update_is_possibly_undefined() {
    let fixture = build_fixture(false);
    let types = TypeInterner::new();
    let mut checker = CheckerState::new(
        &fixture.arena,
        &types,
        "thisInObjectLiterals.ts",
        &CheckerOptions::strict(),
    );
    checker.check_source_file(fixture.root);

    // Both operands of `this.z += dz` are optional, in each of the six methods.
    let diagnostics = checker.diagnostics();
    assert_eq!(diagnostics.len(), 12, "{diagnostics:#?}");
    assert!(
        diagnostics
            .iter()
            .all(|d| d.code == diagnostic_codes::IS_POSSIBLY_UNDEFINED)
    );
    assert_eq!(diagnostics[0].message_text, "'this.z' is possibly 'undefined'.");
    assert_eq!(diagnostics[1].message_text, "'dz' is possibly 'undefined'.");
    assert!(diagnostics.windows(2).all(|w| w[0].start < w[1].start));
}

#[test]
fn unguarded_optional_update_is_accepted_without_strict_null_checks() {
    let fixture = build_fixture(false);
    let types = TypeInterner::new();
    let mut checker = CheckerState::new(
        &fixture.arena,
        &types,
        "thisInObjectLiterals.ts",
        &CheckerOptions::default(),
    );
    checker.check_source_file(fixture.root);
    assert!(checker.diagnostics().is_empty(), "{:#?}", checker.diagnostics());
}
