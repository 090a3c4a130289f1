//! Receiver typing of object-literal methods under the different ways a
//! literal can receive (or not receive) a contextual type.

use thisctx_ast::{AstBuilder, NodeIndex, SyntaxKind};
use thisctx_checker::{CheckerOptions, CheckerState};
use thisctx_common::diagnostics::diagnostic_codes;
use thisctx_solver::{TypeDatabase, TypeId, TypeInterner, object_shape_of};

/// `type Point = { x: number; y: number; z?: number; moveBy(dx: number, dy: number, dz?: number): void }`
fn point_alias(b: &mut AstBuilder) -> NodeIndex {
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let x = b.property_signature("x", t, false);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let y = b.property_signature("y", t, false);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let z = b.property_signature("z", t, true);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let dx = b.parameter("dx", t, false, false);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let dy = b.parameter("dy", t, false, false);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let dz = b.parameter("dz", t, true, false);
    let void = b.keyword_type(SyntaxKind::VoidKeyword);
    let move_by = b.method_signature("moveBy", vec![dx, dy, dz], void, false);
    let shape = b.type_literal(vec![x, y, z, move_by]);
    b.type_alias("Point", shape)
}

/// `this.<member> += <param>;`
fn add_assign(b: &mut AstBuilder, member: &str, param: &str) -> NodeIndex {
    let this = b.this();
    let target = b.property_access(this, member);
    let value = b.identifier(param);
    let assign = b.binary(target, SyntaxKind::PlusEqualsToken, value);
    b.expression_statement(assign)
}

/// The literal and its `moveBy` method:
///
/// ```typescript
/// {
///     x: 10,
///     y: 20,
///     moveBy(dx, dy, dz) {
///         this.x += dx;
///         this.y += dy;
///         if (this.z && dz) {
///             this.z += dz;
///         }
///     }
/// }
/// ```
fn point_literal(b: &mut AstBuilder) -> (NodeIndex, NodeIndex) {
    let ten = b.number(10.0);
    let x = b.property_assignment("x", ten);
    let twenty = b.number(20.0);
    let y = b.property_assignment("y", twenty);

    let dx = b.param("dx");
    let dy = b.param("dy");
    let dz = b.param("dz");
    let move_x = add_assign(b, "x", "dx");
    let move_y = add_assign(b, "y", "dy");

    let this = b.this();
    let z = b.property_access(this, "z");
    let dz_ref = b.identifier("dz");
    let guard = b.binary(z, SyntaxKind::AmpersandAmpersandToken, dz_ref);
    let move_z = add_assign(b, "z", "dz");
    let then = b.block(vec![move_z]);
    let guarded = b.if_statement(guard, then, NodeIndex::NONE);

    let move_by = b.method("moveBy", vec![dx, dy, dz], vec![move_x, move_y, guarded]);
    let literal = b.object_literal(vec![x, y, move_by]);
    (literal, move_by)
}

struct Checked {
    types: TypeInterner,
    codes: Vec<u32>,
    receiver: Option<TypeId>,
    point: Option<TypeId>,
    literal_type: Option<TypeId>,
}

fn member_names(db: &dyn TypeDatabase, type_id: TypeId) -> Vec<(String, bool)> {
    object_shape_of(db, type_id)
        .map(|shape| {
            shape
                .properties
                .iter()
                .map(|p| (db.resolve_atom(p.name), p.optional))
                .collect()
        })
        .unwrap_or_default()
}

/// Check `let p: <annotation> = <literal>;` after `type Point = ...`.
fn check_declaration(annotation: impl FnOnce(&mut AstBuilder) -> NodeIndex) -> Checked {
    let mut b = AstBuilder::new("scenario.ts");
    let alias = point_alias(&mut b);
    let type_node = annotation(&mut b);
    let (literal, method) = point_literal(&mut b);
    let decl = b.variable_statement("p", type_node, literal);
    let (arena, root) = b.finish(vec![alias, decl]);

    let types = TypeInterner::new();
    let (codes, receiver, point, literal_type) = {
        let mut checker =
            CheckerState::new(&arena, &types, "scenario.ts", &CheckerOptions::strict());
        checker.check_source_file(root);
        (
            checker.diagnostics().iter().map(|d| d.code).collect(),
            checker.receiver_type(method),
            checker.resolve_type_alias("Point"),
            checker.node_type(literal),
        )
    };
    Checked {
        types,
        codes,
        receiver,
        point,
        literal_type,
    }
}

fn assert_receiver_is_point(checked: &Checked) {
    assert!(checked.codes.is_empty(), "unexpected diagnostics: {:?}", checked.codes);
    let point = checked.point.expect("Point resolves");
    assert_eq!(checked.receiver, Some(point));
    assert_eq!(
        member_names(&checked.types, point),
        vec![
            ("x".to_string(), false),
            ("y".to_string(), false),
            ("z".to_string(), true),
            ("moveBy".to_string(), false),
        ]
    );
    // The literal keeps its own shape; the contextual type does not leak into it.
    let literal_type = checked.literal_type.expect("literal typed");
    assert_eq!(
        member_names(&checked.types, literal_type),
        vec![
            ("x".to_string(), false),
            ("y".to_string(), false),
            ("moveBy".to_string(), false),
        ]
    );
}

#[test]
fn annotated_point_is_the_receiver() {
    let checked = check_declaration(|b| b.type_reference("Point"));
    assert_receiver_is_point(&checked);
}

#[test]
fn point_or_null_strips_to_point() {
    let checked = check_declaration(|b| {
        let point = b.type_reference("Point");
        let null = b.keyword_type(SyntaxKind::NullKeyword);
        b.union_type(vec![point, null])
    });
    assert_receiver_is_point(&checked);
}

#[test]
fn point_or_null_or_undefined_strips_to_point() {
    let checked = check_declaration(|b| {
        let point = b.type_reference("Point");
        let null = b.keyword_type(SyntaxKind::NullKeyword);
        let undefined = b.keyword_type(SyntaxKind::UndefinedKeyword);
        b.union_type(vec![point, null, undefined])
    });
    assert_receiver_is_point(&checked);
}

#[test]
fn argument_of_point_parameter_is_contextualized() {
    let mut b = AstBuilder::new("scenario.ts");
    let alias = point_alias(&mut b);
    let point_ref = b.type_reference("Point");
    let p = b.parameter("p", point_ref, false, false);
    let void = b.keyword_type(SyntaxKind::VoidKeyword);
    let f1 = b.declare_function("f1", vec![p], void);
    let (literal, method) = point_literal(&mut b);
    let callee = b.identifier("f1");
    let call = b.call(callee, vec![literal]);
    let stmt = b.expression_statement(call);
    let (arena, root) = b.finish(vec![alias, f1, stmt]);

    let types = TypeInterner::new();
    let mut checker = CheckerState::new(&arena, &types, "scenario.ts", &CheckerOptions::strict());
    checker.check_source_file(root);

    assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
    assert_eq!(
        checker.receiver_type(method),
        checker.resolve_type_alias("Point")
    );
    assert_eq!(checker.node_type(call), Some(TypeId::VOID));
}

#[test]
fn no_annotation_uses_literal_type_and_z_is_unresolved() {
    let checked = check_declaration(|_| NodeIndex::NONE);

    let receiver = checked.receiver.expect("receiver recorded");
    assert_eq!(
        member_names(&checked.types, receiver),
        vec![
            ("x".to_string(), false),
            ("y".to_string(), false),
            ("moveBy".to_string(), false),
        ]
    );
    // `this.z` is read twice and written once; each access is reported.
    // dx, dy and dz have no contextual signature and fall back to `any`.
    let unresolved = checked
        .codes
        .iter()
        .filter(|&&c| c == diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE)
        .count();
    assert_eq!(unresolved, 2);
    let implicit_any = checked
        .codes
        .iter()
        .filter(|&&c| c == diagnostic_codes::PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE)
        .count();
    assert_eq!(implicit_any, 3);
}

#[test]
fn unresolved_member_message_names_the_receiver() {
    let mut b = AstBuilder::new("scenario.ts");
    let (literal, _) = point_literal(&mut b);
    let stmt = b.variable_statement("p", NodeIndex::NONE, literal);
    let (arena, root) = b.finish(vec![stmt]);

    let types = TypeInterner::new();
    let mut checker =
        CheckerState::new(&arena, &types, "scenario.ts", &CheckerOptions::default());
    checker.check_source_file(root);

    let messages: Vec<&str> = checker
        .diagnostics()
        .iter()
        .map(|d| d.message_text.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Property 'z' does not exist on type '{ x: number; y: number; moveBy(dx: any, dy: any, dz: any): void }'.",
            "Property 'z' does not exist on type '{ x: number; y: number; moveBy(dx: any, dy: any, dz: any): void }'.",
        ]
    );
}

#[test]
fn contextual_parameter_types_come_from_the_signature() {
    let mut b = AstBuilder::new("scenario.ts");
    let alias = point_alias(&mut b);
    let point_ref = b.type_reference("Point");
    let (literal, method) = point_literal(&mut b);
    let decl = b.variable_statement("p", point_ref, literal);
    let (arena, root) = b.finish(vec![alias, decl]);

    let types = TypeInterner::new();
    let mut checker =
        CheckerState::new(&arena, &types, "scenario.ts", &CheckerOptions::strict());
    checker.check_source_file(root);

    let literal_type = checker.node_type(literal).expect("literal typed");
    assert_eq!(
        checker.format_type(literal_type),
        "{ x: number; y: number; moveBy(dx: number, dy: number, dz?: number): void }"
    );
    let receiver = checker.receiver_type(method).expect("receiver recorded");
    assert_eq!(
        checker.format_type(receiver),
        "{ x: number; y: number; z?: number; moveBy(dx: number, dy: number, dz?: number): void }"
    );
}
