//! End-to-end: tsconfig on disk, a built program, `check_program`.

use std::fs;
use tempfile::TempDir;
use thisctx::config::load_checker_options;
use thisctx::{AstBuilder, NodeArena, NodeIndex, SyntaxKind, TypeInterner, check_program};

/// `type Box = { size: number; grow(by?: number): void }` and
/// `let b: Box | undefined = { size: 1, grow(by) { this.size += by; } };`
fn box_program() -> (NodeArena, NodeIndex, NodeIndex) {
    let mut b = AstBuilder::new("box.ts");
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let size = b.property_signature("size", t, false);
    let t = b.keyword_type(SyntaxKind::NumberKeyword);
    let by = b.parameter("by", t, true, false);
    let void = b.keyword_type(SyntaxKind::VoidKeyword);
    let grow = b.method_signature("grow", vec![by], void, false);
    let shape = b.type_literal(vec![size, grow]);
    let alias = b.type_alias("Box", shape);

    let one = b.number(1.0);
    let size = b.property_assignment("size", one);
    let by = b.param("by");
    let this = b.this();
    let target = b.property_access(this, "size");
    let by_ref = b.identifier("by");
    let add = b.binary(target, SyntaxKind::PlusEqualsToken, by_ref);
    let stmt = b.expression_statement(add);
    let grow = b.method("grow", vec![by], vec![stmt]);
    let literal = b.object_literal(vec![size, grow]);

    let box_ref = b.type_reference("Box");
    let undefined = b.keyword_type(SyntaxKind::UndefinedKeyword);
    let annotation = b.union_type(vec![box_ref, undefined]);
    let decl = b.variable_statement("b", annotation, literal);
    let (arena, root) = b.finish(vec![alias, decl]);
    (arena, root, grow)
}

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn strict_config_reports_optional_parameter_in_arithmetic() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "tsconfig.json", r#"{ "compilerOptions": { "strict": true } }"#);
    let options = load_checker_options(&path).unwrap();

    let (arena, root, grow) = box_program();
    let types = TypeInterner::new();
    let result = check_program(&arena, root, &types, &options);

    assert_eq!(result.file_name, "box.ts");
    assert_eq!(result.diagnostics.len(), 1, "{:#?}", result.diagnostics);
    assert_eq!(
        result.diagnostics[0].message_text,
        "'by' is possibly 'undefined'."
    );
    assert!(result.format_diagnostics()[0].contains("error TS18048"));

    let receiver = result.receiver_of(grow).expect("receiver recorded");
    assert_eq!(
        thisctx::TypeFormatter::new(&types).format(receiver),
        "{ size: number; grow(by?: number): void }"
    );
}

#[test]
fn extended_config_can_turn_null_checks_back_off() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "base.json", r#"{ "compilerOptions": { "strict": "true" } }"#);
    let path = write_config(
        &dir,
        "tsconfig.json",
        r#"{
            "extends": "./base",
            "compilerOptions": { "strictNullChecks": false, },
        }"#,
    );
    let options = load_checker_options(&path).unwrap();
    assert!(options.strict);
    assert!(options.no_implicit_any);
    assert!(!options.strict_null_checks);

    let (arena, root, _) = box_program();
    let types = TypeInterner::new();
    let result = check_program(&arena, root, &types, &options);
    assert!(!result.has_errors(), "{:#?}", result.diagnostics);
}

#[test]
fn extends_cycle_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "a.json", r#"{ "extends": "./b.json" }"#);
    let b = write_config(&dir, "b.json", r#"{ "extends": "./a.json" }"#);

    let err = load_checker_options(&b).unwrap_err();
    assert!(format!("{err:#}").contains("cycle"), "{err:#}");
}

#[test]
fn missing_config_reports_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.json");
    let err = load_checker_options(&path).unwrap_err();
    assert!(err.to_string().contains("nope.json"), "{err:#}");
}

#[test]
fn tracing_init_is_idempotent() {
    thisctx::tracing_config::init_tracing();
    thisctx::tracing_config::init_tracing();
    assert_eq!(
        thisctx::tracing_config::LogFormat::parse(" Tree "),
        thisctx::tracing_config::LogFormat::Tree
    );
    assert_eq!(
        thisctx::tracing_config::LogFormat::parse("yaml"),
        thisctx::tracing_config::LogFormat::Text
    );
}
