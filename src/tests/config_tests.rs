use super::*;

#[test]
fn test_parse_boolean_true() {
    let json = r#"{"strict": true}"#;
    let opts: CompilerOptions = serde_json::from_str(json).unwrap();
    assert_eq!(opts.strict, Some(true));
}

#[test]
fn test_parse_string_true() {
    let json = r#"{"strict": "true", "noImplicitAny": "false"}"#;
    let opts: CompilerOptions = serde_json::from_str(json).unwrap();
    assert_eq!(opts.strict, Some(true));
    assert_eq!(opts.no_implicit_any, Some(false));
}

#[test]
fn test_parse_invalid_string() {
    let json = r#"{"strict": "invalid"}"#;
    let result: Result<CompilerOptions, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_strict_sets_defaults_and_explicit_flag_wins() {
    let config = parse_tsconfig(
        r#"{
            // checked with strict defaults
            "compilerOptions": {
                "strict": true,
                "noImplicitThis": false, /* opt out */
            },
        }"#,
    )
    .unwrap();

    let options = config.checker_options();
    assert!(options.strict);
    assert!(options.strict_null_checks);
    assert!(options.no_implicit_any);
    assert!(!options.no_implicit_this);
}

#[test]
fn test_missing_compiler_options_is_loose() {
    let options = parse_tsconfig("{}").unwrap().checker_options();
    assert!(!options.strict);
    assert!(!options.strict_null_checks);
}

#[test]
fn test_comment_markers_inside_strings_are_kept() {
    let stripped = strip_jsonc(r#"{"extends": "./a//b/*c*/.json"} // trailing"#);
    assert_eq!(stripped.trim_end(), r#"{"extends": "./a//b/*c*/.json"}"#);
}

#[test]
fn test_trailing_commas_removed_before_closers_only() {
    assert_eq!(remove_trailing_commas("[1, 2, ]"), "[1, 2 ]");
    assert_eq!(remove_trailing_commas(r#"{"a": ",}"}"#), r#"{"a": ",}"}"#);
}
