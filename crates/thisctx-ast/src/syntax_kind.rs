//! Token and node kinds.
//!
//! `SyntaxKind` covers tokens and keywords. Composite node kinds live in
//! `syntax_kind_ext` as plain `u16` constants above the token range, so a
//! `Node::kind` can hold either.

use serde::{Deserialize, Serialize};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,
    NumericLiteral,
    StringLiteral,
    Identifier,

    // Punctuation
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandAmpersandToken,
    BarBarToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,

    // Keywords
    NullKeyword,
    ThisKeyword,
    TrueKeyword,
    FalseKeyword,

    // Type keywords
    AnyKeyword,
    UnknownKeyword,
    NeverKeyword,
    VoidKeyword,
    UndefinedKeyword,
    BooleanKeyword,
    NumberKeyword,
    StringKeyword,
}

impl SyntaxKind {
    pub fn is_compound_assignment(self) -> bool {
        matches!(
            self,
            SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
        )
    }

    pub fn is_assignment(self) -> bool {
        self == SyntaxKind::EqualsToken || self.is_compound_assignment()
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::SlashToken
                | SyntaxKind::PercentToken
        )
    }

    /// `+=` → `+`, other kinds map to themselves.
    pub fn compound_to_binary(self) -> SyntaxKind {
        match self {
            SyntaxKind::PlusEqualsToken => SyntaxKind::PlusToken,
            SyntaxKind::MinusEqualsToken => SyntaxKind::MinusToken,
            SyntaxKind::AsteriskEqualsToken => SyntaxKind::AsteriskToken,
            SyntaxKind::SlashEqualsToken => SyntaxKind::SlashToken,
            SyntaxKind::PercentEqualsToken => SyntaxKind::PercentToken,
            other => other,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::UnknownKeyword => "unknown",
            SyntaxKind::NeverKeyword => "never",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::UndefinedKeyword => "undefined",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::NumberKeyword => "number",
            SyntaxKind::StringKeyword => "string",
            _ => "",
        }
    }

    /// Map a raw `u16` back to a token kind. Node kinds return `None`.
    pub fn from_u16(value: u16) -> Option<SyntaxKind> {
        const ALL: &[SyntaxKind] = &[
            SyntaxKind::Unknown,
            SyntaxKind::EndOfFileToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::StringLiteral,
            SyntaxKind::Identifier,
            SyntaxKind::PlusToken,
            SyntaxKind::MinusToken,
            SyntaxKind::AsteriskToken,
            SyntaxKind::SlashToken,
            SyntaxKind::PercentToken,
            SyntaxKind::AmpersandAmpersandToken,
            SyntaxKind::BarBarToken,
            SyntaxKind::EqualsToken,
            SyntaxKind::PlusEqualsToken,
            SyntaxKind::MinusEqualsToken,
            SyntaxKind::AsteriskEqualsToken,
            SyntaxKind::SlashEqualsToken,
            SyntaxKind::PercentEqualsToken,
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::NullKeyword,
            SyntaxKind::ThisKeyword,
            SyntaxKind::TrueKeyword,
            SyntaxKind::FalseKeyword,
            SyntaxKind::AnyKeyword,
            SyntaxKind::UnknownKeyword,
            SyntaxKind::NeverKeyword,
            SyntaxKind::VoidKeyword,
            SyntaxKind::UndefinedKeyword,
            SyntaxKind::BooleanKeyword,
            SyntaxKind::NumberKeyword,
            SyntaxKind::StringKeyword,
        ];
        ALL.get(value as usize).copied()
    }
}

/// Node kinds that are not tokens.
pub mod syntax_kind_ext {
    const BASE: u16 = 200;

    pub const SOURCE_FILE: u16 = BASE;

    // Declarations and statements
    pub const TYPE_ALIAS_DECLARATION: u16 = BASE + 1;
    pub const FUNCTION_DECLARATION: u16 = BASE + 2;
    pub const VARIABLE_STATEMENT: u16 = BASE + 3;
    pub const VARIABLE_DECLARATION: u16 = BASE + 4;
    pub const EXPRESSION_STATEMENT: u16 = BASE + 5;
    pub const IF_STATEMENT: u16 = BASE + 6;
    pub const BLOCK: u16 = BASE + 7;
    pub const RETURN_STATEMENT: u16 = BASE + 8;

    // Expressions
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = BASE + 20;
    pub const BINARY_EXPRESSION: u16 = BASE + 21;
    pub const CALL_EXPRESSION: u16 = BASE + 22;
    pub const OBJECT_LITERAL_EXPRESSION: u16 = BASE + 23;
    pub const PARENTHESIZED_EXPRESSION: u16 = BASE + 24;

    // Object literal members and signatures
    pub const PROPERTY_ASSIGNMENT: u16 = BASE + 40;
    pub const METHOD_DECLARATION: u16 = BASE + 41;
    pub const PARAMETER: u16 = BASE + 42;

    // Type nodes
    pub const TYPE_REFERENCE: u16 = BASE + 60;
    pub const UNION_TYPE: u16 = BASE + 61;
    pub const TYPE_LITERAL: u16 = BASE + 62;
    pub const PROPERTY_SIGNATURE: u16 = BASE + 63;
    pub const METHOD_SIGNATURE: u16 = BASE + 64;
}
