//! Programmatic AST construction.
//!
//! `AstBuilder` stands in for a parser: tests and callers assemble trees
//! bottom-up and the builder assigns source positions. Leaf nodes take the
//! width of their text from a running cursor; composite nodes span their
//! children.
//!
//! ```ignore
//! let mut b = AstBuilder::new("test.ts");
//! let this = b.this();
//! let x = b.property_access(this, "x");
//! let dx = b.identifier("dx");
//! let add = b.binary(x, SyntaxKind::PlusEqualsToken, dx);
//! let stmt = b.expression_statement(add);
//! ```

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::syntax_kind::syntax_kind_ext::*;

pub struct AstBuilder {
    arena: NodeArena,
    file_name: String,
    cursor: u32,
}

impl AstBuilder {
    pub fn new(file_name: impl Into<String>) -> AstBuilder {
        AstBuilder {
            arena: NodeArena::new(),
            file_name: file_name.into(),
            cursor: 0,
        }
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Wrap `statements` in a source file and hand back the arena and root.
    pub fn finish(mut self, statements: Vec<NodeIndex>) -> (NodeArena, NodeIndex) {
        let (pos, end) = self.span_of(&statements);
        let root = self.arena.add_source_file(
            pos,
            end.max(self.cursor),
            SourceFileData {
                statements: NodeList::from_vec(statements),
                file_name: self.file_name,
            },
        );
        (self.arena, root)
    }

    fn advance(&mut self, width: usize) -> (u32, u32) {
        let pos = self.cursor;
        let end = pos + width as u32;
        self.cursor = end + 1;
        (pos, end)
    }

    fn span_of(&self, children: &[NodeIndex]) -> (u32, u32) {
        let mut pos = u32::MAX;
        let mut end = 0;
        for &child in children {
            if let Some(node) = self.arena.get(child) {
                pos = pos.min(node.pos);
                end = end.max(node.end);
            }
        }
        if pos == u32::MAX {
            (self.cursor, self.cursor)
        } else {
            (pos, end)
        }
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    pub fn identifier(&mut self, name: &str) -> NodeIndex {
        let (pos, end) = self.advance(name.len());
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            end,
            IdentifierData {
                escaped_text: name.to_string(),
            },
        )
    }

    pub fn number(&mut self, value: f64) -> NodeIndex {
        let text = value.to_string();
        let (pos, end) = self.advance(text.len());
        self.arena.add_literal(
            SyntaxKind::NumericLiteral as u16,
            pos,
            end,
            LiteralData {
                text,
                value: Some(value),
            },
        )
    }

    pub fn string(&mut self, text: &str) -> NodeIndex {
        let (pos, end) = self.advance(text.len() + 2);
        self.arena.add_literal(
            SyntaxKind::StringLiteral as u16,
            pos,
            end,
            LiteralData {
                text: text.to_string(),
                value: None,
            },
        )
    }

    pub fn boolean(&mut self, value: bool) -> NodeIndex {
        let kind = if value {
            SyntaxKind::TrueKeyword
        } else {
            SyntaxKind::FalseKeyword
        };
        self.token(kind)
    }

    pub fn null(&mut self) -> NodeIndex {
        self.token(SyntaxKind::NullKeyword)
    }

    pub fn this(&mut self) -> NodeIndex {
        self.token(SyntaxKind::ThisKeyword)
    }

    /// A keyword used as a type (`number`, `null`, `undefined`, ...).
    pub fn keyword_type(&mut self, kind: SyntaxKind) -> NodeIndex {
        self.token(kind)
    }

    fn token(&mut self, kind: SyntaxKind) -> NodeIndex {
        let (pos, end) = self.advance(kind.text().len());
        self.arena.add_token(kind as u16, pos, end)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn property_access(&mut self, expression: NodeIndex, name: &str) -> NodeIndex {
        let name = self.identifier(name);
        let (pos, end) = self.span_of(&[expression, name]);
        self.arena.add_access_expr(
            PROPERTY_ACCESS_EXPRESSION,
            pos,
            end,
            AccessExprData { expression, name },
        )
    }

    /// Binary expression, including assignments and compound assignments.
    pub fn binary(&mut self, left: NodeIndex, operator: SyntaxKind, right: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span_of(&[left, right]);
        self.arena.add_binary_expr(
            BINARY_EXPRESSION,
            pos,
            end,
            BinaryExprData {
                left,
                operator_token: operator as u16,
                right,
            },
        )
    }

    pub fn call(&mut self, expression: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        let mut children = vec![expression];
        children.extend_from_slice(&arguments);
        let (pos, end) = self.span_of(&children);
        self.arena.add_call_expr(
            CALL_EXPRESSION,
            pos,
            end,
            CallExprData {
                expression,
                arguments: NodeList::from_vec(arguments),
            },
        )
    }

    pub fn paren(&mut self, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span_of(&[expression]);
        self.arena.add_parenthesized(
            PARENTHESIZED_EXPRESSION,
            pos,
            end,
            ParenthesizedData { expression },
        )
    }

    pub fn object_literal(&mut self, members: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span_of(&members);
        self.arena.add_literal_expr(
            OBJECT_LITERAL_EXPRESSION,
            pos,
            end,
            LiteralExprData {
                elements: NodeList::from_vec(members),
            },
        )
    }

    pub fn property_assignment(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let name = self.identifier(name);
        let (pos, end) = self.span_of(&[name, initializer]);
        self.arena.add_property_assignment(
            PROPERTY_ASSIGNMENT,
            pos,
            end,
            PropertyAssignmentData { name, initializer },
        )
    }

    /// Method with an unannotated return type and a block body.
    pub fn method(
        &mut self,
        name: &str,
        parameters: Vec<NodeIndex>,
        statements: Vec<NodeIndex>,
    ) -> NodeIndex {
        let body = self.block(statements);
        self.method_declaration(name, parameters, NodeIndex::NONE, body)
    }

    pub fn method_declaration(
        &mut self,
        name: &str,
        parameters: Vec<NodeIndex>,
        type_annotation: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        let name = self.identifier(name);
        let mut children = vec![name, type_annotation, body];
        children.extend_from_slice(&parameters);
        let (pos, end) = self.span_of(&children);
        self.arena.add_method_decl(
            METHOD_DECLARATION,
            pos,
            end,
            MethodDeclData {
                name,
                question_token: false,
                parameters: NodeList::from_vec(parameters),
                type_annotation,
                body,
            },
        )
    }

    /// Unannotated, required parameter.
    pub fn param(&mut self, name: &str) -> NodeIndex {
        self.parameter(name, NodeIndex::NONE, false, false)
    }

    pub fn parameter(
        &mut self,
        name: &str,
        type_annotation: NodeIndex,
        optional: bool,
        rest: bool,
    ) -> NodeIndex {
        let name = self.identifier(name);
        let (pos, end) = self.span_of(&[name, type_annotation]);
        self.arena.add_parameter(
            PARAMETER,
            pos,
            end,
            ParameterData {
                dot_dot_dot_token: rest,
                name,
                question_token: optional,
                type_annotation,
                initializer: NodeIndex::NONE,
            },
        )
    }

    // =========================================================================
    // Statements and declarations
    // =========================================================================

    pub fn expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span_of(&[expression]);
        self.arena.add_expr_statement(
            EXPRESSION_STATEMENT,
            pos,
            end,
            ExprStatementData { expression },
        )
    }

    pub fn if_statement(
        &mut self,
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) -> NodeIndex {
        let (pos, end) = self.span_of(&[expression, then_statement, else_statement]);
        self.arena.add_if_statement(
            IF_STATEMENT,
            pos,
            end,
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span_of(&statements);
        self.arena.add_block(
            BLOCK,
            pos,
            end,
            BlockData {
                statements: NodeList::from_vec(statements),
            },
        )
    }

    pub fn return_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span_of(&[expression]);
        self.arena
            .add_return(RETURN_STATEMENT, pos, end, ReturnData { expression })
    }

    /// `let name: type_annotation = initializer;`
    ///
    /// Either `type_annotation` or `initializer` may be `NodeIndex::NONE`.
    pub fn variable_statement(
        &mut self,
        name: &str,
        type_annotation: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let name = self.identifier(name);
        let (pos, end) = self.span_of(&[name, type_annotation, initializer]);
        let declaration = self.arena.add_variable_declaration(
            VARIABLE_DECLARATION,
            pos,
            end,
            VariableDeclarationData {
                name,
                type_annotation,
                initializer,
            },
        );
        self.arena.add_variable(
            VARIABLE_STATEMENT,
            pos,
            end,
            VariableData {
                declarations: NodeList::from_vec(vec![declaration]),
            },
        )
    }

    pub fn type_alias(&mut self, name: &str, type_node: NodeIndex) -> NodeIndex {
        let name = self.identifier(name);
        let (pos, end) = self.span_of(&[name, type_node]);
        self.arena.add_type_alias(
            TYPE_ALIAS_DECLARATION,
            pos,
            end,
            TypeAliasData { name, type_node },
        )
    }

    /// `declare function name(parameters): return_type;`
    pub fn declare_function(
        &mut self,
        name: &str,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        let name = self.identifier(name);
        let mut children = vec![name, return_type];
        children.extend_from_slice(&parameters);
        let (pos, end) = self.span_of(&children);
        self.arena.add_function(
            FUNCTION_DECLARATION,
            pos,
            end,
            FunctionData {
                name,
                parameters: NodeList::from_vec(parameters),
                type_annotation: return_type,
                body: NodeIndex::NONE,
            },
        )
    }

    // =========================================================================
    // Type nodes
    // =========================================================================

    pub fn type_reference(&mut self, name: &str) -> NodeIndex {
        let type_name = self.identifier(name);
        let (pos, end) = self.span_of(&[type_name]);
        self.arena
            .add_type_ref(TYPE_REFERENCE, pos, end, TypeRefData { type_name })
    }

    pub fn union_type(&mut self, types: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span_of(&types);
        self.arena.add_composite_type(
            UNION_TYPE,
            pos,
            end,
            CompositeTypeData {
                types: NodeList::from_vec(types),
            },
        )
    }

    pub fn type_literal(&mut self, members: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span_of(&members);
        self.arena.add_type_literal(
            TYPE_LITERAL,
            pos,
            end,
            TypeLiteralData {
                members: NodeList::from_vec(members),
            },
        )
    }

    pub fn property_signature(
        &mut self,
        name: &str,
        type_annotation: NodeIndex,
        optional: bool,
    ) -> NodeIndex {
        let name = self.identifier(name);
        let (pos, end) = self.span_of(&[name, type_annotation]);
        self.arena.add_signature(
            PROPERTY_SIGNATURE,
            pos,
            end,
            SignatureData {
                name,
                question_token: optional,
                parameters: None,
                type_annotation,
            },
        )
    }

    pub fn method_signature(
        &mut self,
        name: &str,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
        optional: bool,
    ) -> NodeIndex {
        let name = self.identifier(name);
        let mut children = vec![name, return_type];
        children.extend_from_slice(&parameters);
        let (pos, end) = self.span_of(&children);
        self.arena.add_signature(
            METHOD_SIGNATURE,
            pos,
            end,
            SignatureData {
                name,
                question_token: optional,
                parameters: Some(NodeList::from_vec(parameters)),
                type_annotation: return_type,
            },
        )
    }
}
