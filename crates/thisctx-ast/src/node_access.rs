//! NodeArena access methods.
//!
//! Each typed getter checks the node kind before indexing its pool, so a
//! mismatched kind yields `None` instead of reading another pool's data.

use crate::base::NodeIndex;
use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::syntax_kind::syntax_kind_ext::*;

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == SyntaxKind::Identifier as u16 {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data()
            && (node.kind == SyntaxKind::NumericLiteral as u16
                || node.kind == SyntaxKind::StringLiteral as u16)
        {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data() && node.kind == CALL_EXPRESSION {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data() && node.kind == PROPERTY_ACCESS_EXPRESSION {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_parenthesized(&self, node: &Node) -> Option<&ParenthesizedData> {
        if node.has_data() && node.kind == PARENTHESIZED_EXPRESSION {
            self.parenthesized.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_literal_expr(&self, node: &Node) -> Option<&LiteralExprData> {
        if node.has_data() && node.kind == OBJECT_LITERAL_EXPRESSION {
            self.literal_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_property_assignment(&self, node: &Node) -> Option<&PropertyAssignmentData> {
        if node.has_data() && node.kind == PROPERTY_ASSIGNMENT {
            self.property_assignments.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_method_decl(&self, node: &Node) -> Option<&MethodDeclData> {
        if node.has_data() && node.kind == METHOD_DECLARATION {
            self.method_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        if node.has_data() && node.kind == PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_function(&self, node: &Node) -> Option<&FunctionData> {
        if node.has_data() && node.kind == FUNCTION_DECLARATION {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_type_alias(&self, node: &Node) -> Option<&TypeAliasData> {
        if node.has_data() && node.kind == TYPE_ALIAS_DECLARATION {
            self.type_aliases.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_variable(&self, node: &Node) -> Option<&VariableData> {
        if node.has_data() && node.kind == VARIABLE_STATEMENT {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        if node.has_data() && node.kind == VARIABLE_DECLARATION {
            self.variable_declarations.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_expression_statement(&self, node: &Node) -> Option<&ExprStatementData> {
        if node.has_data() && node.kind == EXPRESSION_STATEMENT {
            self.expr_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_if_statement(&self, node: &Node) -> Option<&IfStatementData> {
        if node.has_data() && node.kind == IF_STATEMENT {
            self.if_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_return_statement(&self, node: &Node) -> Option<&ReturnData> {
        if node.has_data() && node.kind == RETURN_STATEMENT {
            self.return_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_type_ref(&self, node: &Node) -> Option<&TypeRefData> {
        if node.has_data() && node.kind == TYPE_REFERENCE {
            self.type_refs.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_composite_type(&self, node: &Node) -> Option<&CompositeTypeData> {
        if node.has_data() && node.kind == UNION_TYPE {
            self.composite_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_type_literal(&self, node: &Node) -> Option<&TypeLiteralData> {
        if node.has_data() && node.kind == TYPE_LITERAL {
            self.type_literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_signature(&self, node: &Node) -> Option<&SignatureData> {
        if node.has_data() && (node.kind == PROPERTY_SIGNATURE || node.kind == METHOD_SIGNATURE) {
            self.signatures.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_source_file(&self, node: &Node) -> Option<&SourceFileData> {
        if node.has_data() && node.kind == SOURCE_FILE {
            self.source_files.get(node.data_index as usize)
        } else {
            None
        }
    }

    // =========================================================================
    // Convenience helpers
    // =========================================================================

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|data| data.escaped_text.as_str())
    }

    /// Name text of a property assignment, method, or signature node.
    pub fn member_name(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let name = if let Some(prop) = self.get_property_assignment(node) {
            prop.name
        } else if let Some(method) = self.get_method_decl(node) {
            method.name
        } else if let Some(sig) = self.get_signature(node) {
            sig.name
        } else {
            return None;
        };
        self.identifier_text(name)
    }

    /// Kind of a node, or `Unknown` for `NodeIndex::NONE`.
    pub fn kind_of(&self, index: NodeIndex) -> u16 {
        self.get(index)
            .map_or(SyntaxKind::Unknown as u16, |node| node.kind)
    }

    /// Source text for simple reference expressions (`a`, `this`, `this.z`).
    ///
    /// Used to name the operand in diagnostics.
    pub fn reference_text(&self, index: NodeIndex) -> Option<String> {
        let node = self.get(index)?;
        if node.kind == SyntaxKind::ThisKeyword as u16 {
            return Some("this".to_string());
        }
        if let Some(ident) = self.get_identifier(node) {
            return Some(ident.escaped_text.clone());
        }
        if let Some(access) = self.get_access_expr(node) {
            let object = self.reference_text(access.expression)?;
            let name = self.identifier_text(access.name)?;
            return Some(format!("{object}.{name}"));
        }
        if let Some(paren) = self.get_parenthesized(node) {
            return self.reference_text(paren.expression);
        }
        None
    }
}
