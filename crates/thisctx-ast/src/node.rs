//! Thin node headers and typed data pools.
//!
//! Each `Node` is a 16-byte header (kind, flags, pos, end, data index).
//! Per-kind payloads live in separate `Vec`s inside `NodeArena`, and
//! `data_index` points into the pool selected by `kind`.
//!
//! Nodes are created bottom-up: children always exist before their parent.

use crate::base::{NodeIndex, NodeList};
use serde::{Deserialize, Serialize};

#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Node {
    /// `SyntaxKind` value or a `syntax_kind_ext` constant.
    pub kind: u16,
    pub flags: u16,
    pub pos: u32,
    pub end: u32,
    /// Index into the pool for `kind` (`NO_DATA` for bare tokens).
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for string and numeric literals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralData {
    pub text: String,
    /// For numeric literals only
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16, // SyntaxKind
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// Data for object literals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for methods defined inside object literals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodDeclData {
    pub name: NodeIndex,
    pub question_token: bool,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for function declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeAliasData {
    pub name: NodeIndex,
    pub type_node: NodeIndex,
}

/// Data for variable statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
}

/// Data for union types
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

/// Data for property and method signatures.
/// `parameters` is `None` for property signatures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureData {
    pub name: NodeIndex,
    pub question_token: bool,
    pub parameters: Option<NodeList>,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub file_name: String,
}

// =============================================================================
// Thin Node Arena
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,

    // Expressions
    pub binary_exprs: Vec<BinaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub literal_exprs: Vec<LiteralExprData>,

    // Object literal members
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub method_decls: Vec<MethodDeclData>,
    pub parameters: Vec<ParameterData>,

    // Declarations and statements
    pub functions: Vec<FunctionData>,
    pub type_aliases: Vec<TypeAliasData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub blocks: Vec<BlockData>,
    pub return_data: Vec<ReturnData>,

    // Types
    pub type_refs: Vec<TypeRefData>,
    pub composite_types: Vec<CompositeTypeData>,
    pub type_literals: Vec<TypeLiteralData>,
    pub signatures: Vec<SignatureData>,

    pub source_files: Vec<SourceFileData>,
}

/// Push `data` into `$pool`, add a header pointing at it and return the index.
macro_rules! push_node {
    ($self:ident, $pool:ident, $kind:expr, $pos:expr, $end:expr, $data:expr) => {{
        let data_index = $self.$pool.len() as u32;
        $self.$pool.push($data);
        let index = $self.nodes.len() as u32;
        $self
            .nodes
            .push(Node::with_data($kind, $pos, $end, data_index));
        NodeIndex(index)
    }};
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a token node (no additional data)
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new(kind, pos, end));
        NodeIndex(index)
    }

    pub fn add_identifier(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: IdentifierData,
    ) -> NodeIndex {
        push_node!(self, identifiers, kind, pos, end, data)
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        push_node!(self, literals, kind, pos, end, data)
    }

    pub fn add_binary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: BinaryExprData,
    ) -> NodeIndex {
        push_node!(self, binary_exprs, kind, pos, end, data)
    }

    pub fn add_call_expr(&mut self, kind: u16, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        push_node!(self, call_exprs, kind, pos, end, data)
    }

    pub fn add_access_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: AccessExprData,
    ) -> NodeIndex {
        push_node!(self, access_exprs, kind, pos, end, data)
    }

    pub fn add_parenthesized(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ParenthesizedData,
    ) -> NodeIndex {
        push_node!(self, parenthesized, kind, pos, end, data)
    }

    pub fn add_literal_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: LiteralExprData,
    ) -> NodeIndex {
        push_node!(self, literal_exprs, kind, pos, end, data)
    }

    pub fn add_property_assignment(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: PropertyAssignmentData,
    ) -> NodeIndex {
        push_node!(self, property_assignments, kind, pos, end, data)
    }

    pub fn add_method_decl(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: MethodDeclData,
    ) -> NodeIndex {
        push_node!(self, method_decls, kind, pos, end, data)
    }

    pub fn add_parameter(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ParameterData,
    ) -> NodeIndex {
        push_node!(self, parameters, kind, pos, end, data)
    }

    pub fn add_function(&mut self, kind: u16, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        push_node!(self, functions, kind, pos, end, data)
    }

    pub fn add_type_alias(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TypeAliasData,
    ) -> NodeIndex {
        push_node!(self, type_aliases, kind, pos, end, data)
    }

    pub fn add_variable(&mut self, kind: u16, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        push_node!(self, variables, kind, pos, end, data)
    }

    pub fn add_variable_declaration(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        push_node!(self, variable_declarations, kind, pos, end, data)
    }

    pub fn add_expr_statement(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ExprStatementData,
    ) -> NodeIndex {
        push_node!(self, expr_statements, kind, pos, end, data)
    }

    pub fn add_if_statement(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: IfStatementData,
    ) -> NodeIndex {
        push_node!(self, if_statements, kind, pos, end, data)
    }

    pub fn add_block(&mut self, kind: u16, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        push_node!(self, blocks, kind, pos, end, data)
    }

    pub fn add_return(&mut self, kind: u16, pos: u32, end: u32, data: ReturnData) -> NodeIndex {
        push_node!(self, return_data, kind, pos, end, data)
    }

    pub fn add_type_ref(&mut self, kind: u16, pos: u32, end: u32, data: TypeRefData) -> NodeIndex {
        push_node!(self, type_refs, kind, pos, end, data)
    }

    pub fn add_composite_type(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: CompositeTypeData,
    ) -> NodeIndex {
        push_node!(self, composite_types, kind, pos, end, data)
    }

    pub fn add_type_literal(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TypeLiteralData,
    ) -> NodeIndex {
        push_node!(self, type_literals, kind, pos, end, data)
    }

    pub fn add_signature(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: SignatureData,
    ) -> NodeIndex {
        push_node!(self, signatures, kind, pos, end, data)
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        use crate::syntax_kind::syntax_kind_ext::SOURCE_FILE;
        push_node!(self, source_files, SOURCE_FILE, pos, end, data)
    }
}
