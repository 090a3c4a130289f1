//! Checker state and the per-node type cache.
//!
//! `CheckerState` wraps a `CheckerContext`. The checking logic is split
//! across modules that each add an `impl CheckerState` block:
//!
//! - `declarations`: binder-lite pre-pass and variable declarations
//! - `type_lowering`: type annotations to solver types
//! - `expr`: expressions, property access and operators
//! - `object_literals` / `function_type`: literals and method bodies
//! - `call_checker`: call sites and arity
//! - `statements` / `flow_narrowing`: statement walk and truthiness narrowing

use crate::context::{CheckerContext, CheckerOptions};
use thisctx_ast::{NodeArena, NodeIndex};
use thisctx_common::diagnostics::Diagnostic;
use thisctx_common::limits::MAX_EXPR_CHECK_DEPTH;
use thisctx_solver::{TypeFormatter, TypeId, TypeInterner};
use tracing::{debug, trace};

/// Type checker for one source file.
pub struct CheckerState<'a> {
    /// Shared checker context containing all state.
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        types: &'a TypeInterner,
        file_name: impl Into<String>,
        options: &CheckerOptions,
    ) -> Self {
        CheckerState {
            ctx: CheckerContext::new(arena, types, file_name.into(), options),
        }
    }

    /// Bind and check every statement of the source file at `root`.
    ///
    /// Diagnostics end up sorted by position, then code.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.ctx.file_name))]
    pub fn check_source_file(&mut self, root: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(source_file) = arena.get(root).and_then(|node| arena.get_source_file(node)) else {
            debug!(root = root.0, "root is not a source file");
            return;
        };

        let statements = &source_file.statements.nodes;
        self.bind_declarations(statements);
        for &stmt in statements {
            self.check_statement(stmt);
        }

        self.ctx
            .diagnostics
            .sort_by(|a, b| a.start.cmp(&b.start).then(a.code.cmp(&b.code)));
        debug!(
            diagnostics = self.ctx.diagnostics.len(),
            "finished checking source file"
        );
    }

    /// Check `idx` with `contextual` as its contextual type.
    ///
    /// The previous contextual type is restored afterwards, so a contextual
    /// type never leaks to siblings or parents.
    pub fn check_expression(&mut self, idx: NodeIndex, contextual: Option<TypeId>) -> TypeId {
        let saved = std::mem::replace(&mut self.ctx.contextual_type, contextual);
        let result = self.get_type_of_node(idx);
        self.ctx.contextual_type = saved;
        result
    }

    /// Get the type of an expression node, computing it on first request.
    ///
    /// Uses the current `ctx.contextual_type`. Past `MAX_EXPR_CHECK_DEPTH`
    /// nested expressions the result is `ERROR`.
    pub fn get_type_of_node(&mut self, idx: NodeIndex) -> TypeId {
        if let Some(&cached) = self.ctx.node_types.get(&idx.0) {
            trace!(idx = idx.0, type_id = cached.0, "(cached) get_type_of_node");
            return cached;
        }
        if idx.is_none() {
            return TypeId::ERROR;
        }
        if self.ctx.expr_depth >= MAX_EXPR_CHECK_DEPTH {
            debug!(idx = idx.0, "expression nesting limit reached");
            return TypeId::ERROR;
        }

        self.ctx.expr_depth += 1;
        let result = self.compute_type_of_node(idx);
        self.ctx.expr_depth -= 1;

        self.ctx.node_types.insert(idx.0, result);
        result
    }

    /// Cached type of a node that has already been checked.
    pub fn node_type(&self, idx: NodeIndex) -> Option<TypeId> {
        self.ctx.node_types.get(&idx.0).copied()
    }

    /// Receiver type bound inside the body of the method at `method_idx`.
    pub fn receiver_type(&self, method_idx: NodeIndex) -> Option<TypeId> {
        self.ctx.receiver_types.get(&method_idx.0).copied()
    }

    /// Every recorded `(method node, receiver type)` pair, in no particular order.
    pub fn receiver_types(&self) -> impl Iterator<Item = (NodeIndex, TypeId)> + '_ {
        self.ctx
            .receiver_types
            .iter()
            .map(|(&idx, &receiver)| (NodeIndex(idx), receiver))
    }

    /// Type bound to `name` in the file scope.
    pub fn global_value_type(&self, name: &str) -> Option<TypeId> {
        self.ctx
            .value_scopes
            .first()
            .and_then(|scope| scope.get(name).copied())
    }

    pub fn format_type(&self, type_id: TypeId) -> String {
        TypeFormatter::new(self.ctx.types).format(type_id)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.ctx.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.ctx.emitted_diagnostics.clear();
        std::mem::take(&mut self.ctx.diagnostics)
    }
}
