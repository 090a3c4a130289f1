//! Checker context: options, scratch state and diagnostics for one file.
//!
//! `CheckerContext` owns everything mutable about a single check pass. The
//! type interner is borrowed so several contexts can share one interner
//! across threads.

use rustc_hash::{FxHashMap, FxHashSet};
use thisctx_ast::{NodeArena, NodeIndex};
use thisctx_common::diagnostics::Diagnostic;
use thisctx_solver::{TypeId, TypeInterner};

/// Compiler options that affect checking.
#[derive(Debug, Clone, Default)]
pub struct CheckerOptions {
    /// `--strict` as written. The individual flags below are already
    /// resolved: see [`CheckerOptions::apply_strict_defaults`].
    pub strict: bool,
    /// Report possibly-nullish operands (TS18047/18048/18049).
    pub strict_null_checks: bool,
    /// Report `this` with no receiver type (TS2683).
    pub no_implicit_this: bool,
    /// Report parameters that fall back to `any` (TS7006).
    pub no_implicit_any: bool,
}

impl CheckerOptions {
    /// Apply TypeScript's `--strict` defaults to the individual flags.
    #[must_use]
    pub fn apply_strict_defaults(mut self) -> Self {
        if self.strict {
            self.strict_null_checks = true;
            self.no_implicit_this = true;
            self.no_implicit_any = true;
        }
        self
    }

    pub fn strict() -> Self {
        CheckerOptions {
            strict: true,
            ..Default::default()
        }
        .apply_strict_defaults()
    }
}

/// Shared state for checking one source file.
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub types: &'a TypeInterner,
    pub file_name: String,
    pub compiler_options: CheckerOptions,

    // Binder-lite tables
    /// Type alias name -> its type node.
    pub type_alias_nodes: FxHashMap<String, NodeIndex>,
    /// Lowered alias types.
    pub type_alias_types: FxHashMap<String, TypeId>,
    /// Aliases currently being lowered (cycle detection).
    pub alias_resolution_set: FxHashSet<String>,
    /// Lexical value scopes, innermost last. Index 0 holds globals.
    pub value_scopes: Vec<FxHashMap<String, TypeId>>,
    /// Narrowed reference types, innermost last. Keyed by reference text.
    pub narrowing_frames: Vec<FxHashMap<String, TypeId>>,

    // Results
    pub node_types: FxHashMap<u32, TypeId>,
    /// Receiver type bound inside each object-literal method, by method node.
    pub receiver_types: FxHashMap<u32, TypeId>,
    pub diagnostics: Vec<Diagnostic>,
    /// `(start, code)` pairs already reported.
    pub emitted_diagnostics: FxHashSet<(u32, u32)>,

    // Checking stacks
    /// Contextual type for the expression being checked.
    pub contextual_type: Option<TypeId>,
    pub this_type_stack: Vec<TypeId>,
    pub return_type_stack: Vec<TypeId>,
    /// Types of `return` expressions seen in the enclosing method bodies.
    pub inferred_returns_stack: Vec<Vec<TypeId>>,
    pub expr_depth: u32,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        types: &'a TypeInterner,
        file_name: String,
        compiler_options: &CheckerOptions,
    ) -> Self {
        let compiler_options = compiler_options.clone();

        let mut globals = FxHashMap::default();
        globals.insert("undefined".to_string(), TypeId::UNDEFINED);

        CheckerContext {
            arena,
            types,
            file_name,
            compiler_options,
            type_alias_nodes: FxHashMap::default(),
            type_alias_types: FxHashMap::default(),
            alias_resolution_set: FxHashSet::default(),
            value_scopes: vec![globals],
            narrowing_frames: Vec::new(),
            node_types: FxHashMap::default(),
            receiver_types: FxHashMap::default(),
            diagnostics: Vec::new(),
            emitted_diagnostics: FxHashSet::default(),
            contextual_type: None,
            this_type_stack: Vec::new(),
            return_type_stack: Vec::new(),
            inferred_returns_stack: Vec::new(),
            expr_depth: 0,
        }
    }

    /// Add an error diagnostic, unless one with the same start and code exists.
    pub fn error(&mut self, start: u32, length: u32, message: String, code: u32) {
        if !self.emitted_diagnostics.insert((start, code)) {
            return;
        }
        self.diagnostics.push(Diagnostic::error(
            self.file_name.clone(),
            start,
            length,
            message,
            code,
        ));
    }

    /// Get node span (pos, end) from index.
    pub fn get_node_span(&self, idx: NodeIndex) -> Option<(u32, u32)> {
        let node = self.arena.get(idx)?;
        Some((node.pos, node.end))
    }

    /// Push an expected return type onto the stack.
    pub fn push_return_type(&mut self, return_type: TypeId) {
        self.return_type_stack.push(return_type);
    }

    /// Pop the expected return type from the stack.
    pub fn pop_return_type(&mut self) {
        self.return_type_stack.pop();
    }

    /// Get the current expected return type.
    pub fn current_return_type(&self) -> Option<TypeId> {
        self.return_type_stack.last().copied()
    }

    pub fn current_this_type(&self) -> Option<TypeId> {
        self.this_type_stack.last().copied()
    }

    pub fn push_scope(&mut self) {
        self.value_scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        // Globals stay.
        if self.value_scopes.len() > 1 {
            self.value_scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope. Returns false if it was already bound there.
    pub fn declare_value(&mut self, name: &str, type_id: TypeId) -> bool {
        match self.value_scopes.last_mut() {
            Some(scope) => scope.insert(name.to_string(), type_id).is_none(),
            None => {
                let mut scope = FxHashMap::default();
                scope.insert(name.to_string(), type_id);
                self.value_scopes.push(scope);
                true
            }
        }
    }

    pub fn lookup_value(&self, name: &str) -> Option<TypeId> {
        self.value_scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    /// Narrowed type for a reference such as `dz` or `this.z`.
    pub fn lookup_narrowed(&self, reference: &str) -> Option<TypeId> {
        self.narrowing_frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(reference).copied())
    }
}
