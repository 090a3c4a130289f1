//! One-call checking of a built source file.

use thisctx_ast::{NodeArena, NodeIndex};
use thisctx_checker::{CheckerOptions, CheckerState};
use thisctx_common::diagnostics::Diagnostic;
use thisctx_solver::{TypeFormatter, TypeId, TypeInterner};
use tracing::info_span;

/// Everything a check pass produces that outlives the checker.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub file_name: String,
    /// Sorted by position, then code.
    pub diagnostics: Vec<Diagnostic>,
    /// Receiver type of every checked method, sorted by method node.
    pub receivers: Vec<(NodeIndex, TypeId)>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn receiver_of(&self, method: NodeIndex) -> Option<TypeId> {
        self.receivers
            .binary_search_by_key(&method.0, |(idx, _)| idx.0)
            .ok()
            .map(|pos| self.receivers[pos].1)
    }

    /// `error TS2339: ...` lines, one per diagnostic.
    pub fn format_diagnostics(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|d| format!("{}({}): {}", self.file_name, d.start, d.format_simple()))
            .collect()
    }
}

/// Check the source file at `root`.
///
/// The file name comes from the source file node. Types in the result are
/// ids into `types`.
pub fn check_program(
    arena: &NodeArena,
    root: NodeIndex,
    types: &TypeInterner,
    options: &CheckerOptions,
) -> CheckResult {
    let file_name = arena
        .get(root)
        .and_then(|node| arena.get_source_file(node))
        .map(|file| file.file_name.clone())
        .unwrap_or_default();
    let _span = info_span!("check_program", file = %file_name).entered();

    let mut checker = CheckerState::new(arena, types, file_name.clone(), options);
    checker.check_source_file(root);

    let mut receivers: Vec<(NodeIndex, TypeId)> = checker.receiver_types().collect();
    receivers.sort_unstable_by_key(|(idx, _)| idx.0);
    for &(method, receiver) in &receivers {
        tracing::debug!(
            method = method.0,
            receiver = %TypeFormatter::new(types).format(receiver),
            "resolved receiver"
        );
    }

    CheckResult {
        file_name,
        diagnostics: checker.take_diagnostics(),
        receivers,
    }
}
