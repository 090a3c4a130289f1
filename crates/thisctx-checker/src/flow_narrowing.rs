//! Truthiness narrowing of references.
//!
//! A condition such as `this.z && dz` proves each `&&` operand truthy in
//! the code it guards, so `this.z` and `dz` lose their nullish and falsy
//! literal constituents there. Narrowings are keyed by reference text
//! (`dz`, `this.z`) and live in `ctx.narrowing_frames`.

use crate::state::CheckerState;
use rustc_hash::FxHashMap;
use thisctx_ast::{NodeIndex, SyntaxKind, syntax_kind_ext};
use thisctx_solver::{TypeId, narrow_by_truthiness};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Narrowings that hold wherever `condition` is known to be truthy.
    ///
    /// `condition` must already have been checked; the narrowed types are
    /// derived from the cached node types.
    pub fn collect_truthy_narrowings(&self, condition: NodeIndex) -> FxHashMap<String, TypeId> {
        let mut narrowed = FxHashMap::default();
        self.collect_truthy_into(condition, &mut narrowed);
        narrowed
    }

    fn collect_truthy_into(&self, idx: NodeIndex, out: &mut FxHashMap<String, TypeId>) {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            syntax_kind_ext::PARENTHESIZED_EXPRESSION => {
                if let Some(paren) = arena.get_parenthesized(node) {
                    self.collect_truthy_into(paren.expression, out);
                }
            }
            syntax_kind_ext::BINARY_EXPRESSION => {
                if let Some(binary) = arena.get_binary_expr(node)
                    && binary.operator_token == SyntaxKind::AmpersandAmpersandToken as u16
                {
                    self.collect_truthy_into(binary.left, out);
                    self.collect_truthy_into(binary.right, out);
                }
            }
            k if k == SyntaxKind::Identifier as u16
                || k == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION =>
            {
                let Some(reference) = arena.reference_text(idx) else {
                    return;
                };
                let Some(declared) = self.node_type(idx) else {
                    return;
                };
                let narrowed = narrow_by_truthiness(self.ctx.types, declared);
                if narrowed != declared {
                    trace!(
                        reference = %reference,
                        from = %self.format_type(declared),
                        to = %self.format_type(narrowed),
                        "narrowed by truthiness"
                    );
                    out.insert(reference, narrowed);
                }
            }
            _ => {}
        }
    }
}
