//! Broad catch clauses that swallow the cancellation signal.
//!
//! `catch (e: Exception)` inside a coroutine also catches
//! CancellationException, and unless the handler rethrows it first the
//! coroutine keeps running after its scope asked it to stop. A rethrow of the
//! caught parameter or an `ensureActive()` call anywhere in the handler
//! counts as forwarding the signal.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::CANCELLATION_EXCEPTION_SWALLOWED,
    name: "Swallowed cancellation",
    description: "Detects broad catch clauses in coroutines that never rethrow cancellation",
    shape: NodeShape::CatchClause,
    default_severity: Severity::Warning,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let NodeKind::Catch {
        parameter,
        caught_type,
    } = tree.kind(node)
    else {
        return Vec::new();
    };
    if !names::is_general_exception_type(names::simple_type_name(caught_type)) {
        return Vec::new();
    }
    if !ctx.in_async_context(node) {
        return Vec::new();
    }

    let forwards_cancellation = tree.descendants(node).any(|inner| match tree.kind(inner) {
        NodeKind::Throw => tree
            .children(inner)
            .iter()
            .any(|&thrown| matches!(tree.kind(thrown), NodeKind::Reference { name } if name == parameter)),
        NodeKind::Call { callee, .. } => callee == names::ENSURE_ACTIVE,
        _ => false,
    });
    if forwards_cancellation {
        return Vec::new();
    }

    vec![Detection::new(
        node,
        format!(
            "catching `{caught_type}` here also swallows CancellationException; rethrow `{parameter}` \
             (or call ensureActive()) before handling other failures"
        ),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testutil;
    use crate::tree::{ChildRole, SyntaxTree, TreeBuilder};

    fn catch_in_suspend(caught_type: &str, fill: impl FnOnce(&mut TreeBuilder)) -> SyntaxTree {
        let mut b = TreeBuilder::new("Catch.kt");
        b.open(NodeKind::suspend_function("load"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::Try);
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.leaf(NodeKind::call("fetch"));
        b.close();
        b.open(NodeKind::catch("e", caught_type));
        b.open_as(ChildRole::Body, NodeKind::Block);
        fill(&mut b);
        b.finish()
    }

    #[test]
    fn broad_catch_without_rethrow_is_flagged() {
        let tree = catch_in_suspend("Exception", |b| {
            b.open(NodeKind::call("log"));
            b.leaf_as(ChildRole::Argument, NodeKind::reference("e"));
            b.close();
        });
        assert_eq!(
            testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).len(),
            1
        );
    }

    #[test]
    fn throwable_catch_is_equally_broad() {
        let tree = catch_in_suspend("Throwable", |_| {});
        assert_eq!(
            testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).len(),
            1
        );
    }

    #[test]
    fn rethrowing_the_parameter_suppresses_the_finding() {
        let tree = catch_in_suspend("Exception", |b| {
            b.open(NodeKind::Throw);
            b.leaf(NodeKind::reference("e"));
            b.close();
        });
        assert!(testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).is_empty());
    }

    #[test]
    fn ensure_active_also_forwards_the_signal() {
        let tree = catch_in_suspend("Exception", |b| {
            b.leaf(NodeKind::call("ensureActive"));
        });
        assert!(testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).is_empty());
    }

    #[test]
    fn throwing_a_different_value_does_not_count() {
        let tree = catch_in_suspend("Exception", |b| {
            b.open(NodeKind::Throw);
            b.open(NodeKind::call("WrappedFailure"));
            b.leaf_as(ChildRole::Argument, NodeKind::reference("e"));
            b.close();
            b.close();
        });
        assert_eq!(
            testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).len(),
            1
        );
    }

    #[test]
    fn narrow_catch_types_are_fine() {
        let tree = catch_in_suspend("IOException", |_| {});
        assert!(testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).is_empty());
    }

    #[test]
    fn broad_catch_outside_coroutines_is_out_of_scope() {
        let mut b = TreeBuilder::new("Catch.kt");
        b.open(NodeKind::function("load"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::Try);
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.close();
        b.open(NodeKind::catch("e", "Exception"));
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::CANCELLATION_EXCEPTION_SWALLOWED).is_empty());
    }
}
