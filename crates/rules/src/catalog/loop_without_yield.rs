//! Loops in coroutines that never reach a cooperation point. Cancellation in
//! this model is cooperative; a busy loop with no suspension, `yield`, or
//! activity check keeps running after its job is cancelled.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::LOOP_WITHOUT_YIELD,
    name: "Uncooperative loop",
    description: "Detects loops in coroutines containing no cooperation point",
    shape: NodeShape::Loop,
    default_severity: Severity::Warning,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    if !ctx.in_async_context(node) {
        return Vec::new();
    }
    let cooperative = tree.descendants(node).any(|inner| match tree.kind(inner) {
        NodeKind::Call { callee, suspends } => {
            *suspends || names::is_cooperation_point(callee) || names::is_suspending_call(callee)
        }
        // `while (isActive)` is the idiomatic cancellation check.
        NodeKind::Reference { name } => name == names::ACTIVE_CHECK,
        _ => false,
    });
    if cooperative {
        return Vec::new();
    }
    vec![Detection::new(
        node,
        "loop inside a coroutine never suspends or checks for cancellation; a pending cancel \
         cannot take effect until the loop exits. Add yield(), ensureActive(), or an isActive check",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testutil;
    use crate::tree::{ChildRole, SyntaxTree, TreeBuilder};

    fn loop_in_suspend(fill: impl FnOnce(&mut TreeBuilder)) -> SyntaxTree {
        let mut b = TreeBuilder::new("Loop.kt");
        b.open(NodeKind::suspend_function("poll"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::while_loop());
        b.leaf_as(ChildRole::Condition, NodeKind::reference("running"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        fill(&mut b);
        b.finish()
    }

    #[test]
    fn busy_loop_in_suspend_function_is_flagged() {
        let tree = loop_in_suspend(|b| {
            b.leaf(NodeKind::call("step"));
        });
        assert_eq!(testutil::findings_for(&tree, ids::LOOP_WITHOUT_YIELD).len(), 1);
    }

    #[test]
    fn ensure_active_in_the_body_makes_it_cooperative() {
        let tree = loop_in_suspend(|b| {
            b.leaf(NodeKind::call("step"));
            b.leaf(NodeKind::call("ensureActive"));
        });
        assert!(testutil::findings_for(&tree, ids::LOOP_WITHOUT_YIELD).is_empty());
    }

    #[test]
    fn any_suspension_point_counts() {
        let tree = loop_in_suspend(|b| {
            b.open(NodeKind::call("await"));
            b.leaf_as(ChildRole::Receiver, NodeKind::reference("next"));
            b.close();
        });
        assert!(testutil::findings_for(&tree, ids::LOOP_WITHOUT_YIELD).is_empty());
    }

    #[test]
    fn is_active_condition_counts_as_cooperation() {
        let mut b = TreeBuilder::new("Loop.kt");
        b.open(NodeKind::suspend_function("poll"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::while_loop());
        b.leaf_as(ChildRole::Condition, NodeKind::reference("isActive"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.leaf(NodeKind::call("step"));
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::LOOP_WITHOUT_YIELD).is_empty());
    }

    #[test]
    fn loops_in_blocking_code_are_out_of_scope() {
        let mut b = TreeBuilder::new("Loop.kt");
        b.open(NodeKind::function("spin"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::while_loop());
        b.leaf_as(ChildRole::Condition, NodeKind::reference("running"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.leaf(NodeKind::call("step"));
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::LOOP_WITHOUT_YIELD).is_empty());
    }

    #[test]
    fn builder_lambda_loops_are_covered() {
        let mut b = TreeBuilder::new("Loop.kt");
        b.open(NodeKind::function("start"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("scope"));
        b.open_as(ChildRole::Body, NodeKind::Lambda);
        b.open(NodeKind::for_loop());
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.leaf(NodeKind::call("step"));
        let tree = b.finish();
        assert_eq!(testutil::findings_for(&tree, ids::LOOP_WITHOUT_YIELD).len(), 1);
    }
}
