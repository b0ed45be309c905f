//! A scope constructed and immediately used in the same expression, e.g.
//! `CoroutineScope(Dispatchers.IO).launch { }`. The handle is unreachable the
//! moment the statement ends, so the spawned work can never be cancelled.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::INLINE_COROUTINE_SCOPE,
    name: "Inline coroutine scope",
    description: "Detects a fresh scope used as a builder receiver in the same expression",
    shape: NodeShape::Call,
    default_severity: Severity::Error,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let Some(callee) = facts::callee_name(tree, node) else {
        return Vec::new();
    };
    if !names::is_task_builder(callee) {
        return Vec::new();
    }
    let Some(receiver) = facts::receiver(tree, node) else {
        return Vec::new();
    };
    let NodeKind::Call { callee: constructor, .. } = tree.kind(receiver) else {
        return Vec::new();
    };
    if !names::is_scope_constructor(constructor) {
        return Vec::new();
    }
    vec![Detection::new(
        node,
        format!(
            "scope constructed inline with `{constructor}(...)` and immediately used for \
             `{callee}`; the handle is dropped, so the spawned work can never be cancelled"
        ),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testutil;
    use crate::tree::{ChildRole, TreeBuilder};

    fn inline_builder(constructor: &str) -> crate::tree::SyntaxTree {
        let mut b = TreeBuilder::new("Inline.kt");
        b.open(NodeKind::function("fire"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::call("launch"));
        b.open_as(ChildRole::Receiver, NodeKind::call(constructor));
        b.leaf_as(ChildRole::Argument, NodeKind::member_access("IO"));
        b.close();
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        b.finish()
    }

    #[test]
    fn coroutine_scope_constructor_receiver_is_flagged() {
        let tree = inline_builder("CoroutineScope");
        assert_eq!(
            testutil::findings_for(&tree, ids::INLINE_COROUTINE_SCOPE).len(),
            1
        );
    }

    #[test]
    fn main_scope_constructor_receiver_is_flagged() {
        let tree = inline_builder("MainScope");
        assert_eq!(
            testutil::findings_for(&tree, ids::INLINE_COROUTINE_SCOPE).len(),
            1
        );
    }

    #[test]
    fn ordinary_call_receivers_are_ignored() {
        let tree = inline_builder("currentScope");
        assert!(testutil::findings_for(&tree, ids::INLINE_COROUTINE_SCOPE).is_empty());
    }

    #[test]
    fn named_receivers_are_ignored() {
        let mut b = TreeBuilder::new("Inline.kt");
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("scope"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::INLINE_COROUTINE_SCOPE).is_empty());
    }
}
