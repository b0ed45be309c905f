//! Suspending calls in `finally` blocks.
//!
//! Cleanup usually runs because the coroutine was cancelled, and a cancelled
//! coroutine rejects further suspension points on arrival. The accepted form
//! wraps the cleanup in `withContext(NonCancellable)`, which this rule
//! recognizes at any depth between the call and the `finally`.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::SUSPEND_IN_FINALLY,
    name: "Suspension in finally",
    description: "Detects suspending calls in finally blocks outside withContext(NonCancellable)",
    shape: NodeShape::Call,
    default_severity: Severity::Warning,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let NodeKind::Call { callee, suspends } = tree.kind(node) else {
        return Vec::new();
    };
    if !*suspends && !names::is_suspending_call(callee) {
        return Vec::new();
    }
    // The protective wrapper itself must not trip the rule.
    if is_non_cancellable_switch(tree, node) {
        return Vec::new();
    }

    let mut protected = false;
    for ancestor in tree.ancestors(node) {
        match tree.kind(ancestor) {
            NodeKind::Lambda => {
                if let Some(owner) = tree.parent(ancestor) {
                    if is_non_cancellable_switch(tree, owner) {
                        protected = true;
                    }
                }
            }
            NodeKind::Finally => {
                if protected {
                    return Vec::new();
                }
                return vec![Detection::new(
                    node,
                    format!(
                        "suspending call `{callee}` in a finally block will throw immediately if \
                         the coroutine is already cancelled; wrap the cleanup in \
                         withContext(NonCancellable)"
                    ),
                )];
            }
            NodeKind::Function { .. } => return Vec::new(),
            _ => {}
        }
    }
    Vec::new()
}

fn is_non_cancellable_switch(tree: &crate::tree::SyntaxTree, call: NodeId) -> bool {
    let NodeKind::Call { callee, .. } = tree.kind(call) else {
        return false;
    };
    if callee != names::CONTEXT_SWITCH {
        return false;
    }
    facts::arguments(tree, call)
        .iter()
        .any(|&argument| facts::subtree_contains_reference(tree, argument, names::NON_CANCELLABLE))
}
