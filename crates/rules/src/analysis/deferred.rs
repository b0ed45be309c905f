//! Pending-result correlation
//!
//! Decides whether the `Deferred` produced by an `async` builder call is ever
//! consumed. The resolution order favors false negatives: a result bound to a
//! name is searched for an `await` on that name or any batch-await in the
//! enclosing body; a result chained straight into `.await()` is consumed; a
//! result handed to another function or returned is assumed consumed, since
//! the receiver may await it out of sight. Only a result in plain statement
//! position, or a binding nothing ever touches, counts as dropped.

use super::names;
use crate::tree::{facts, ChildRole, NodeId, NodeKind, SyntaxTree};

/// Whether the pending result of `call` is consumed anywhere the analyzer can
/// see. `call` is expected to be an async-style builder call.
pub fn is_consumed(tree: &SyntaxTree, call: NodeId) -> bool {
    let Some(parent) = tree.parent(call) else {
        return true;
    };

    match tree.kind(parent) {
        // `scope.async { }.await()` and friends: consumed only when the
        // chained accessor is the await itself.
        NodeKind::Call { callee, .. } if tree.role(call) == ChildRole::Receiver => {
            callee == names::AWAIT_ACCESSOR
        }
        NodeKind::Binding { name, .. } => binding_is_consumed(tree, call, name),
        // Statement position: the handle is dropped on the spot.
        NodeKind::Block | NodeKind::Lambda => false,
        NodeKind::Return => true,
        // Argument position, conditions, member accesses: handed off, assume
        // the recipient consumes it.
        _ => true,
    }
}

fn binding_is_consumed(tree: &SyntaxTree, call: NodeId, binding: &str) -> bool {
    let search_root = facts::enclosing_function(tree, call)
        .and_then(|f| facts::function_body(tree, f))
        .unwrap_or_else(|| tree.root());

    tree.descendants(search_root).any(|node| match tree.kind(node) {
        NodeKind::Call { callee, .. } => {
            // A batch-await anywhere is a conservative "consumed": fan-out
            // code frequently collects handles before awaiting them together.
            names::is_batch_await(callee)
                || (callee == names::AWAIT_ACCESSOR
                    && facts::receiver_name(tree, node) == Some(binding))
        }
        NodeKind::Reference { name } => {
            name == binding && tree.role(node) == ChildRole::Argument
        }
        _ => false,
    })
}
