//! Structural fact extraction
//!
//! Normalizes a subtree into the handful of facts rules actually consult:
//! callee names, receiver names, argument lists, trailing lambdas, enclosing
//! declarations, and annotation lookups. Every query returns `Option` or an
//! empty collection for shapes it cannot resolve; callers treat that as "skip
//! this detection", never as an error.

use super::node::{ChildRole, NodeId, NodeKind, SyntaxTree};

pub fn callee_name(tree: &SyntaxTree, call: NodeId) -> Option<&str> {
    match tree.kind(call) {
        NodeKind::Call { callee, .. } => Some(callee),
        _ => None,
    }
}

pub fn receiver(tree: &SyntaxTree, call: NodeId) -> Option<NodeId> {
    tree.children(call)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::Receiver)
}

/// Resolves a call's receiver to a simple variable name: a plain reference
/// resolves to itself, a member access to its rightmost selector (`this.scope`
/// resolves to `scope`). Anything more involved, a nested call for instance,
/// is unresolvable and yields `None`.
pub fn receiver_name(tree: &SyntaxTree, call: NodeId) -> Option<&str> {
    let recv = receiver(tree, call)?;
    match tree.kind(recv) {
        NodeKind::Reference { name } => Some(name),
        NodeKind::MemberAccess { selector } => Some(selector),
        _ => None,
    }
}

pub fn arguments(tree: &SyntaxTree, call: NodeId) -> Vec<NodeId> {
    tree.children(call)
        .iter()
        .copied()
        .filter(|&c| tree.role(c) == ChildRole::Argument)
        .collect()
}

pub fn trailing_lambda(tree: &SyntaxTree, call: NodeId) -> Option<NodeId> {
    tree.children(call)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::Body && matches!(tree.kind(c), NodeKind::Lambda))
}

/// Statements of a lambda body, looking through a single wrapping block if
/// the host emitted one.
pub fn lambda_statements(tree: &SyntaxTree, lambda: NodeId) -> Vec<NodeId> {
    let children = tree.children(lambda);
    if let [only] = children {
        if matches!(tree.kind(*only), NodeKind::Block) {
            return tree.children(*only).to_vec();
        }
    }
    children.to_vec()
}

pub fn enclosing_function(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node)
        .find(|&a| matches!(tree.kind(a), NodeKind::Function { .. }))
}

pub fn function_body(tree: &SyntaxTree, function: NodeId) -> Option<NodeId> {
    tree.children(function)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::Body)
}

/// Annotations on the first parameter or binding declaration with the given
/// name, anywhere in the unit. Lexical lookup by name text, matching how
/// receivers are resolved.
pub fn declaration_annotations<'a>(tree: &'a SyntaxTree, name: &str) -> Option<&'a [String]> {
    tree.descendants(tree.root()).find_map(|node| match tree.kind(node) {
        NodeKind::Parameter {
            name: declared,
            annotations,
        }
        | NodeKind::Binding {
            name: declared,
            annotations,
        } if declared == name => Some(annotations.as_slice()),
        _ => None,
    })
}

pub fn subtree_contains_reference(tree: &SyntaxTree, root: NodeId, name: &str) -> bool {
    tree.descendants(root)
        .any(|n| matches!(tree.kind(n), NodeKind::Reference { name: found } if found == name))
}

/// Finds a `receiver.selector` member access, e.g. `Dispatchers.Unconfined`.
pub fn subtree_contains_member_access(
    tree: &SyntaxTree,
    root: NodeId,
    receiver_name: &str,
    selector_name: &str,
) -> Option<NodeId> {
    tree.descendants(root).find(|&n| {
        let NodeKind::MemberAccess { selector } = tree.kind(n) else {
            return false;
        };
        if selector != selector_name {
            return false;
        }
        tree.children(n).iter().copied().any(|c| {
            tree.role(c) == ChildRole::Receiver
                && matches!(tree.kind(c), NodeKind::Reference { name } if name == receiver_name)
        })
    })
}
