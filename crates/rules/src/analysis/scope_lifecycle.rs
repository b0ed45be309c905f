//! Scope lifecycle tracking
//!
//! Records every `cancel` / `launch` / `async` / `cancelChildren` call on a
//! named scope variable across one function body and derives cancel-then-reuse
//! violations from the per-name, offset-ordered sequence. The correlation is
//! lexical: receivers are matched by name text only, so two names aliasing one
//! scope object are tracked independently. That limitation is part of the
//! contract, not something to compensate for with guessed intent.

use std::collections::BTreeMap;

use crate::tree::{facts, NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeUsageKind {
    Cancel,
    Launch,
    Async,
    CancelChildren,
}

impl ScopeUsageKind {
    fn from_callee(name: &str) -> Option<Self> {
        match name {
            "cancel" => Some(Self::Cancel),
            "launch" => Some(Self::Launch),
            "async" => Some(Self::Async),
            "cancelChildren" => Some(Self::CancelChildren),
            _ => None,
        }
    }

    pub fn is_builder(self) -> bool {
        matches!(self, Self::Launch | Self::Async)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::Launch => "launch",
            Self::Async => "async",
            Self::CancelChildren => "cancelChildren",
        }
    }
}

/// One recorded operation on a named scope variable. Lives only for the
/// duration of one function-body pass.
#[derive(Debug, Clone)]
pub struct ScopeUsage {
    pub scope: String,
    pub kind: ScopeUsageKind,
    pub offset: usize,
    pub node: NodeId,
}

/// A builder call on a scope name after a `cancel` on the same name with no
/// intervening `cancelChildren` reset. The cancel site always precedes the
/// reuse site in source order.
#[derive(Debug, Clone)]
pub struct ScopeReuseViolation {
    pub scope: String,
    pub cancel_site: NodeId,
    pub reuse_site: NodeId,
    pub reuse_kind: ScopeUsageKind,
}

/// Scans one function body and derives reuse violations.
///
/// Per scope name, usages are ordered by offset and scanned once: `cancel`
/// arms the state, `cancelChildren` disarms it (narrowing children does not
/// kill the scope itself), a later `cancel` simply re-arms, and a builder call
/// while armed is a violation. Nested function declarations are skipped; they
/// get their own pass.
pub fn find_reuse_violations(tree: &SyntaxTree, body: NodeId) -> Vec<ScopeReuseViolation> {
    let mut usages: BTreeMap<String, Vec<ScopeUsage>> = BTreeMap::new();
    collect_usages(tree, body, &mut usages);

    let mut violations = Vec::new();
    for (scope, mut ordered) in usages {
        ordered.sort_by_key(|u| u.offset);

        let mut last_cancel: Option<(NodeId, usize)> = None;
        for usage in &ordered {
            match usage.kind {
                ScopeUsageKind::Cancel => last_cancel = Some((usage.node, usage.offset)),
                ScopeUsageKind::CancelChildren => last_cancel = None,
                ScopeUsageKind::Launch | ScopeUsageKind::Async => {
                    if let Some((cancel_site, cancel_offset)) = last_cancel {
                        if cancel_offset < usage.offset {
                            violations.push(ScopeReuseViolation {
                                scope: scope.clone(),
                                cancel_site,
                                reuse_site: usage.node,
                                reuse_kind: usage.kind,
                            });
                        }
                    }
                }
            }
        }
    }

    violations.sort_by_key(|v| tree.offset(v.reuse_site));
    violations
}

fn collect_usages(tree: &SyntaxTree, node: NodeId, usages: &mut BTreeMap<String, Vec<ScopeUsage>>) {
    for &child in tree.children(node) {
        if matches!(tree.kind(child), NodeKind::Function { .. }) {
            continue;
        }
        if let NodeKind::Call { callee, .. } = tree.kind(child) {
            if let Some(kind) = ScopeUsageKind::from_callee(callee) {
                // Only a resolvable receiver makes this a scope operation;
                // a bare `launch { }` belongs to whatever scope encloses it.
                if let Some(name) = facts::receiver_name(tree, child) {
                    usages.entry(name.to_string()).or_default().push(ScopeUsage {
                        scope: name.to_string(),
                        kind,
                        offset: tree.offset(child),
                        node: child,
                    });
                }
            }
        }
        collect_usages(tree, child, usages);
    }
}
