//! Execution-context classification
//!
//! Answers one question for any node: does it lexically execute inside a
//! coroutine? The walk inspects the enclosing-declaration chain and stops at
//! the first boundary that decides the answer, so deeply nested lambdas cost
//! no more than their nesting depth.

use super::names;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Nearest enclosing named function carries the suspend marker.
    SuspendFunction,
    /// Inside the trailing lambda of a coroutine builder or scope-entry call.
    BuilderLambda,
    /// Plain blocking code.
    None,
}

impl ExecutionContext {
    pub fn is_async(self) -> bool {
        !matches!(self, ExecutionContext::None)
    }
}

/// Classifies the context `node` occurs in by walking its ancestors.
///
/// A lambda owned by a builder call resolves [`ExecutionContext::BuilderLambda`]
/// immediately. A lambda owned by a known inline helper (`let`, `run`, ...)
/// is transparent and the walk continues above it. Any other lambda is an
/// opaque boundary: the lambda may run later on an arbitrary thread, so the
/// walk conservatively resolves [`ExecutionContext::None`] rather than
/// attributing the outer context to it.
pub fn classify(tree: &SyntaxTree, node: NodeId) -> ExecutionContext {
    for ancestor in tree.ancestors(node) {
        match tree.kind(ancestor) {
            NodeKind::Lambda => {
                let owner_callee = tree.parent(ancestor).and_then(|owner| match tree.kind(owner) {
                    NodeKind::Call { callee, .. } => Some(callee.as_str()),
                    _ => None,
                });
                match owner_callee {
                    Some(callee) if names::is_builder_lambda_owner(callee) => {
                        return ExecutionContext::BuilderLambda;
                    }
                    Some(callee) if names::is_transparent_lambda_owner(callee) => {}
                    _ => return ExecutionContext::None,
                }
            }
            NodeKind::Function { is_suspend, .. } => {
                return if *is_suspend {
                    ExecutionContext::SuspendFunction
                } else {
                    ExecutionContext::None
                };
            }
            _ => {}
        }
    }
    ExecutionContext::None
}
