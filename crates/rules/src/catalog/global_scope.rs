//! Builder calls on the process-lifetime `GlobalScope`.
//!
//! Work started there survives every component lifecycle and is cancelled by
//! nobody, which is the canonical unstructured-concurrency leak.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId};

pub(crate) const RULE: Rule = Rule {
    id: ids::GLOBAL_SCOPE_USAGE,
    name: "GlobalScope builder call",
    description: "Detects coroutine builders launched on the process-lifetime GlobalScope",
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
    if facts::receiver_name(tree, node) != Some(names::GLOBAL_SCOPE) {
        return Vec::new();
    }
    vec![Detection::new(
        node,
        format!(
            "`{callee}` on GlobalScope starts work that outlives every lifecycle and is never \
             cancelled; use a scope owned by the enclosing component"
        ),
    )]
}
