//! `runBlocking` inside code that is already asynchronous. The bridge parks
//! its thread until the inner coroutine finishes, which inverts the point of
//! suspending and can deadlock a constrained dispatcher.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId};

pub(crate) const RULE: Rule = Rule {
    id: ids::RUN_BLOCKING_IN_SUSPEND,
    name: "Blocking bridge in coroutine",
    description: "Detects runBlocking lexically inside a suspend function or builder lambda",
    shape: NodeShape::Call,
    default_severity: Severity::Error,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    if facts::callee_name(tree, node) != Some(names::RUN_BLOCKING) {
        return Vec::new();
    }
    if !ctx.in_async_context(node) {
        return Vec::new();
    }
    vec![Detection::new(
        node,
        "runBlocking inside a coroutine parks the current thread until the nested coroutine \
         completes; suspend directly instead of bridging",
    )]
}
