//! `async` whose pending result is never consumed. A dropped Deferred is a
//! dropped result and, worse, an unobserved failure; `launch` is the builder
//! for fire-and-forget work.

use crate::analysis::{deferred, names};
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId};

pub(crate) const RULE: Rule = Rule {
    id: ids::UNUSED_DEFERRED,
    name: "Unused deferred result",
    description: "Detects async builder calls whose Deferred is never awaited",
    shape: NodeShape::Call,
    default_severity: Severity::Error,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    if facts::callee_name(tree, node) != Some(names::ASYNC_BUILDER) {
        return Vec::new();
    }
    if deferred::is_consumed(tree, node) {
        return Vec::new();
    }
    vec![Detection::new(
        node,
        "result of `async` is never awaited; the value is lost and a failure inside the \
         coroutine goes unobserved. Await the Deferred, or use `launch` for fire-and-forget work",
    )]
}
