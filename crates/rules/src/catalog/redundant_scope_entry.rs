//! `coroutineScope { launch { ... } }` and friends: a scope entry whose body
//! is exactly one builder call adds a suspension point and nothing else; the
//! builder could run on the outer scope directly.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::REDUNDANT_LAUNCH_IN_COROUTINE_SCOPE,
    name: "Redundant scope entry",
    description: "Detects scope-entry calls whose body is a single builder call and nothing else",
    shape: NodeShape::Call,
    default_severity: Severity::Warning,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let Some(callee) = facts::callee_name(tree, node) else {
        return Vec::new();
    };
    if !names::is_scope_entry(callee) {
        return Vec::new();
    }
    let Some(lambda) = facts::trailing_lambda(tree, node) else {
        return Vec::new();
    };
    let statements = facts::lambda_statements(tree, lambda);
    let [only] = statements.as_slice() else {
        return Vec::new();
    };
    let NodeKind::Call { callee: inner, .. } = tree.kind(*only) else {
        return Vec::new();
    };
    if !names::is_task_builder(inner) {
        return Vec::new();
    }
    vec![Detection::new(
        node,
        format!(
            "`{callee}` wraps a single `{inner}` and nothing else; the wrapper only waits for \
             the one child, so the builder can run on the outer scope directly"
        ),
    )]
}
