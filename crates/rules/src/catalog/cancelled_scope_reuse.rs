//! Builder calls on a scope that was cancelled earlier in the same function.
//! A cancelled scope starts no new work: every child launched afterwards
//! completes immediately in the cancelled state. `cancelChildren()` is the
//! reset that keeps the scope alive; a plain `cancel()` kills it for good.

use crate::analysis::scope_lifecycle;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId};

pub(crate) const RULE: Rule = Rule {
    id: ids::CANCELLED_SCOPE_REUSE,
    name: "Cancelled scope reuse",
    description: "Detects builder calls on a scope variable after cancel() in the same function",
    shape: NodeShape::FunctionDecl,
    default_severity: Severity::Error,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let Some(body) = facts::function_body(tree, node) else {
        return Vec::new();
    };
    scope_lifecycle::find_reuse_violations(tree, body)
        .into_iter()
        .map(|violation| {
            Detection::new(
                violation.reuse_site,
                format!(
                    "scope `{}` was cancelled earlier in this function and is reused for `{}`; \
                     the new child completes immediately cancelled. Use cancelChildren() if the \
                     scope itself should stay alive",
                    violation.scope,
                    violation.reuse_kind.label()
                ),
            )
            .with_secondary(violation.cancel_site)
        })
        .collect()
}
