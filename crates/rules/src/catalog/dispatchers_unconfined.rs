//! `Dispatchers.Unconfined` as a builder argument. The unconfined dispatcher
//! resumes on whatever thread completed the suspension, which is almost never
//! what production code wants.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId};

pub(crate) const RULE: Rule = Rule {
    id: ids::DISPATCHERS_UNCONFINED,
    name: "Unconfined dispatcher",
    description: "Detects Dispatchers.Unconfined passed to a builder or context switch",
    shape: NodeShape::Call,
    default_severity: Severity::Warning,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let Some(callee) = facts::callee_name(tree, node) else {
        return Vec::new();
    };
    if !names::is_task_builder(callee) && !names::is_context_switch(callee) {
        return Vec::new();
    }
    let mut detections = Vec::new();
    for argument in facts::arguments(tree, node) {
        if let Some(access) = facts::subtree_contains_member_access(
            tree,
            argument,
            names::DISPATCHERS,
            names::UNCONFINED,
        ) {
            detections.push(Detection::new(
                access,
                format!(
                    "`{callee}` runs on Dispatchers.Unconfined, so resumption happens on an \
                     arbitrary thread; pick a confined dispatcher"
                ),
            ));
        }
    }
    detections
}
