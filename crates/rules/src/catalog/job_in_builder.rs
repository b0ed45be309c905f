//! `Job()` / `SupervisorJob()` passed to a builder or context switch.
//!
//! A lifecycle token in a builder argument severs the parent-child link: the
//! new coroutine no longer cancels with its scope. Failure-grouping tokens
//! belong at scope creation.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::JOB_IN_BUILDER_CONTEXT,
    name: "Lifecycle token in builder arguments",
    description: "Detects Job or SupervisorJob constructors passed to a builder or context switch",
    shape: NodeShape::Call,
    default_severity: Severity::Error,
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
        for inner in tree.descendants(argument) {
            if let NodeKind::Call { callee: constructor, .. } = tree.kind(inner) {
                if names::is_lifecycle_token_constructor(constructor) {
                    detections.push(Detection::new(
                        inner,
                        format!(
                            "`{constructor}()` passed to `{callee}` detaches the new coroutine \
                             from its parent; install the job when the scope is created instead"
                        ),
                    ));
                }
            }
        }
    }
    detections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testutil;
    use crate::tree::{ChildRole, SyntaxTree, TreeBuilder};

    fn builder_with_argument(callee: &str, argument: NodeKind) -> SyntaxTree {
        let mut b = TreeBuilder::new("Token.kt");
        b.open(NodeKind::function("start"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::call(callee));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("scope"));
        b.leaf_as(ChildRole::Argument, argument);
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        b.finish()
    }

    #[test]
    fn job_constructor_in_launch_is_flagged() {
        let tree = builder_with_argument("launch", NodeKind::call("Job"));
        assert_eq!(
            testutil::findings_for(&tree, ids::JOB_IN_BUILDER_CONTEXT).len(),
            1
        );
    }

    #[test]
    fn supervisor_job_in_with_context_is_flagged() {
        let tree = builder_with_argument("withContext", NodeKind::call("SupervisorJob"));
        assert_eq!(
            testutil::findings_for(&tree, ids::JOB_IN_BUILDER_CONTEXT).len(),
            1
        );
    }

    #[test]
    fn job_nested_in_a_combined_context_is_found() {
        let mut b = TreeBuilder::new("Token.kt");
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("scope"));
        b.open_as(ChildRole::Argument, NodeKind::call("plus"));
        b.leaf_as(ChildRole::Argument, NodeKind::call("SupervisorJob"));
        b.close();
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        assert_eq!(
            testutil::findings_for(&tree, ids::JOB_IN_BUILDER_CONTEXT).len(),
            1
        );
    }

    #[test]
    fn dispatcher_arguments_are_fine() {
        let tree = builder_with_argument("launch", NodeKind::member_access("IO"));
        assert!(testutil::findings_for(&tree, ids::JOB_IN_BUILDER_CONTEXT).is_empty());
    }

    #[test]
    fn job_at_scope_creation_is_the_supported_pattern() {
        let mut b = TreeBuilder::new("Token.kt");
        b.open(NodeKind::call("CoroutineScope"));
        b.leaf_as(ChildRole::Argument, NodeKind::call("SupervisorJob"));
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::JOB_IN_BUILDER_CONTEXT).is_empty());
    }
}
