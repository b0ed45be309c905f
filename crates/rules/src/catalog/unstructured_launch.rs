//! Builder calls on scope references with no structured-ownership evidence.
//!
//! A scope handed around as a plain value tells the reader nothing about who
//! cancels it. The rule accepts framework-owned scopes and declarations
//! carrying the structured marker annotation; `GlobalScope` and inline
//! constructors have their own rules and are skipped here.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{facts, NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::UNSTRUCTURED_LAUNCH,
    name: "Unstructured builder call",
    description: "Detects builder calls on scope references lacking a structured-scope marker",
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
    // A bare `launch { }` picks up the receiver of the enclosing scope entry,
    // which is structured by construction.
    let Some(receiver) = facts::receiver(tree, node) else {
        return Vec::new();
    };
    if matches!(tree.kind(receiver), NodeKind::Call { .. }) {
        return Vec::new();
    }
    let Some(scope) = facts::receiver_name(tree, node) else {
        return Vec::new();
    };
    if scope == names::GLOBAL_SCOPE || names::is_framework_scope(scope) {
        return Vec::new();
    }
    if let Some(annotations) = facts::declaration_annotations(tree, scope) {
        if annotations.iter().any(|a| names::is_structured_marker(a)) {
            return Vec::new();
        }
    }
    vec![Detection::new(
        node,
        format!(
            "`{callee}` on scope `{scope}`, which carries no structured-scope marker; annotate \
             the declaration or use a framework-provided scope"
        ),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testutil;
    use crate::tree::{ChildRole, SyntaxTree, TreeBuilder};

    fn launch_on_parameter(annotations: &[&str]) -> SyntaxTree {
        let mut b = TreeBuilder::new("Unstructured.kt");
        b.open(NodeKind::function("fire"));
        b.leaf(NodeKind::annotated_parameter("scope", annotations));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("scope"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        b.finish()
    }

    #[test]
    fn unmarked_parameter_scope_is_flagged() {
        let tree = launch_on_parameter(&[]);
        assert_eq!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).len(), 1);
    }

    #[test]
    fn marker_annotation_suppresses_the_finding() {
        let tree = launch_on_parameter(&["StructuredScope"]);
        assert!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).is_empty());
    }

    #[test]
    fn at_prefixed_marker_also_counts() {
        let tree = launch_on_parameter(&["@StructuredScope"]);
        assert!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).is_empty());
    }

    #[test]
    fn unrelated_annotations_do_not_count() {
        let tree = launch_on_parameter(&["Deprecated"]);
        assert_eq!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).len(), 1);
    }

    #[test]
    fn framework_scopes_are_accepted() {
        let mut b = TreeBuilder::new("Unstructured.kt");
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("viewModelScope"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).is_empty());
    }

    #[test]
    fn global_scope_is_left_to_its_own_rule() {
        let mut b = TreeBuilder::new("Unstructured.kt");
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("GlobalScope"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).is_empty());
    }

    #[test]
    fn receiverless_launch_is_structured_by_construction() {
        let mut b = TreeBuilder::new("Unstructured.kt");
        b.open(NodeKind::call("coroutineScope"));
        b.open_as(ChildRole::Body, NodeKind::Lambda);
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        assert!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).is_empty());
    }

    #[test]
    fn undeclared_scope_name_is_flagged() {
        let mut b = TreeBuilder::new("Unstructured.kt");
        b.open(NodeKind::call("async"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("somewhereElse"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        assert_eq!(testutil::findings_for(&tree, ids::UNSTRUCTURED_LAUNCH).len(), 1);
    }
}
