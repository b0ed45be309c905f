//! The rule catalog
//!
//! Every rule is a plain table entry: a stable id, the node shape it
//! examines, a default severity, and a pure detection function. Adding a rule
//! is a table insertion, not a new type; the dispatcher walks the tree once
//! and consults the table at each node. Entries keep their source-file-per-rule
//! layout so each detection condition lives next to its tests.

use crate::analysis::{classify, ExecutionContext};
use crate::core::Severity;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

mod cancellation_subclass;
mod cancelled_scope_reuse;
mod dispatchers_unconfined;
mod global_scope;
mod inline_scope;
mod job_in_builder;
mod loop_without_yield;
mod redundant_scope_entry;
mod run_blocking_in_suspend;
mod suspend_in_finally;
mod swallowed_cancellation;
mod unstructured_launch;
mod unused_deferred;

/// Stable rule identifiers, the contract between the catalog and every host
/// configuration surface.
pub mod ids {
    pub const GLOBAL_SCOPE_USAGE: &str = "globalScopeUsage";
    pub const INLINE_COROUTINE_SCOPE: &str = "inlineCoroutineScope";
    pub const UNSTRUCTURED_LAUNCH: &str = "unstructuredLaunch";
    pub const RUN_BLOCKING_IN_SUSPEND: &str = "runBlockingInSuspend";
    pub const JOB_IN_BUILDER_CONTEXT: &str = "jobInBuilderContext";
    pub const DISPATCHERS_UNCONFINED: &str = "dispatchersUnconfined";
    pub const CANCELLATION_EXCEPTION_SUBCLASS: &str = "cancellationExceptionSubclass";
    pub const SUSPEND_IN_FINALLY: &str = "suspendInFinally";
    pub const CANCELLATION_EXCEPTION_SWALLOWED: &str = "cancellationExceptionSwallowed";
    pub const UNUSED_DEFERRED: &str = "unusedDeferred";
    pub const REDUNDANT_LAUNCH_IN_COROUTINE_SCOPE: &str = "redundantLaunchInCoroutineScope";
    pub const LOOP_WITHOUT_YIELD: &str = "loopWithoutYield";
    pub const CANCELLED_SCOPE_REUSE: &str = "cancelledScopeReuse";
}

/// Tree-node shapes a rule can subscribe to. The dispatcher only invokes a
/// rule on nodes its shape matches, keeping the walk linear in tree size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Call,
    ClassDecl,
    CatchClause,
    Loop,
    FunctionDecl,
}

impl NodeShape {
    pub fn matches(self, kind: &NodeKind) -> bool {
        matches!(
            (self, kind),
            (NodeShape::Call, NodeKind::Call { .. })
                | (NodeShape::ClassDecl, NodeKind::Class { .. })
                | (NodeShape::CatchClause, NodeKind::Catch { .. })
                | (NodeShape::Loop, NodeKind::Loop { .. })
                | (NodeShape::FunctionDecl, NodeKind::Function { .. })
        )
    }
}

/// Read-only helpers handed to every detection function.
pub struct RuleContext<'a> {
    tree: &'a SyntaxTree,
}

impl<'a> RuleContext<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn classify(&self, node: NodeId) -> ExecutionContext {
        classify(self.tree, node)
    }

    pub fn in_async_context(&self, node: NodeId) -> bool {
        self.classify(node).is_async()
    }
}

/// One raw detection before severity stamping.
#[derive(Debug, Clone)]
pub struct Detection {
    pub primary: NodeId,
    pub secondary: Option<NodeId>,
    pub message: String,
}

impl Detection {
    pub fn new(primary: NodeId, message: impl Into<String>) -> Self {
        Self {
            primary,
            secondary: None,
            message: message.into(),
        }
    }

    pub fn with_secondary(mut self, node: NodeId) -> Self {
        self.secondary = Some(node);
        self
    }
}

pub type CheckFn = fn(&RuleContext<'_>, NodeId) -> Vec<Detection>;

/// One catalog entry. Detection functions are pure: they read the tree and
/// return zero or more detections, never mutating anything.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub shape: NodeShape,
    pub default_severity: Severity,
    pub check: CheckFn,
}

/// The fixed, ordered rule table. Order is part of the output contract:
/// findings at one node are emitted in table order.
pub static CATALOG: &[Rule] = &[
    global_scope::RULE,
    inline_scope::RULE,
    unstructured_launch::RULE,
    run_blocking_in_suspend::RULE,
    job_in_builder::RULE,
    dispatchers_unconfined::RULE,
    cancellation_subclass::RULE,
    suspend_in_finally::RULE,
    swallowed_cancellation::RULE,
    unused_deferred::RULE,
    redundant_scope_entry::RULE,
    loop_without_yield::RULE,
    cancelled_scope_reuse::RULE,
];

/// Rules the `strict` profile pins to error; everything else it demotes to
/// warning.
pub const STRICT_ERROR_RULES: &[&str] = &[
    ids::GLOBAL_SCOPE_USAGE,
    ids::INLINE_COROUTINE_SCOPE,
    ids::UNSTRUCTURED_LAUNCH,
    ids::RUN_BLOCKING_IN_SUSPEND,
    ids::JOB_IN_BUILDER_CONTEXT,
    ids::CANCELLATION_EXCEPTION_SUBCLASS,
    ids::UNUSED_DEFERRED,
    ids::CANCELLED_SCOPE_REUSE,
];
