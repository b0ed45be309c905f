//! Shared analyses behind the rule catalog
//!
//! Three focused analyzers feed the checkers: execution-context
//! classification (is this node lexically inside a coroutine?), scope
//! lifecycle tracking (cancel-then-reuse), and pending-result correlation
//! (is a Deferred ever awaited?). All of them are lexical and name-based,
//! with bookkeeping confined to one pass over one function body; none
//! attempts alias or control-flow analysis.

pub mod deferred;
pub mod execution_context;
pub mod names;
pub mod scope_lifecycle;

pub use deferred::is_consumed;
pub use execution_context::{classify, ExecutionContext};
pub use scope_lifecycle::{
    find_reuse_violations, ScopeReuseViolation, ScopeUsage, ScopeUsageKind,
};
