//! The fixed vocabulary of structured-concurrency names.
//!
//! Every analyzer and rule matches against these tables rather than carrying
//! its own string literals, so the recognized surface of the coroutine API
//! lives in one place.

/// Fire-and-forget and result-producing task builders.
pub const TASK_BUILDERS: &[&str] = &["launch", "async"];

/// Calls that open a new structured scope around their lambda.
pub const SCOPE_ENTRY_CALLS: &[&str] = &["coroutineScope", "supervisorScope"];

/// Calls that switch the coroutine context for their lambda.
pub const CONTEXT_SWITCH_CALLS: &[&str] = &["withContext", "withTimeout"];

/// Callees whose trailing lambda executes as a coroutine body.
pub const BUILDER_LAMBDA_OWNERS: &[&str] = &[
    "launch",
    "async",
    "runBlocking",
    "coroutineScope",
    "supervisorScope",
    "withContext",
    "withTimeout",
];

/// Inline helpers whose lambda runs in place; they neither enter nor leave a
/// coroutine context, so classification walks straight through them.
pub const TRANSPARENT_LAMBDA_OWNERS: &[&str] = &[
    "let", "run", "apply", "also", "with", "use", "forEach", "map", "filter", "repeat",
];

/// Scopes a framework owns and cancels on the caller's behalf.
pub const FRAMEWORK_SCOPES: &[&str] = &["viewModelScope", "lifecycleScope"];

/// Annotations asserting that a scope handle is safely managed.
pub const STRUCTURED_MARKERS: &[&str] = &["StructuredScope"];

/// Constructors producing a fresh, caller-owned scope handle.
pub const SCOPE_CONSTRUCTORS: &[&str] = &["CoroutineScope", "MainScope"];

/// Constructors of lifecycle / independent-failure tokens that belong at
/// scope creation, not in a builder argument list.
pub const LIFECYCLE_TOKEN_CONSTRUCTORS: &[&str] = &["Job", "SupervisorJob"];

/// Fan-out consumption of several pending results at once.
pub const BATCH_AWAITS: &[&str] = &["awaitAll", "awaitFirst", "joinAll"];

/// Calls that let pending cancellation take effect inside a loop.
pub const COOPERATION_POINTS: &[&str] = &["yield", "ensureActive", "delay"];

/// Well-known suspend-capable calls; hosts with real resolution can mark
/// further calls through [`NodeKind::suspending_call`](crate::tree::NodeKind).
pub const SUSPENDING_CALLS: &[&str] = &[
    "delay",
    "yield",
    "await",
    "awaitAll",
    "joinAll",
    "join",
    "withContext",
    "withTimeout",
    "coroutineScope",
    "supervisorScope",
];

/// Exception supertypes broad enough to swallow a cancellation signal.
pub const GENERAL_EXCEPTION_TYPES: &[&str] = &["Exception", "Throwable"];

pub const GLOBAL_SCOPE: &str = "GlobalScope";
pub const RUN_BLOCKING: &str = "runBlocking";
pub const ASYNC_BUILDER: &str = "async";
pub const AWAIT_ACCESSOR: &str = "await";
pub const CANCELLATION_EXCEPTION: &str = "CancellationException";
pub const NON_CANCELLABLE: &str = "NonCancellable";
pub const CONTEXT_SWITCH: &str = "withContext";
pub const ACTIVE_CHECK: &str = "isActive";
pub const ENSURE_ACTIVE: &str = "ensureActive";
pub const DISPATCHERS: &str = "Dispatchers";
pub const UNCONFINED: &str = "Unconfined";

pub fn is_task_builder(name: &str) -> bool {
    TASK_BUILDERS.contains(&name)
}

pub fn is_scope_entry(name: &str) -> bool {
    SCOPE_ENTRY_CALLS.contains(&name)
}

pub fn is_context_switch(name: &str) -> bool {
    CONTEXT_SWITCH_CALLS.contains(&name)
}

pub fn is_builder_lambda_owner(name: &str) -> bool {
    BUILDER_LAMBDA_OWNERS.contains(&name)
}

pub fn is_transparent_lambda_owner(name: &str) -> bool {
    TRANSPARENT_LAMBDA_OWNERS.contains(&name)
}

pub fn is_framework_scope(name: &str) -> bool {
    FRAMEWORK_SCOPES.contains(&name)
}

pub fn is_structured_marker(annotation: &str) -> bool {
    STRUCTURED_MARKERS.contains(&annotation.trim_start_matches('@'))
}

pub fn is_scope_constructor(name: &str) -> bool {
    SCOPE_CONSTRUCTORS.contains(&name)
}

pub fn is_lifecycle_token_constructor(name: &str) -> bool {
    LIFECYCLE_TOKEN_CONSTRUCTORS.contains(&name)
}

pub fn is_batch_await(name: &str) -> bool {
    BATCH_AWAITS.contains(&name)
}

pub fn is_cooperation_point(name: &str) -> bool {
    COOPERATION_POINTS.contains(&name)
}

pub fn is_suspending_call(name: &str) -> bool {
    SUSPENDING_CALLS.contains(&name)
}

pub fn is_general_exception_type(name: &str) -> bool {
    GENERAL_EXCEPTION_TYPES.contains(&name)
}

/// Reduces a possibly qualified or constructor-style supertype entry to its
/// simple name: `kotlinx.coroutines.CancellationException(msg)` becomes
/// `CancellationException`.
pub fn simple_type_name(entry: &str) -> &str {
    let base = entry.split('(').next().unwrap_or(entry).trim();
    base.rsplit('.').next().unwrap_or(base)
}
