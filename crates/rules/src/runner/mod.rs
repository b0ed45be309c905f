//! Dispatch and aggregation
//!
//! The registry validates the rule table once, the engine walks one tree per
//! invocation, and the report carries the ordered findings to whichever host
//! asked. Nothing here holds state across invocations; concurrent analyses
//! over different trees share only the immutable catalog.

pub mod engine;
pub mod registry;
pub mod report;

pub use engine::AnalysisEngine;
pub use registry::{RuleInfo, RuleRegistry};
pub use report::{AnalysisReport, SeverityCount};
