//! corolint-rules - structured-concurrency misuse analysis
//!
//! A host-agnostic analysis core shared by three surfaces: a compiler check,
//! an editor inspection, and a batch lint rule. Hosts parse source with their
//! own frontend, translate the result into the crate's node-shape abstraction
//! through [`TreeBuilder`], and call [`analyze`]; back comes an ordered list
//! of findings with resolved severities, ready to render as diagnostics,
//! annotations, or report lines.
//!
//! ```
//! use corolint_rules::{analyze, ChildRole, NodeKind, RuleConfig, TreeBuilder};
//!
//! let mut b = TreeBuilder::new("Fire.kt");
//! b.open(NodeKind::function("fire"));
//! b.open_as(ChildRole::Body, NodeKind::Block);
//! b.open(NodeKind::call("launch"));
//! b.leaf_as(ChildRole::Receiver, NodeKind::reference("GlobalScope"));
//! b.leaf_as(ChildRole::Body, NodeKind::Lambda);
//! let tree = b.finish();
//!
//! let report = analyze(&tree, &RuleConfig::default()).unwrap();
//! assert!(report.findings().iter().any(|f| f.rule_id == "globalScopeUsage"));
//! ```

pub mod analysis;
pub mod catalog;
pub mod core;
pub mod runner;
pub mod tree;

pub use crate::core::{CatalogError, Finding, Location, Profile, RuleConfig, Severity};
pub use catalog::{ids, Detection, NodeShape, Rule, RuleContext, CATALOG};
pub use runner::{AnalysisEngine, AnalysisReport, RuleInfo, RuleRegistry, SeverityCount};
pub use tree::{ChildRole, LoopKind, NodeId, NodeKind, Span, SyntaxTree, TreeBuilder};

/// One-shot convenience over [`AnalysisEngine`] for hosts that analyze a unit
/// at a time.
pub fn analyze(tree: &SyntaxTree, config: &RuleConfig) -> anyhow::Result<AnalysisReport> {
    let engine = AnalysisEngine::new()?;
    Ok(engine.analyze(tree, config))
}
