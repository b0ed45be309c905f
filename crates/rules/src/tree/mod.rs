//! Host-agnostic syntax representation
//!
//! The analyzer never parses source itself; each host (compiler pass, editor
//! inspection, batch lint) owns a frontend and translates its native tree into
//! this minimal node-shape abstraction through [`TreeBuilder`]. The shapes are
//! deliberately limited to what the rule catalog examines: call expressions,
//! declarations, catch clauses, loops, and the expression glue between them.
//! Anything a host cannot map onto these shapes is simply absent from the
//! tree, which makes the corresponding detections silently skip rather than
//! misfire.

pub mod builder;
pub mod facts;
pub mod node;

pub use builder::TreeBuilder;
pub use node::{ChildRole, LoopKind, NodeId, NodeKind, Span, SyntaxTree};
