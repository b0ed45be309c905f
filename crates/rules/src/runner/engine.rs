use tracing::debug;

use crate::catalog::{Detection, RuleContext};
use crate::core::{CatalogError, Finding, Location, RuleConfig, SeverityResolver};
use crate::runner::{AnalysisReport, RuleRegistry};
use crate::tree::SyntaxTree;

/// The dispatcher: one synchronous pre-order walk per tree, consulting every
/// shape-matching rule at every node.
///
/// Output order is a contract: traversal order first, catalog order at each
/// node second, so identical (tree, config) inputs always produce the same
/// report. The engine holds no per-invocation state and can be shared across
/// threads analyzing different trees.
pub struct AnalysisEngine {
    registry: RuleRegistry,
}

impl AnalysisEngine {
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            registry: RuleRegistry::from_catalog()?,
        })
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn analyze(&self, tree: &SyntaxTree, config: &RuleConfig) -> AnalysisReport {
        if config.excludes(tree.unit(), tree.path()) {
            debug!(unit = tree.unit(), "compilation unit excluded from analysis");
            return AnalysisReport::default();
        }

        let resolver = SeverityResolver::new(config);
        let ctx = RuleContext::new(tree);
        let mut findings = Vec::new();

        for node in tree.descendants(tree.root()) {
            for rule in self.registry.rules() {
                if !rule.shape.matches(tree.kind(node)) {
                    continue;
                }
                if config.disabled_rules.contains(rule.id) {
                    continue;
                }
                for detection in (rule.check)(&ctx, node) {
                    let Detection {
                        primary,
                        secondary,
                        message,
                    } = detection;
                    let mut finding = Finding::new(
                        rule.id,
                        resolver.resolve(rule),
                        message,
                        Location::new(tree.unit(), tree.offset(primary)),
                    );
                    if let Some(secondary) = secondary {
                        finding = finding.with_secondary_location(Location::new(
                            tree.unit(),
                            tree.offset(secondary),
                        ));
                    }
                    findings.push(finding);
                }
            }
        }

        AnalysisReport::new(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids;
    use crate::tree::{ChildRole, NodeKind, TreeBuilder};

    fn global_scope_tree() -> SyntaxTree {
        let mut b = TreeBuilder::new("Engine.kt");
        b.open(NodeKind::function("fire"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("GlobalScope"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        b.finish()
    }

    #[test]
    fn excluded_units_produce_no_findings() {
        let engine = AnalysisEngine::new().unwrap();
        let tree = global_scope_tree();
        let config = RuleConfig::new().exclude_unit("Engine.kt");
        assert!(engine.analyze(&tree, &config).is_empty());
    }

    #[test]
    fn excluded_paths_gate_by_prefix() {
        let engine = AnalysisEngine::new().unwrap();
        let mut b = TreeBuilder::new("Engine.kt").with_path("generated/api/Engine.kt");
        b.open(NodeKind::call("launch"));
        b.leaf_as(ChildRole::Receiver, NodeKind::reference("GlobalScope"));
        b.leaf_as(ChildRole::Body, NodeKind::Lambda);
        let tree = b.finish();
        let config = RuleConfig::new().exclude_path("generated/");
        assert!(engine.analyze(&tree, &config).is_empty());
    }

    #[test]
    fn disabled_rules_never_produce_findings() {
        let engine = AnalysisEngine::new().unwrap();
        let tree = global_scope_tree();
        let config = RuleConfig::new().disable_rule(ids::GLOBAL_SCOPE_USAGE);
        let report = engine.analyze(&tree, &config);
        assert!(report
            .findings()
            .iter()
            .all(|f| f.rule_id != ids::GLOBAL_SCOPE_USAGE));
    }

    #[test]
    fn findings_carry_the_unit_name_and_node_offset() {
        let engine = AnalysisEngine::new().unwrap();
        let tree = global_scope_tree();
        let report = engine.analyze(&tree, &RuleConfig::new());
        let finding = report
            .findings()
            .iter()
            .find(|f| f.rule_id == ids::GLOBAL_SCOPE_USAGE)
            .unwrap();
        assert_eq!(finding.primary_location.file, "Engine.kt");
        assert!(finding.primary_location.offset > 0);
    }
}
