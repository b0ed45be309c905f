use std::collections::HashSet;

use crate::catalog::{self, NodeShape, Rule};
use crate::core::{CatalogError, Severity};

/// The validated, ordered rule table.
///
/// Construction is the fail-fast point for catalog misconfiguration: a
/// duplicate id is a programming error and surfaces here, before any tree is
/// analyzed. Order is preserved from the source table and drives the order of
/// findings at each node.
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn from_catalog() -> Result<Self, CatalogError> {
        Self::with_rules(catalog::CATALOG.to_vec())
    }

    pub fn with_rules(rules: Vec<Rule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id) {
                return Err(CatalogError::DuplicateRuleId(rule.id.to_string()));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id).collect()
    }

    pub fn by_shape(&self, shape: NodeShape) -> Vec<&Rule> {
        self.rules.iter().filter(|rule| rule.shape == shape).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Metadata listing for host configuration surfaces.
    pub fn info(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|rule| RuleInfo {
                id: rule.id,
                name: rule.name,
                description: rule.description,
                shape: rule.shape,
                default_severity: rule.default_severity,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub shape: NodeShape,
    pub default_severity: Severity,
}
