use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::Severity;

/// Named convenience presets that populate severities in bulk; an explicit
/// per-rule override still wins over whatever a profile assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Strict,
    Gradual,
    Relaxed,
    #[default]
    None,
}

/// One analysis session's configuration snapshot.
///
/// Severity overrides are kept as the raw strings the host handed over;
/// parsing happens at resolution time so that casing differences and
/// unrecognized values fall back to defaults instead of failing the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleConfig {
    pub severity_overrides: BTreeMap<String, String>,
    pub profile: Profile,
    /// A disabled rule simply never produces a finding; there is no "off"
    /// severity level.
    pub disabled_rules: BTreeSet<String>,
    pub excluded_unit_names: BTreeSet<String>,
    pub excluded_project_paths: BTreeSet<String>,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn override_severity(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.severity_overrides
            .insert(rule_id.into(), severity.to_string());
        self
    }

    /// Raw form for hosts forwarding unvalidated configuration values.
    pub fn override_severity_raw(
        mut self,
        rule_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.severity_overrides.insert(rule_id.into(), value.into());
        self
    }

    pub fn disable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule_id.into());
        self
    }

    pub fn exclude_unit(mut self, unit: impl Into<String>) -> Self {
        self.excluded_unit_names.insert(unit.into());
        self
    }

    pub fn exclude_path(mut self, path: impl Into<String>) -> Self {
        self.excluded_project_paths.insert(path.into());
        self
    }

    /// The coarse gate in front of the dispatcher: an excluded unit produces
    /// no findings at all, regardless of severity configuration.
    pub fn excludes(&self, unit: &str, path: Option<&str>) -> bool {
        if self.excluded_unit_names.contains(unit) {
            return true;
        }
        match path {
            Some(p) => self
                .excluded_project_paths
                .iter()
                .any(|prefix| p.starts_with(prefix.as_str())),
            None => false,
        }
    }
}
