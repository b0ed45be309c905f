//! Effective-severity resolution
//!
//! Precedence: a parseable explicit override, then the active profile's
//! preset, then the rule's table default. Malformed override values are
//! logged and ignored, so one bad configuration entry degrades a single rule
//! to its fallback instead of failing the session.

use std::collections::BTreeMap;

use tracing::warn;

use crate::catalog::{self, Rule};
use crate::core::{Profile, RuleConfig, Severity};

pub struct SeverityResolver {
    overrides: BTreeMap<String, Severity>,
    profile: Profile,
}

impl SeverityResolver {
    pub fn new(config: &RuleConfig) -> Self {
        let mut overrides = BTreeMap::new();
        for (rule_id, value) in &config.severity_overrides {
            match Severity::parse(value) {
                Some(severity) => {
                    overrides.insert(rule_id.clone(), severity);
                }
                None => warn!(
                    "unrecognized severity override `{value}` for rule `{rule_id}`, using fallback"
                ),
            }
        }
        Self {
            overrides,
            profile: config.profile,
        }
    }

    pub fn resolve(&self, rule: &Rule) -> Severity {
        if let Some(&severity) = self.overrides.get(rule.id) {
            return severity;
        }
        if let Some(severity) = profile_preset(self.profile, rule.id) {
            return severity;
        }
        rule.default_severity
    }
}

fn profile_preset(profile: Profile, rule_id: &str) -> Option<Severity> {
    match profile {
        Profile::Strict => Some(if catalog::STRICT_ERROR_RULES.contains(&rule_id) {
            Severity::Error
        } else {
            Severity::Warning
        }),
        Profile::Gradual | Profile::Relaxed => Some(Severity::Warning),
        Profile::None => None,
    }
}
