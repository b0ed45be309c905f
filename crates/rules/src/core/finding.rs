use crate::core::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub offset: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, offset: usize) -> Self {
        Self {
            file: file.into(),
            offset,
        }
    }
}

/// One detection, stamped with its resolved severity. Immutable once created;
/// host adapters translate it into a compiler diagnostic, editor annotation,
/// or lint report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub primary_location: Location,
    /// Supporting site, e.g. the earlier `cancel` of a scope-reuse finding.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub secondary_location: Option<Location>,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        primary_location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            primary_location,
            secondary_location: None,
        }
    }

    pub fn with_secondary_location(mut self, location: Location) -> Self {
        self.secondary_location = Some(location);
        self
    }
}
