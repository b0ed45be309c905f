use thiserror::Error;

/// Misconfiguration of the rule table itself. This is a programming error in
/// the catalog, surfaced at registry construction before any tree is
/// analyzed; per-node resolution failures never raise, they skip.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate rule id `{0}` in catalog")]
    DuplicateRuleId(String),
}
