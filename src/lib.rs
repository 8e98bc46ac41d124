//! Lume Compat - dealbreaker compatibility matching for the Lume dating app
//!
//! This library scores every eligible pair of stored profiles against a table
//! of categorical dealbreaker rules, persists the resulting directed matches,
//! and confirms high-scoring pairs with an external validation service.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{
    calculate_match_score, clear_matches, ingest_profiles, recompute_matches, validate_matches,
    Matcher, OrientationFilter, PipelineError, RuleSet, RuleTable,
};
pub use models::{Category, Dealbreakers, MatchPair, MatchRecord, MatchSet, MatchSummary, Profile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::with_reference_rules();
        assert_eq!(matcher.compute(&[]), MatchSet::default());
    }
}
