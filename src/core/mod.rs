// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod pipeline;
pub mod rules;
pub mod scoring;
pub mod validation;

pub use filters::OrientationFilter;
pub use matcher::Matcher;
pub use pipeline::{
    clear_matches, ingest_profiles, recompute_matches, IngestReport, PipelineError, RecomputeReport,
};
pub use rules::{RuleSet, RuleTable, RulesError};
pub use scoring::calculate_match_score;
pub use validation::{
    validate_matches, validate_pair, ValidationOutcome, ValidationReport, DEFAULT_MIN_SCORE,
};
