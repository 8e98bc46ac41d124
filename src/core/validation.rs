use crate::core::pipeline::PipelineError;
use crate::models::MatchPair;
use crate::services::{MatchValidator, ProfileStore};
use futures::stream::{self, StreamExt};
use serde::Serialize;

/// Minimum score the CLI validates at
pub const DEFAULT_MIN_SCORE: u32 = 10;

/// Result of asking the validator about one pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Confirmed,
    Rejected,
    /// The call itself failed; the pair is unvalidated, not rejected
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedValidation {
    pub pair: MatchPair,
    pub error: String,
}

/// Partitioned validation results, in stored record order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub min_score: u32,
    pub confirmed: Vec<MatchPair>,
    pub rejected: Vec<MatchPair>,
    pub failed: Vec<FailedValidation>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.confirmed.len() + self.rejected.len() + self.failed.len()
    }

    fn record(&mut self, pair: MatchPair, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Confirmed => self.confirmed.push(pair),
            ValidationOutcome::Rejected => self.rejected.push(pair),
            ValidationOutcome::Failed { error } => {
                self.failed.push(FailedValidation { pair, error })
            }
        }
    }
}

/// Ask the validator about one pair, folding call errors into the outcome
pub async fn validate_pair<V>(validator: &V, pair: &MatchPair) -> ValidationOutcome
where
    V: MatchValidator + ?Sized,
{
    match validator.validate(pair).await {
        Ok(true) => ValidationOutcome::Confirmed,
        Ok(false) => {
            tracing::info!("Match {} was rejected by the validator", pair);
            ValidationOutcome::Rejected
        }
        Err(e) => {
            tracing::warn!("Error validating match {}: {}", pair, e);
            ValidationOutcome::Failed { error: e.to_string() }
        }
    }
}

/// Validate every stored match with `score >= min_score`
///
/// At most `concurrency` calls are in flight. No call is retried and a failing
/// call never stops the others; only a store failure aborts.
pub async fn validate_matches<P, V>(
    store: &P,
    validator: &V,
    min_score: u32,
    concurrency: usize,
) -> Result<ValidationReport, PipelineError>
where
    P: ProfileStore + ?Sized,
    V: MatchValidator + ?Sized,
{
    let records = store.matches_at_least(min_score).await?;

    let mut report = ValidationReport {
        min_score,
        ..ValidationReport::default()
    };

    if records.is_empty() {
        tracing::info!("No matches found with a minimum score of {}", min_score);
        return Ok(report);
    }

    tracing::info!(
        "Validating {} matches with a minimum score of {} ({} concurrent)",
        records.len(),
        min_score,
        concurrency.max(1)
    );

    let mut results: Vec<(usize, MatchPair, ValidationOutcome)> =
        stream::iter(records.iter().enumerate())
            .map(|(idx, record)| async move {
                let pair = record.pair();
                let outcome = validate_pair(validator, &pair).await;
                (idx, pair, outcome)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    // Completion order varies with concurrency; report in record order
    results.sort_by_key(|(idx, _, _)| *idx);

    for (_, pair, outcome) in results {
        report.record(pair, outcome);
    }

    tracing::info!(
        "Validation complete: {} valid, {} rejected, {} failed (min score {})",
        report.confirmed.len(),
        report.rejected.len(),
        report.failed.len(),
        min_score
    );

    Ok(report)
}
