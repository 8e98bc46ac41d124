use crate::core::Matcher;
use crate::models::{Category, Profile};
use crate::services::{ProfileSource, ProfileStore, SourceError, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

/// Failures that abort a pipeline operation
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),

    #[error("Profile source error: {0}")]
    Source(#[from] SourceError),
}

/// Outcome of an ingestion
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub fetched: usize,
    pub stored: usize,
    pub rejected: usize,
}

/// Outcome of one match recomputation
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeReport {
    pub run_id: Uuid,
    pub profiles_loaded: usize,
    pub pairs_examined: usize,
    pub eligible_pairs: usize,
    pub records_written: usize,
    pub summaries_written: usize,
    pub completed_at: DateTime<Utc>,
}

/// Pull every record from `source`, validate it and upsert the valid ones
///
/// Invalid records are skipped. A source failure aborts before anything is
/// written; the valid set is stored in one transaction.
pub async fn ingest_profiles<S, P>(
    source: &S,
    store: &P,
    matcher: &Matcher,
) -> Result<IngestReport, PipelineError>
where
    S: ProfileSource + ?Sized,
    P: ProfileStore + ?Sized,
{
    let records = source.fetch_profiles().await.map_err(|e| {
        tracing::error!("Failed to fetch profiles, nothing ingested: {}", e);
        e
    })?;
    let fetched = records.len();

    let mut profiles = Vec::with_capacity(fetched);
    for record in records {
        if let Err(errors) = record.validate() {
            tracing::warn!("Skipping invalid profile record {:?}: {}", record.id, errors);
            continue;
        }

        let profile = Profile::from(record);
        warn_unknown_values(matcher, &profile);
        profiles.push(profile);
    }

    let stored = store.upsert_profiles(&profiles).await?;

    let report = IngestReport {
        fetched,
        stored,
        rejected: fetched - profiles.len(),
    };

    tracing::info!(
        "Ingested {} of {} profile records ({} rejected)",
        report.stored,
        report.fetched,
        report.rejected
    );

    Ok(report)
}

fn warn_unknown_values(matcher: &Matcher, profile: &Profile) {
    for category in Category::ALL {
        if let Some(value) = profile.dealbreakers.get(category) {
            if !matcher.rules().knows_value(category, value) {
                tracing::warn!(
                    "Profile {} has unrecognised {} value {:?}; it will score 0",
                    profile.id,
                    category,
                    value
                );
            }
        }
    }
}

/// Delete every match record and summary
pub async fn clear_matches<P>(store: &P) -> Result<u64, PipelineError>
where
    P: ProfileStore + ?Sized,
{
    Ok(store.clear_matches().await?)
}

/// Regenerate all match records and summaries from the stored profiles
///
/// The old matches are only dropped once the new set has been computed, and
/// the swap happens in one store transaction.
pub async fn recompute_matches<P>(
    store: &P,
    matcher: &Matcher,
) -> Result<RecomputeReport, PipelineError>
where
    P: ProfileStore + ?Sized,
{
    let run_id = Uuid::new_v4();

    async move {
        let profiles = store.load_profiles().await.map_err(|e| {
            tracing::error!("Failed to load profiles, existing matches kept: {}", e);
            e
        })?;

        tracing::info!("Loaded {} profiles", profiles.len());

        let set = matcher.compute(&profiles);

        store.replace_matches(&set).await.map_err(|e| {
            tracing::error!("Failed to persist matches: {}", e);
            e
        })?;

        let report = RecomputeReport {
            run_id,
            profiles_loaded: profiles.len(),
            pairs_examined: set.pairs_examined,
            eligible_pairs: set.eligible_pairs,
            records_written: set.records.len(),
            summaries_written: set.summaries.len(),
            completed_at: Utc::now(),
        };

        tracing::info!(
            "Recomputed matches: {} records, {} summaries from {} eligible of {} pairs",
            report.records_written,
            report.summaries_written,
            report.eligible_pairs,
            report.pairs_examined
        );

        Ok::<_, PipelineError>(report)
    }
    .instrument(tracing::info_span!("recompute", %run_id))
    .await
}
