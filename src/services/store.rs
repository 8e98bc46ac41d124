use crate::models::{MatchRecord, MatchSet, MatchSummary, Profile};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable keyed storage for profiles and derived matches
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace profiles, their dealbreakers and likes, atomically
    async fn upsert_profiles(&self, profiles: &[Profile]) -> Result<usize, StoreError>;

    /// Load every profile, ordered by id
    async fn load_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Delete all match records and summaries, returning the number of records removed
    async fn clear_matches(&self) -> Result<u64, StoreError>;

    /// Atomically swap the stored matches for `set`
    async fn replace_matches(&self, set: &MatchSet) -> Result<(), StoreError>;

    /// Match records with `score >= min_score`, ordered by user then match
    async fn matches_at_least(&self, min_score: u32) -> Result<Vec<MatchRecord>, StoreError>;

    /// Every stored summary, ordered by user id
    async fn match_summaries(&self) -> Result<Vec<MatchSummary>, StoreError>;

    /// Health check for the store connection
    async fn health_check(&self) -> Result<bool, StoreError>;
}
