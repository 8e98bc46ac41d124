use crate::models::{MatchRecord, MatchSet, MatchSummary, Profile};
use crate::services::store::{ProfileStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process profile store
///
/// Orders ids bytewise, as the PostgreSQL store does with `COLLATE "C"`, so
/// matching runs give identical results against either backend.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<BTreeMap<String, Profile>>,
    matches: RwLock<MatchTables>,
}

#[derive(Default)]
struct MatchTables {
    records: BTreeMap<(String, String), u32>,
    summaries: BTreeMap<String, MatchSummary>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_profiles(profiles: &[Profile]) -> Result<Self, StoreError> {
        let store = Self::new();
        store.upsert_profiles(profiles).await?;
        Ok(store)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn upsert_profiles(&self, profiles: &[Profile]) -> Result<usize, StoreError> {
        let mut stored = self.profiles.write().await;

        for profile in profiles {
            let mut profile = profile.clone();
            if let Some(existing) = stored.get(&profile.id) {
                // Likes accumulate like the liked_profiles table does
                let mut liked = existing.liked_ids.clone();
                for id in profile.liked_ids.drain(..) {
                    if !liked.contains(&id) {
                        liked.push(id);
                    }
                }
                profile.liked_ids = liked;
            }
            profile.liked_ids.sort();
            profile.liked_ids.dedup();
            stored.insert(profile.id.clone(), profile);
        }

        Ok(profiles.len())
    }

    async fn load_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }

    async fn clear_matches(&self) -> Result<u64, StoreError> {
        let mut tables = self.matches.write().await;
        let removed = tables.records.len() as u64;
        tables.records.clear();
        tables.summaries.clear();
        Ok(removed)
    }

    async fn replace_matches(&self, set: &MatchSet) -> Result<(), StoreError> {
        let mut records = BTreeMap::new();
        for record in &set.records {
            records.insert(
                (record.user_id.clone(), record.matched_user_id.clone()),
                record.score,
            );
        }

        let summaries = set
            .summaries
            .iter()
            .map(|s| (s.user_id.clone(), s.clone()))
            .collect();

        *self.matches.write().await = MatchTables { records, summaries };
        Ok(())
    }

    async fn matches_at_least(&self, min_score: u32) -> Result<Vec<MatchRecord>, StoreError> {
        let tables = self.matches.read().await;

        Ok(tables
            .records
            .iter()
            .filter(|(_, score)| **score >= min_score)
            .map(|((user_id, matched_user_id), score)| MatchRecord {
                user_id: user_id.clone(),
                matched_user_id: matched_user_id.clone(),
                score: *score,
            })
            .collect())
    }

    async fn match_summaries(&self) -> Result<Vec<MatchSummary>, StoreError> {
        Ok(self.matches.read().await.summaries.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
