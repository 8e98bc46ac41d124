use crate::core::{
    filters::OrientationFilter,
    rules::{RuleSet, RuleTable},
    scoring::calculate_match_score,
};
use crate::models::{MatchRecord, MatchSet, MatchSummary, Profile};
use std::collections::HashSet;

/// Main matching orchestrator - scores every eligible ordered pair
///
/// # Pipeline Stages
/// 1. Self-pair exclusion
/// 2. Orientation filtering
/// 3. Dealbreaker scoring
/// 4. Zero-score pruning and per-user summaries
///
/// Cost is `n * (n - 1)` filter evaluations for `n` profiles.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: RuleTable,
    filter: OrientationFilter,
    require_mutual: bool,
}

impl Matcher {
    pub fn new(rules: RuleTable, filter: OrientationFilter) -> Self {
        Self {
            rules,
            filter,
            require_mutual: false,
        }
    }

    pub fn from_rule_set(rule_set: RuleSet) -> Self {
        Self::new(rule_set.rules, rule_set.orientation)
    }

    pub fn with_reference_rules() -> Self {
        Self::new(RuleTable::reference(), OrientationFilter::reference())
    }

    /// Also require the subject to be eligible for the candidate
    pub fn require_mutual(mut self, require_mutual: bool) -> Self {
        self.require_mutual = require_mutual;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Whether `candidate` may be scored for `subject`
    #[inline]
    pub fn is_candidate(&self, subject: &Profile, candidate: &Profile) -> bool {
        if subject.id == candidate.id {
            return false;
        }

        if self.require_mutual {
            self.filter.is_mutual(subject, candidate)
        } else {
            self.filter.is_eligible(subject, candidate)
        }
    }

    /// Score one ordered pair
    #[inline]
    pub fn score(&self, subject: &Profile, candidate: &Profile) -> u32 {
        calculate_match_score(&self.rules, subject, candidate)
    }

    /// Compute every match record and summary for a profile pool
    ///
    /// Records and summaries come out in iteration order of `profiles`, so the
    /// same input always yields the same set. Later duplicates of an id are
    /// ignored.
    pub fn compute(&self, profiles: &[Profile]) -> MatchSet {
        let mut seen = HashSet::with_capacity(profiles.len());
        let pool: Vec<&Profile> = profiles
            .iter()
            .filter(|profile| {
                let first = seen.insert(profile.id.as_str());
                if !first {
                    tracing::warn!("Ignoring duplicate profile id {}", profile.id);
                }
                first
            })
            .collect();

        let mut set = MatchSet::default();

        for subject in &pool {
            if self.filter.allowed_for_profile(subject).is_none() {
                tracing::debug!(
                    "No orientation criteria for {} ({}), skipping",
                    subject.id,
                    subject.gender_orientation()
                );
            }

            let mut summary = MatchSummary::new(subject.id.clone());

            for candidate in &pool {
                if subject.id == candidate.id {
                    continue;
                }
                set.pairs_examined += 1;

                if !self.is_candidate(subject, candidate) {
                    continue;
                }
                set.eligible_pairs += 1;

                let score = self.score(subject, candidate);
                if score == 0 {
                    continue;
                }

                set.records.push(MatchRecord {
                    user_id: subject.id.clone(),
                    matched_user_id: candidate.id.clone(),
                    score,
                });
                summary.push(candidate.id.clone(), score);
            }

            if !summary.is_empty() {
                set.summaries.push(summary);
            }
        }

        set
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_reference_rules()
    }
}
