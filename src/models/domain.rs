use serde::{Deserialize, Serialize};
use std::fmt;

/// Dealbreaker category tracked by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Drinking,
    RelationshipType,
    Religion,
    Smoking,
    WantsKids,
}

impl Category {
    /// Every category, in scoring order
    pub const ALL: [Category; 5] = [
        Category::Drinking,
        Category::RelationshipType,
        Category::Religion,
        Category::Smoking,
        Category::WantsKids,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Drinking => "drinking",
            Category::RelationshipType => "relationship_type",
            Category::Religion => "religion",
            Category::Smoking => "smoking",
            Category::WantsKids => "wants_kids",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five categorical preferences attached to a profile
///
/// Every attribute is optional. An absent attribute contributes nothing to a
/// score and is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealbreakers {
    #[serde(default)]
    pub drinking: Option<String>,
    #[serde(default)]
    pub relationship_type: Option<String>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub smoking: Option<String>,
    #[serde(default)]
    pub wants_kids: Option<String>,
}

impl Dealbreakers {
    /// Value recorded for a category, if any
    #[inline]
    pub fn get(&self, category: Category) -> Option<&str> {
        let value = match category {
            Category::Drinking => &self.drinking,
            Category::RelationshipType => &self.relationship_type,
            Category::Religion => &self.religion,
            Category::Smoking => &self.smoking,
            Category::WantsKids => &self.wants_kids,
        };
        value.as_deref()
    }

    /// Trim every value and turn blank ones into absent ones
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            drinking: clean(self.drinking),
            relationship_type: clean(self.relationship_type),
            religion: clean(self.religion),
            smoking: clean(self.smoking),
            wants_kids: clean(self.wants_kids),
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_none())
    }
}

/// Dating profile as held by the profile store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u16,
    #[serde(default)]
    pub bio: Option<String>,
    pub gender: String,
    pub orientation: String,
    #[serde(default)]
    pub dealbreakers: Dealbreakers,
    /// Profiles this user liked. Stored, not used for matching.
    #[serde(default)]
    pub liked_ids: Vec<String>,
}

impl Profile {
    /// Combined label used by the orientation filter, e.g. `Male Straight`
    pub fn gender_orientation(&self) -> String {
        format!("{} {}", self.gender, self.orientation)
    }
}

/// Directed, scored edge from `user_id` to `matched_user_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    pub user_id: String,
    pub matched_user_id: String,
    pub score: u32,
}

impl MatchRecord {
    pub fn pair(&self) -> MatchPair {
        MatchPair {
            user1_id: self.user_id.clone(),
            user2_id: self.matched_user_id.clone(),
        }
    }
}

/// Ordered pair of profile ids as sent to the match validator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    pub user1_id: String,
    pub user2_id: String,
}

impl fmt::Display for MatchPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.user1_id, self.user2_id)
    }
}

/// All outgoing matches of one user, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub user_id: String,
    pub matched_ids: Vec<String>,
    pub scores: Vec<u32>,
}

impl MatchSummary {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            matched_ids: Vec::new(),
            scores: Vec::new(),
        }
    }

    pub fn push(&mut self, matched_id: impl Into<String>, score: u32) {
        self.matched_ids.push(matched_id.into());
        self.scores.push(score);
    }

    pub fn is_empty(&self) -> bool {
        self.matched_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matched_ids.len()
    }
}

/// Complete output of one recomputation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    pub records: Vec<MatchRecord>,
    pub summaries: Vec<MatchSummary>,
    pub pairs_examined: usize,
    pub eligible_pairs: usize,
}
