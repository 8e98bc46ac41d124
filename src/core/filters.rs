use crate::models::Profile;
use std::collections::{BTreeMap, HashSet};

/// Orientation compatibility filter
///
/// Maps a subject's combined `"<gender> <orientation>"` label to the labels it
/// may be matched with. The relation is directional: `B` being eligible for `A`
/// says nothing about `A` being eligible for `B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationFilter {
    allowed: BTreeMap<String, HashSet<String>>,
}

impl OrientationFilter {
    pub fn new<I, L>(map: I) -> Self
    where
        I: IntoIterator<Item = (String, L)>,
        L: IntoIterator<Item = String>,
    {
        let allowed = map
            .into_iter()
            .map(|(label, targets)| (label, targets.into_iter().collect()))
            .collect();

        Self { allowed }
    }

    /// Built-in orientation map
    pub fn reference() -> Self {
        Self::new(REFERENCE_CRITERIA.iter().map(|(label, targets)| {
            (
                label.to_string(),
                targets.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            )
        }))
    }

    /// Allowed candidate labels for a subject label
    pub fn allowed_for(&self, label: &str) -> Option<&HashSet<String>> {
        self.allowed.get(label)
    }

    /// Allowed candidate labels for a profile, or `None` if its gender and
    /// orientation are not recognised
    ///
    /// The combined label is tried first, then the bare gender.
    pub fn allowed_for_profile(&self, profile: &Profile) -> Option<&HashSet<String>> {
        self.allowed_for(&profile.gender_orientation())
            .or_else(|| self.allowed_for(&profile.gender))
    }

    /// Check whether `candidate` is an eligible match for `subject`
    #[inline]
    pub fn is_eligible(&self, subject: &Profile, candidate: &Profile) -> bool {
        let Some(allowed) = self.allowed_for_profile(subject) else {
            return false;
        };

        allowed.contains(&candidate.gender_orientation()) || allowed.contains(&candidate.gender)
    }

    /// Check eligibility in both directions
    #[inline]
    pub fn is_mutual(&self, a: &Profile, b: &Profile) -> bool {
        self.is_eligible(a, b) && self.is_eligible(b, a)
    }
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self::reference()
    }
}

// "Non-Binary" is keyed by gender alone. It is reached through the bare-gender
// fallback in `allowed_for_profile`, so Non-Binary profiles get candidates
// whatever their orientation text is.
const REFERENCE_CRITERIA: &[(&str, &[&str])] = &[
    ("Male Straight", &["Female Straight", "Female Bisexual"]),
    ("Female Straight", &["Male Straight", "Male Bisexual"]),
    ("Male Gay", &["Male Gay", "Male Bisexual"]),
    ("Female Lesbian", &["Female Lesbian", "Female Bisexual"]),
    ("Non-Binary", &["Non-Binary"]),
];
