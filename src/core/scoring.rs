use crate::core::rules::RuleTable;
use crate::models::{Category, Profile};

/// Calculate the compatibility score of `candidate` for `subject`
///
/// Scoring formula:
/// score = sum over drinking, relationship_type, religion, smoking, wants_kids of
///     rules[category][(subject value, candidate value)]
///
/// A category missing on either side contributes 0. With the reference rules
/// the result is in `0..=10`.
pub fn calculate_match_score(rules: &RuleTable, subject: &Profile, candidate: &Profile) -> u32 {
    Category::ALL
        .iter()
        .map(|&category| category_score(rules, category, subject, candidate))
        .sum()
}

#[inline]
fn category_score(
    rules: &RuleTable,
    category: Category,
    subject: &Profile,
    candidate: &Profile,
) -> u32 {
    match (
        subject.dealbreakers.get(category),
        candidate.dealbreakers.get(category),
    ) {
        (Some(ours), Some(theirs)) => rules.lookup(category, ours, theirs),
        _ => 0,
    }
}
