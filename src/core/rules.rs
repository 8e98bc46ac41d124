use crate::core::filters::OrientationFilter;
use crate::models::Category;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Highest contribution a single category may make
pub const MAX_RULE_SCORE: u32 = 2;

/// Errors raised while building or loading a rule set
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rules file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "Score {score} for {category} ({subject}, {candidate}) is outside 0..={max}",
        max = MAX_RULE_SCORE
    )]
    ScoreOutOfRange {
        category: Category,
        subject: String,
        candidate: String,
        score: u32,
    },

    #[error("Duplicate rule for {category} ({subject}, {candidate})")]
    DuplicateRule {
        category: Category,
        subject: String,
        candidate: String,
    },
}

/// Compatibility rule table: category -> (subject value, candidate value) -> score
///
/// Entries are directional. `(X, Y)` and `(Y, X)` are looked up independently
/// and any pair not in the table scores 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    tables: HashMap<Category, HashMap<String, HashMap<String, u32>>>,
}

impl RuleTable {
    /// Table with no entries; every lookup scores 0
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Built-in reference rules
    pub fn reference() -> Self {
        Self::try_reference().expect("built-in rule table has a duplicate or out-of-range entry")
    }

    fn try_reference() -> Result<Self, RulesError> {
        let mut table = Self::empty();
        for (category, entries) in REFERENCE_RULES {
            for (subject, candidate, score) in *entries {
                table.insert(*category, subject, candidate, *score)?;
            }
        }
        Ok(table)
    }

    /// Add one directional entry
    pub fn insert(
        &mut self,
        category: Category,
        subject: &str,
        candidate: &str,
        score: u32,
    ) -> Result<(), RulesError> {
        if score > MAX_RULE_SCORE {
            return Err(RulesError::ScoreOutOfRange {
                category,
                subject: subject.to_string(),
                candidate: candidate.to_string(),
                score,
            });
        }

        let row = self
            .tables
            .entry(category)
            .or_default()
            .entry(subject.to_string())
            .or_default();

        if row.contains_key(candidate) {
            return Err(RulesError::DuplicateRule {
                category,
                subject: subject.to_string(),
                candidate: candidate.to_string(),
            });
        }

        row.insert(candidate.to_string(), score);
        Ok(())
    }

    /// Contribution of `(subject, candidate)` in `category`, 0 when unlisted
    #[inline]
    pub fn lookup(&self, category: Category, subject: &str, candidate: &str) -> u32 {
        self.tables
            .get(&category)
            .and_then(|rows| rows.get(subject))
            .and_then(|row| row.get(candidate))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `value` appears on either side of any entry in `category`
    pub fn knows_value(&self, category: Category, value: &str) -> bool {
        self.tables.get(&category).is_some_and(|rows| {
            rows.contains_key(value) || rows.values().any(|row| row.contains_key(value))
        })
    }

    /// Number of entries in `category`
    pub fn len(&self, category: Category) -> usize {
        self.tables
            .get(&category)
            .map(|rows| rows.values().map(HashMap::len).sum())
            .unwrap_or(0)
    }

    fn replace_category(
        &mut self,
        category: Category,
        entries: &[(String, String, u32)],
    ) -> Result<(), RulesError> {
        self.tables.remove(&category);
        for (subject, candidate, score) in entries {
            self.insert(category, subject, candidate, *score)?;
        }
        Ok(())
    }
}

/// Scoring rules plus orientation map, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: RuleTable,
    pub orientation: OrientationFilter,
}

impl RuleSet {
    /// Load a TOML rules file
    ///
    /// Sections present in the file replace the matching built-in section;
    /// absent sections keep the built-in values.
    ///
    /// ```toml
    /// [scores]
    /// drinking = [["Never", "Never", 2], ["Never", "Socially", 1]]
    ///
    /// [orientation]
    /// "Male Straight" = ["Female Straight", "Female Bisexual"]
    /// ```
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let rule_set = Self::from_toml_str(&content)?;

        tracing::info!("Loaded rule set from {}", path.as_ref().display());

        Ok(rule_set)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RulesError> {
        let file: RulesFile = toml::from_str(content)?;
        let mut rule_set = Self::default();

        if let Some(scores) = file.scores {
            for (category, entries) in scores.sections() {
                if let Some(entries) = entries {
                    rule_set.rules.replace_category(category, entries)?;
                }
            }
        }

        if let Some(orientation) = file.orientation {
            rule_set.orientation = OrientationFilter::new(orientation);
        }

        Ok(rule_set)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesFile {
    #[serde(default)]
    scores: Option<ScoresSection>,
    #[serde(default)]
    orientation: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScoresSection {
    drinking: Option<Vec<(String, String, u32)>>,
    relationship_type: Option<Vec<(String, String, u32)>>,
    religion: Option<Vec<(String, String, u32)>>,
    smoking: Option<Vec<(String, String, u32)>>,
    wants_kids: Option<Vec<(String, String, u32)>>,
}

impl ScoresSection {
    fn sections(&self) -> [(Category, Option<&Vec<(String, String, u32)>>); 5] {
        [
            (Category::Drinking, self.drinking.as_ref()),
            (Category::RelationshipType, self.relationship_type.as_ref()),
            (Category::Religion, self.religion.as_ref()),
            (Category::Smoking, self.smoking.as_ref()),
            (Category::WantsKids, self.wants_kids.as_ref()),
        ]
    }
}

type RuleEntries = &'static [(&'static str, &'static str, u32)];

const REFERENCE_RULES: &[(Category, RuleEntries)] = &[
    (
        Category::Drinking,
        &[
            ("Regularly", "Regularly", 2),
            ("Never", "Never", 2),
            ("Socially", "Socially", 2),
            ("Regularly", "Socially", 1),
            ("Regularly", "Never", 0),
            ("Socially", "Regularly", 1),
            ("Socially", "Never", 1),
            ("Never", "Regularly", 0),
            ("Never", "Socially", 1),
        ],
    ),
    (
        Category::RelationshipType,
        &[
            ("Casual", "Casual", 2),
            ("Long-Term", "Long-Term", 2),
            ("Marriage-minded", "Marriage-minded", 2),
            ("Casual", "Long-Term", 1),
            ("Casual", "Marriage-minded", 0),
            ("Long-Term", "Casual", 1),
            ("Long-Term", "Marriage-minded", 1),
            ("Marriage-minded", "Casual", 0),
            ("Marriage-minded", "Long-Term", 1),
        ],
    ),
    (
        Category::Religion,
        &[
            ("Non-religious", "Non-religious", 2),
            ("Spiritual", "Spiritual", 2),
            ("Religious", "Religious", 2),
            ("Non-religious", "Religious", 0),
            ("Religious", "Non-religious", 0),
            ("Spiritual", "Religious", 1),
            ("Religious", "Spiritual", 1),
            ("Spiritual", "Non-religious", 1),
            ("Non-religious", "Spiritual", 1),
        ],
    ),
    (
        Category::Smoking,
        &[
            ("Regularly", "Regularly", 2),
            ("Socially", "Socially", 2),
            ("Never", "Never", 2),
            ("Regularly", "Never", 0),
            ("Never", "Regularly", 0),
            ("Socially", "Regularly", 1),
            ("Regularly", "Socially", 1),
            ("Socially", "Never", 1),
            ("Never", "Socially", 1),
        ],
    ),
    (
        Category::WantsKids,
        &[
            ("Yes", "Yes", 2),
            ("No", "No", 2),
            ("Maybe", "Maybe", 2),
            ("Yes", "Maybe", 1),
            ("Maybe", "Yes", 1),
            ("No", "Maybe", 1),
            ("Maybe", "No", 1),
            ("Yes", "No", 0),
            ("No", "Yes", 0),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_is_complete() {
        let table = RuleTable::reference();
        for category in Category::ALL {
            assert_eq!(table.len(category), 9, "{} should list every pair", category);
        }
    }

    #[test]
    fn test_lookup_values_in_range() {
        let table = RuleTable::reference();
        let domains: [(Category, [&str; 3]); 5] = [
            (Category::Drinking, ["Never", "Socially", "Regularly"]),
            (Category::RelationshipType, ["Casual", "Long-Term", "Marriage-minded"]),
            (Category::Religion, ["Non-religious", "Spiritual", "Religious"]),
            (Category::Smoking, ["Never", "Socially", "Regularly"]),
            (Category::WantsKids, ["Yes", "No", "Maybe"]),
        ];

        for (category, values) in domains {
            for subject in values {
                assert_eq!(table.lookup(category, subject, subject), 2);
                for candidate in values {
                    assert!(table.lookup(category, subject, candidate) <= MAX_RULE_SCORE);
                }
            }
        }
    }

    #[test]
    fn test_reference_entries_are_valid() {
        let table = RuleTable::try_reference().unwrap();
        assert_eq!(table, RuleTable::reference());
    }

    #[test]
    fn test_unlisted_pair_scores_zero() {
        let table = RuleTable::reference();
        assert_eq!(table.lookup(Category::Drinking, "Sometimes", "Never"), 0);
        assert_eq!(table.lookup(Category::WantsKids, "Yes", "yes"), 0);
        assert_eq!(RuleTable::empty().lookup(Category::Religion, "Spiritual", "Spiritual"), 0);
    }

    #[test]
    fn test_entries_are_directional() {
        let mut table = RuleTable::empty();
        table.insert(Category::Drinking, "Never", "Socially", 1).unwrap();

        assert_eq!(table.lookup(Category::Drinking, "Never", "Socially"), 1);
        assert_eq!(table.lookup(Category::Drinking, "Socially", "Never"), 0);
    }

    #[test]
    fn test_insert_rejects_out_of_range_and_duplicates() {
        let mut table = RuleTable::empty();
        assert!(matches!(
            table.insert(Category::Smoking, "Never", "Never", 3),
            Err(RulesError::ScoreOutOfRange { score: 3, .. })
        ));

        table.insert(Category::Smoking, "Never", "Never", 2).unwrap();
        assert!(matches!(
            table.insert(Category::Smoking, "Never", "Never", 1),
            Err(RulesError::DuplicateRule { .. })
        ));
    }

    #[test]
    fn test_knows_value() {
        let table = RuleTable::reference();
        assert!(table.knows_value(Category::RelationshipType, "Marriage-minded"));
        assert!(!table.knows_value(Category::RelationshipType, "Situationship"));
    }

    #[test]
    fn test_toml_overrides_only_listed_sections() {
        let rule_set = RuleSet::from_toml_str(
            r#"
            [scores]
            drinking = [["Never", "Never", 1]]

            [orientation]
            "Male Straight" = ["Female Straight"]
            "#,
        )
        .unwrap();

        assert_eq!(rule_set.rules.len(Category::Drinking), 1);
        assert_eq!(rule_set.rules.lookup(Category::Drinking, "Never", "Never"), 1);
        assert_eq!(rule_set.rules.lookup(Category::Drinking, "Socially", "Socially"), 0);
        assert_eq!(rule_set.rules.lookup(Category::Smoking, "Never", "Never"), 2);
        assert_eq!(rule_set.orientation.allowed_for("Female Straight"), None);
    }

    #[test]
    fn test_toml_rejects_unknown_category() {
        let result = RuleSet::from_toml_str("[scores]\npets = [[\"Cat\", \"Cat\", 2]]\n");
        assert!(matches!(result, Err(RulesError::Parse(_))));
    }

    #[test]
    fn test_toml_rejects_bad_score() {
        let result = RuleSet::from_toml_str("[scores]\nsmoking = [[\"Never\", \"Never\", 5]]\n");
        assert!(matches!(result, Err(RulesError::ScoreOutOfRange { .. })));
    }
}
