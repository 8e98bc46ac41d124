// Unit tests for Lume Compat

use lume_compat::core::{
    calculate_match_score, filters::OrientationFilter, rules::MAX_RULE_SCORE, Matcher, RuleSet,
    RuleTable,
};
use lume_compat::models::{Category, Dealbreakers, Profile, ProfileRecord};
use std::io::Write;
use validator::Validate;

fn dealbreakers(values: [&str; 5]) -> Dealbreakers {
    Dealbreakers {
        drinking: Some(values[0].to_string()),
        relationship_type: Some(values[1].to_string()),
        religion: Some(values[2].to_string()),
        smoking: Some(values[3].to_string()),
        wants_kids: Some(values[4].to_string()),
    }
}

fn create_test_profile(
    id: &str,
    gender: &str,
    orientation: &str,
    dealbreakers: Dealbreakers,
) -> Profile {
    Profile {
        id: id.to_string(),
        name: format!("User {}", id),
        age: 30,
        bio: None,
        gender: gender.to_string(),
        orientation: orientation.to_string(),
        dealbreakers,
        liked_ids: vec![],
    }
}

const BASELINE: [&str; 5] = ["Socially", "Long-Term", "Spiritual", "Never", "Maybe"];

#[test]
fn test_score_identical_dealbreakers() {
    let rules = RuleTable::reference();
    let a = create_test_profile("a", "Male", "Straight", dealbreakers(BASELINE));
    let b = create_test_profile("b", "Female", "Straight", dealbreakers(BASELINE));

    assert_eq!(calculate_match_score(&rules, &a, &b), 10);
    assert_eq!(calculate_match_score(&rules, &b, &a), 10);
}

#[test]
fn test_score_is_bounded() {
    let rules = RuleTable::reference();
    let values = [
        ["Never", "Casual", "Non-religious", "Never", "Yes"],
        ["Socially", "Long-Term", "Spiritual", "Socially", "Maybe"],
        ["Regularly", "Marriage-minded", "Religious", "Regularly", "No"],
    ];

    for subject in values {
        for candidate in values {
            let a = create_test_profile("a", "Male", "Straight", dealbreakers(subject));
            let b = create_test_profile("b", "Female", "Straight", dealbreakers(candidate));
            let score = calculate_match_score(&rules, &a, &b);
            assert!(score <= MAX_RULE_SCORE * Category::ALL.len() as u32);
        }
    }
}

#[test]
fn test_score_opposites_is_zero() {
    let rules = RuleTable::reference();
    let a = create_test_profile(
        "a",
        "Male",
        "Straight",
        dealbreakers(["Regularly", "Casual", "Non-religious", "Regularly", "Yes"]),
    );
    let b = create_test_profile(
        "b",
        "Female",
        "Straight",
        dealbreakers(["Never", "Marriage-minded", "Religious", "Never", "No"]),
    );

    assert_eq!(calculate_match_score(&rules, &a, &b), 0);
}

#[test]
fn test_score_ignores_missing_and_unknown_values() {
    let rules = RuleTable::reference();
    let mut partial = dealbreakers(BASELINE);
    partial.drinking = None;
    partial.religion = Some("Pastafarian".to_string());

    let a = create_test_profile("a", "Male", "Straight", partial);
    let b = create_test_profile("b", "Female", "Straight", dealbreakers(BASELINE));

    // relationship_type + smoking + wants_kids
    assert_eq!(calculate_match_score(&rules, &a, &b), 6);
    assert_eq!(calculate_match_score(&rules, &b, &a), 6);
}

#[test]
fn test_score_with_no_dealbreakers() {
    let rules = RuleTable::reference();
    let a = create_test_profile("a", "Male", "Straight", Dealbreakers::default());
    let b = create_test_profile("b", "Female", "Straight", dealbreakers(BASELINE));

    assert_eq!(calculate_match_score(&rules, &a, &b), 0);
}

#[test]
fn test_orientation_filter_directional_for_bisexual() {
    let filter = OrientationFilter::reference();
    let straight = create_test_profile("a", "Male", "Straight", Dealbreakers::default());
    let bisexual = create_test_profile("b", "Female", "Bisexual", Dealbreakers::default());

    assert!(filter.is_eligible(&straight, &bisexual));
    assert!(!filter.is_eligible(&bisexual, &straight));
    assert!(!filter.is_mutual(&straight, &bisexual));
}

#[test]
fn test_orientation_filter_rejects_unknown_labels() {
    let filter = OrientationFilter::reference();
    let a = create_test_profile("a", "Male", "Straight", Dealbreakers::default());
    let unknown = create_test_profile("b", "Female", "Asexual", Dealbreakers::default());

    assert!(!filter.is_eligible(&a, &unknown));
    assert!(!filter.is_eligible(&unknown, &a));
}

#[test]
fn test_matcher_require_mutual_drops_one_way_pairs() {
    let profiles = vec![
        create_test_profile("a", "Male", "Straight", dealbreakers(BASELINE)),
        create_test_profile("b", "Female", "Bisexual", dealbreakers(BASELINE)),
    ];

    let directional = Matcher::with_reference_rules().compute(&profiles);
    assert_eq!(directional.records.len(), 1);
    assert_eq!(directional.records[0].user_id, "a");

    let mutual = Matcher::with_reference_rules().require_mutual(true).compute(&profiles);
    assert!(mutual.records.is_empty());
    assert!(mutual.summaries.is_empty());
}

#[test]
fn test_rule_set_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [scores]
        drinking = [["Never", "Never", 2], ["Never", "Socially", 2]]

        [orientation]
        "Female Bisexual" = ["Male Straight"]
        "Male Straight" = ["Female Bisexual"]
        "#
    )
    .unwrap();

    let rule_set = RuleSet::load_from(file.path()).unwrap();

    assert_eq!(rule_set.rules.len(Category::Drinking), 2);
    assert_eq!(rule_set.rules.lookup(Category::Drinking, "Never", "Socially"), 2);
    assert_eq!(rule_set.rules.lookup(Category::Drinking, "Socially", "Socially"), 0);
    // Untouched sections keep the built-in values
    assert_eq!(rule_set.rules.len(Category::WantsKids), 9);

    let profiles = vec![
        create_test_profile("a", "Male", "Straight", dealbreakers(BASELINE)),
        create_test_profile("b", "Female", "Bisexual", dealbreakers(BASELINE)),
    ];
    let set = Matcher::from_rule_set(rule_set).require_mutual(true).compute(&profiles);

    // Socially/Socially no longer scores, the other four categories do
    assert_eq!(set.records.len(), 2);
    assert!(set.records.iter().all(|r| r.score == 8));
}

#[test]
fn test_rule_set_rejects_out_of_range_scores() {
    let result = RuleSet::from_toml_str(
        r#"
        [scores]
        smoking = [["Never", "Never", 3]]
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn test_rule_set_missing_file() {
    assert!(RuleSet::load_from("/nonexistent/rules.toml").is_err());
}

#[test]
fn test_profile_record_validation() {
    let valid: ProfileRecord = serde_json::from_str(
        r#"{"id": "u1", "name": "Sam", "age": 31, "gender": "Non-Binary", "orientation": "Queer"}"#,
    )
    .unwrap();
    assert!(valid.validate().is_ok());

    let profile = Profile::from(valid);
    assert!(profile.dealbreakers.is_empty());
    assert!(profile.liked_ids.is_empty());

    let invalid: ProfileRecord = serde_json::from_str(
        r#"{"id": "", "name": "Sam", "age": 31, "gender": "Non-Binary", "orientation": "Queer"}"#,
    )
    .unwrap();
    assert!(invalid.validate().is_err());
}

#[test]
fn test_non_binary_profiles_match_by_gender() {
    let profiles = vec![
        create_test_profile("n1", "Non-Binary", "Queer", dealbreakers(BASELINE)),
        create_test_profile("n2", "Non-Binary", "Pansexual", dealbreakers(BASELINE)),
    ];

    let set = Matcher::with_reference_rules().compute(&profiles);

    assert_eq!(set.records.len(), 2);
    assert_eq!(set.summaries.len(), 2);
}

#[test]
fn test_shipped_rules_file_loads() {
    let rule_set = RuleSet::load_from("config/rules.toml").unwrap();

    // The shipped file gives bisexual labels their own criteria
    let a = create_test_profile("a", "Male", "Straight", dealbreakers(BASELINE));
    let b = create_test_profile("b", "Female", "Bisexual", dealbreakers(BASELINE));
    assert!(rule_set.orientation.is_mutual(&a, &b));
    assert_eq!(rule_set.rules.lookup(Category::WantsKids, "Maybe", "Maybe"), 2);
}
