use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Dealbreakers, MatchPair, Profile};

/// Profile record as delivered by the profile feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRecord {
    #[validate(custom(function = "not_blank"))]
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub age: u16,
    #[serde(default)]
    pub bio: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub gender: String,
    #[validate(custom(function = "not_blank"))]
    pub orientation: String,
    #[serde(default)]
    pub dealbreakers: Option<Dealbreakers>,
    #[serde(default)]
    pub liked_users: Vec<String>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Profile {
            id: record.id.trim().to_string(),
            name: record.name.trim().to_string(),
            age: record.age,
            bio: record.bio,
            gender: record.gender.trim().to_string(),
            orientation: record.orientation.trim().to_string(),
            dealbreakers: record.dealbreakers.unwrap_or_default().normalized(),
            liked_ids: record.liked_users,
        }
    }
}

/// Rejects empty and whitespace-only values, which would be stored trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Request body for the match validation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateMatchesRequest {
    pub matches: Vec<MatchPair>,
}
