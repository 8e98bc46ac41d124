use serde::{Deserialize, Serialize};
use crate::models::requests::ProfileRecord;

/// Response body of the profile feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub users: Vec<ProfileRecord>,
}

/// Response body of the match validation service
///
/// A missing `success` field counts as a rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateMatchesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
