// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Category, Dealbreakers, Profile, MatchRecord, MatchPair, MatchSummary, MatchSet};
pub use requests::{ProfileRecord, ValidateMatchesRequest};
pub use responses::{ProfilesResponse, ValidateMatchesResponse};
