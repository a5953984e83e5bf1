//! Wire types for the tracker's search endpoint.
//!
//! The endpoint answers with either a bare JSON array of candidates or an
//! object carrying a `results` array. Everything else is an explicit
//! `Unrecognized` variant, which the client degrades to zero results.

use serde::Deserialize;
use serde_json::Value;

/// One search hit. Candidates have no persistent identity; they only exist
/// within a single lookup's response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteCandidate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, alias = "size", alias = "sizeBytes")]
    pub size_bytes: Option<u64>,
}

#[derive(Debug, PartialEq)]
pub enum SearchResponse {
    Candidates(Vec<RemoteCandidate>),
    Unrecognized,
}

impl SearchResponse {
    pub fn into_candidates(self) -> Vec<RemoteCandidate> {
        match self {
            SearchResponse::Candidates(candidates) => candidates,
            SearchResponse::Unrecognized => Vec::new(),
        }
    }
}

pub fn parse_search_response(value: Value) -> SearchResponse {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("results") {
            Some(results @ Value::Array(_)) => results,
            _ => return SearchResponse::Unrecognized,
        },
        _ => return SearchResponse::Unrecognized,
    };

    match serde_json::from_value(list) {
        Ok(candidates) => SearchResponse::Candidates(candidates),
        Err(_) => SearchResponse::Unrecognized,
    }
}
