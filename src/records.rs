use serde::{Deserialize, Serialize};

/// One job posting as observed by a scraper during a single pass.
///
/// `url` is the sole identity key: two records with the same URL are the
/// same posting no matter what the other fields say. Every field except
/// `url` defaults to empty so half-filled scraper output deserializes
/// without errors.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Free-form date expression, or the sentinels "N/A" / "Recent" / "".
    #[serde(default)]
    pub posted_date: String,
    /// Origin tag, e.g. "topcv", "itviec", "linkedin".
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tech_stack: String,
}

/// A candidate that passed the relevance filter, plus its match score.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CandidateRecord,
    /// Clamped to 10 at the top; the experience penalty can push it negative.
    pub match_score: i32,
}

impl ScoredRecord {
    pub fn url(&self) -> &str {
        &self.record.url
    }
}
