use crate::constants::NOT_FOUND;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the user asked for on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieQuery {
    pub title: String,
    pub year: Option<String>,
    /// TMDb id; when present the title search is skipped
    pub external_id: Option<String>,
}

impl MovieQuery {
    pub fn new(title: impl Into<String>, year: Option<String>) -> Self {
        Self {
            title: title.into(),
            year,
            external_id: None,
        }
    }

    pub fn by_id(external_id: impl Into<String>) -> Self {
        Self {
            external_id: Some(external_id.into()),
            ..Self::default()
        }
    }
}

/// TMDb's authoritative record for a movie, the basis for cross-source matching
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMovie {
    pub title: String,
    pub original_title: String,
    pub alternative_titles: BTreeSet<String>,
    /// First four characters of the release date, empty when unknown
    pub year: String,
    /// IMDb id, used to query OMDb
    pub cross_reference_id: String,
    /// TMDb id
    pub source_id: String,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// A single source's rating, normalized onto the 0-10 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RatingEntry {
    Found { display: String, score: f64 },
    NotFound,
}

impl RatingEntry {
    pub fn found(display: impl Into<String>, score: f64) -> Self {
        RatingEntry::Found {
            display: display.into(),
            score,
        }
    }

    pub fn display(&self) -> &str {
        match self {
            RatingEntry::Found { display, .. } => display,
            RatingEntry::NotFound => NOT_FOUND,
        }
    }

    /// Normalized score, or `-1.0` when the source had nothing
    pub fn score(&self) -> f64 {
        match self {
            RatingEntry::Found { score, .. } => *score,
            RatingEntry::NotFound => -1.0,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RatingEntry::Found { .. })
    }
}

/// OMDb ratings, fetched once per lookup and shared by the sources backed by it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmdbRatings {
    pub imdb: RatingEntry,
    pub rotten_tomatoes: RatingEntry,
    pub metacritic: RatingEntry,
}

impl Default for OmdbRatings {
    fn default() -> Self {
        Self {
            imdb: RatingEntry::NotFound,
            rotten_tomatoes: RatingEntry::NotFound,
            metacritic: RatingEntry::NotFound,
        }
    }
}

/// Everything a rating source may look at
#[derive(Debug, Clone, Copy)]
pub struct RatingContext<'a> {
    pub movie: &'a CanonicalMovie,
    pub omdb: &'a OmdbRatings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRating {
    pub source: String,
    pub entry: RatingEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageRating {
    Score(f64),
    NoRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieReport {
    pub movie: CanonicalMovie,
    pub ratings: Vec<SourceRating>,
    pub average: AverageRating,
}

/// Core trait that every rating source implements
#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    /// Label shown in the report
    fn name(&self) -> &'static str;

    /// Look the movie up. Any error is turned into `RatingEntry::NotFound` by the caller.
    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_sentinel() {
        let entry = RatingEntry::NotFound;
        assert_eq!(entry.display(), "Not found");
        assert_eq!(entry.score(), -1.0);
        assert!(!entry.is_found());
    }

    #[test]
    fn test_found_entry() {
        let entry = RatingEntry::found("87%", 8.7);
        assert_eq!(entry.display(), "87%");
        assert_eq!(entry.score(), 8.7);
        assert!(entry.is_found());
    }

    #[test]
    fn test_query_by_id_has_no_title() {
        let query = MovieQuery::by_id("603");
        assert!(query.title.is_empty());
        assert_eq!(query.external_id.as_deref(), Some("603"));
    }
}
