use crate::constants::{
    IMDB, METACRITIC, OMDB_IMDB_SOURCE, OMDB_METACRITIC_SOURCE, OMDB_ROTTEN_TOMATOES_SOURCE,
    ROTTEN_TOMATOES,
};
use crate::error::{Result, RatingsError};
use crate::infra::HttpClient;
use crate::normalize::Scale;
use crate::types::{OmdbRatings, RatingContext, RatingEntry, RatingSource};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbResponse {
    #[serde(default)]
    pub ratings: Vec<OmdbRating>,
    pub response: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    pub source: String,
    pub value: String,
}

/// OMDb ratings API, keyed by IMDb id
pub struct OmdbClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, imdb_id: &str) -> Result<OmdbRatings> {
        if imdb_id.is_empty() {
            return Err(RatingsError::MissingField("imdb_id".into()));
        }
        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        let response: OmdbResponse = self
            .http
            .get_json(&url, &[("apikey", self.api_key.as_str()), ("i", imdb_id)])
            .await?;
        if response.response.as_deref() == Some("False") {
            return Err(RatingsError::Api {
                message: response.error.unwrap_or_else(|| "OMDb lookup failed".into()),
            });
        }
        let ratings = parse_ratings(&response.ratings);
        debug!(
            "OMDb ratings: imdb={} rt={} mc={}",
            ratings.imdb.display(),
            ratings.rotten_tomatoes.display(),
            ratings.metacritic.display()
        );
        Ok(ratings)
    }
}

fn find<'a>(ratings: &'a [OmdbRating], source: &str) -> Option<&'a str> {
    ratings
        .iter()
        .find(|r| r.source == source)
        .map(|r| r.value.as_str())
}

/// `"7.9/10"`, `"75/100"`: the number before the slash
fn leading_number(value: &str) -> Option<f64> {
    value.split('/').next()?.trim().parse().ok()
}

fn entry(value: Option<&str>, parse: impl Fn(&str) -> Option<f64>, scale: Scale) -> RatingEntry {
    value
        .and_then(|v| parse(v).map(|n| RatingEntry::found(v, scale.normalize(n))))
        .unwrap_or(RatingEntry::NotFound)
}

pub fn parse_ratings(ratings: &[OmdbRating]) -> OmdbRatings {
    OmdbRatings {
        imdb: entry(find(ratings, OMDB_IMDB_SOURCE), leading_number, Scale::OutOf10),
        rotten_tomatoes: entry(
            find(ratings, OMDB_ROTTEN_TOMATOES_SOURCE),
            |v| v.trim().strip_suffix('%')?.parse().ok(),
            Scale::Percent,
        ),
        metacritic: entry(
            find(ratings, OMDB_METACRITIC_SOURCE),
            leading_number,
            Scale::OutOf100,
        ),
    }
}

/// Which of the prefetched OMDb ratings a source reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmdbField {
    Imdb,
    RottenTomatoes,
    Metacritic,
}

pub struct OmdbSource {
    field: OmdbField,
}

impl OmdbSource {
    pub fn new(field: OmdbField) -> Self {
        Self { field }
    }
}

#[async_trait::async_trait]
impl RatingSource for OmdbSource {
    fn name(&self) -> &'static str {
        match self.field {
            OmdbField::Imdb => IMDB,
            OmdbField::RottenTomatoes => ROTTEN_TOMATOES,
            OmdbField::Metacritic => METACRITIC,
        }
    }

    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        let entry = match self.field {
            OmdbField::Imdb => &ctx.omdb.imdb,
            OmdbField::RottenTomatoes => &ctx.omdb.rotten_tomatoes,
            OmdbField::Metacritic => &ctx.omdb.metacritic,
        };
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> OmdbResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_all_three() {
        let resp = response(json!({
            "Title": "Zerkalo",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "7.9/10"},
                {"Source": "Rotten Tomatoes", "Value": "87%"},
                {"Source": "Metacritic", "Value": "75/100"}
            ],
            "Response": "True"
        }));
        let ratings = parse_ratings(&resp.ratings);
        assert_eq!(ratings.imdb, RatingEntry::found("7.9/10", 7.9));
        assert_eq!(ratings.rotten_tomatoes, RatingEntry::found("87%", 8.7));
        assert_eq!(ratings.metacritic, RatingEntry::found("75/100", 7.5));
    }

    #[test]
    fn test_missing_ratings_are_not_found() {
        let resp = response(json!({"Title": "Zerkalo", "Response": "True"}));
        assert_eq!(parse_ratings(&resp.ratings), OmdbRatings::default());
    }

    #[test]
    fn test_only_imdb_present() {
        let resp = response(json!({
            "Ratings": [{"Source": "Internet Movie Database", "Value": "6.1/10"}]
        }));
        let ratings = parse_ratings(&resp.ratings);
        assert_eq!(ratings.imdb.score(), 6.1);
        assert_eq!(ratings.rotten_tomatoes, RatingEntry::NotFound);
        assert_eq!(ratings.metacritic, RatingEntry::NotFound);
    }

    #[test]
    fn test_unparsable_value_is_not_found() {
        let resp = response(json!({
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "N/A"},
                {"Source": "Rotten Tomatoes", "Value": "fresh"}
            ]
        }));
        let ratings = parse_ratings(&resp.ratings);
        assert_eq!(ratings.imdb, RatingEntry::NotFound);
        assert_eq!(ratings.rotten_tomatoes, RatingEntry::NotFound);
    }
}
