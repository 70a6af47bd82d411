use crate::constants::{ALTERNATIVE_TITLE_LOCALES, TMDB};
use crate::error::Result;
use crate::infra::{join_url, HttpClient};
use crate::types::{RatingContext, RatingEntry, RatingSource};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Absent and `null` both mean no hits
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: Option<u64>,
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id of the first hit; a first hit without an id counts as no hit.
    pub fn first_id(&self) -> Option<u64> {
        self.results.as_ref()?.first()?.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    pub release_date: Option<String>,
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
}

impl MovieDetails {
    /// First four characters of the release date; empty when TMDb has none.
    pub fn year(&self) -> String {
        self.release_date
            .as_deref()
            .map(|date| date.chars().take(4).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct AlternativeTitles {
    #[serde(default)]
    pub titles: Vec<AlternativeTitle>,
}

#[derive(Debug, Deserialize)]
pub struct AlternativeTitle {
    pub iso_3166_1: String,
    pub title: String,
}

impl AlternativeTitles {
    /// Titles in the locales used for matching, in response order.
    pub fn in_matching_locales(self) -> Vec<String> {
        self.titles
            .into_iter()
            .filter(|t| ALTERNATIVE_TITLE_LOCALES.contains(&t.iso_3166_1.as_str()))
            .map(|t| t.title)
            .collect()
    }
}

/// TMDb metadata API
pub struct TmdbClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Id of the first search hit, if any
    #[instrument(skip(self))]
    pub async fn search_movie(&self, title: &str, year: Option<&str>) -> Result<Option<u64>> {
        let url = join_url(&self.base_url, "search/movie");
        let mut query = vec![
            ("api_key", self.api_key.as_str()),
            ("query", title),
            ("page", "1"),
        ];
        if let Some(year) = year {
            query.push(("year", year));
        }
        let response: SearchResponse = self.http.get_json(&url, &query).await?;
        debug!("TMDb search returned {} results", response.len());
        Ok(response.first_id())
    }

    #[instrument(skip(self))]
    pub async fn movie_details(&self, id: &str) -> Result<MovieDetails> {
        let url = join_url(&self.base_url, &format!("movie/{id}"));
        self.http
            .get_json(&url, &[("api_key", self.api_key.as_str())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn alternative_titles(&self, id: &str) -> Result<Vec<String>> {
        let url = join_url(&self.base_url, &format!("movie/{id}/alternative_titles"));
        let titles: AlternativeTitles = self
            .http
            .get_json(&url, &[("api_key", self.api_key.as_str())])
            .await?;
        Ok(titles.in_matching_locales())
    }
}

/// TMDb's own vote average, already carried on the canonical movie
pub struct TmdbRating;

#[async_trait::async_trait]
impl RatingSource for TmdbRating {
    fn name(&self) -> &'static str {
        TMDB
    }

    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        let movie = ctx.movie;
        if movie.vote_count == 0 {
            return Ok(RatingEntry::NotFound);
        }
        Ok(RatingEntry::found(
            format!("{:.1}/10", movie.vote_average),
            movie.vote_average,
        ))
    }
}
