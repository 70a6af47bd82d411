use crate::constants::LETTERBOXD;
use crate::error::{Result, RatingsError};
use crate::infra::{join_url, HttpClient};
use crate::normalize::Scale;
use crate::types::{RatingContext, RatingEntry, RatingSource};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::instrument;

static AVERAGE_META: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="twitter:data2"]"#).expect("valid selector"));

/// Letterboxd film page, reached through its TMDb id redirect
pub struct LetterboxdScraper {
    http: HttpClient,
    base_url: String,
}

impl LetterboxdScraper {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

/// Reads the average from the `twitter:data2` meta tag, e.g. `"3.92 out of 5"`.
pub fn parse_film_page(body: &str) -> Result<RatingEntry> {
    let document = Html::parse_document(body);
    let content = document
        .select(&AVERAGE_META)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .ok_or_else(|| RatingsError::MissingField("twitter:data2".into()))?;
    let average: f64 = content
        .split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| RatingsError::Parse(format!("letterboxd average '{content}'")))?;
    let rounded = (average * 10.0).round() / 10.0;
    Ok(RatingEntry::found(
        format!("{rounded:.1}/5"),
        Scale::OutOf5.normalize(rounded),
    ))
}

#[async_trait::async_trait]
impl RatingSource for LetterboxdScraper {
    fn name(&self) -> &'static str {
        LETTERBOXD
    }

    #[instrument(skip(self, ctx), fields(tmdb_id = %ctx.movie.source_id))]
    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        if ctx.movie.source_id.is_empty() {
            return Err(RatingsError::MissingField("tmdb id".into()));
        }
        let url = join_url(&self.base_url, &format!("tmdb/{}", ctx.movie.source_id));
        let body = self.http.get_text(&url, &[]).await?;
        parse_film_page(&body)
    }
}
