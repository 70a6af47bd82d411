use crate::constants::ROTTEN_TOMATOES;
use crate::error::Result;
use crate::infra::{join_url, HttpClient};
use crate::normalize::{Scale, TitleMatcher};
use crate::types::{RatingContext, RatingEntry, RatingSource};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

static MOVIE_ROWS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"search-page-result[type="movie"] search-page-media-row"#)
        .expect("valid selector")
});
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Rotten Tomatoes search page scraper, used when OMDb has no tomatometer
pub struct RottenTomatoesScraper {
    http: HttpClient,
    base_url: String,
}

impl RottenTomatoesScraper {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

/// First movie row whose title and release year match, scored as a percentage.
pub fn parse_search_page(body: &str, matcher: &TitleMatcher<'_>) -> RatingEntry {
    let document = Html::parse_document(body);
    for row in document.select(&MOVIE_ROWS) {
        let Some(title) = row.select(&LINK).last() else {
            continue;
        };
        let title = title.text().collect::<String>();
        let year = row.value().attr("releaseyear").unwrap_or_default();
        if !matcher.matches(title.trim(), year.trim()) {
            continue;
        }
        let score = row.value().attr("tomatometerscore").unwrap_or_default().trim();
        debug!("Matched Rotten Tomatoes row '{}' ({}) score='{}'", title.trim(), year, score);
        return match score.parse::<f64>() {
            Ok(n) => RatingEntry::found(format!("{score}%"), Scale::Percent.normalize(n)),
            Err(_) => RatingEntry::NotFound,
        };
    }
    RatingEntry::NotFound
}

#[async_trait::async_trait]
impl RatingSource for RottenTomatoesScraper {
    fn name(&self) -> &'static str {
        ROTTEN_TOMATOES
    }

    #[instrument(skip(self, ctx), fields(title = %ctx.movie.title))]
    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        let matcher = TitleMatcher::new(ctx.movie);
        if matcher.year().is_empty() {
            return Ok(RatingEntry::NotFound);
        }
        let url = join_url(&self.base_url, "search");
        let body = self
            .http
            .get_text(&url, &[("search", ctx.movie.title.as_str())])
            .await?;
        Ok(parse_search_page(&body, &matcher))
    }
}
