use crate::constants::{BROWSER_USER_AGENT, MAX_SEARCH_PAGES, METACRITIC};
use crate::error::{Result, RatingsError};
use crate::infra::HttpClient;
use crate::normalize::{Scale, TitleMatcher};
use crate::types::{RatingContext, RatingEntry, RatingSource};
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static RESULT_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.c-pageSiteSearch-results-item").expect("valid selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static SPANS: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("valid selector"));

/// Metacritic search scraper, used when OMDb has no metascore
pub struct MetacriticScraper {
    http: HttpClient,
    base_url: String,
}

/// What one search results page yielded
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub rows: usize,
    pub matched: Option<RatingEntry>,
}

impl MetacriticScraper {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `{base}/search/{title}/` with the title percent-encoded as one path segment
    fn search_url(&self, title: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RatingsError::Parse(format!("metacritic base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| RatingsError::Parse("metacritic base url cannot be a base".into()))?
            .pop_if_empty()
            .extend(&["search", title, ""]);
        Ok(url.to_string())
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn row_rating(row: ElementRef<'_>, matcher: &TitleMatcher<'_>) -> Option<RatingEntry> {
    let title = text_of(row.select(&TITLE).next()?);
    let spans: Vec<String> = row.select(&SPANS).map(text_of).collect();
    let is_movie = spans.first()?.eq_ignore_ascii_case("movie");
    let year = spans.get(2)?;
    if !is_movie || !matcher.matches(&title, year) {
        return None;
    }
    let score = spans.last()?.clone();
    debug!("Matched Metacritic row '{}' ({}) score='{}'", title, year, score);
    Some(match score.parse::<f64>() {
        Ok(n) => RatingEntry::found(format!("{score}/100"), Scale::OutOf100.normalize(n)),
        Err(_) => RatingEntry::NotFound,
    })
}

pub fn parse_search_page(body: &str, matcher: &TitleMatcher<'_>) -> SearchPage {
    let document = Html::parse_document(body);
    let rows: Vec<ElementRef<'_>> = document.select(&RESULT_ITEMS).collect();
    let matched = rows.iter().find_map(|row| row_rating(*row, matcher));
    SearchPage {
        rows: rows.len(),
        matched,
    }
}

#[async_trait::async_trait]
impl RatingSource for MetacriticScraper {
    fn name(&self) -> &'static str {
        METACRITIC
    }

    #[instrument(skip(self, ctx), fields(title = %ctx.movie.title))]
    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        let matcher = TitleMatcher::new(ctx.movie);
        if matcher.year().is_empty() {
            return Ok(RatingEntry::NotFound);
        }
        let url = self.search_url(&ctx.movie.title)?;
        for page in 1..=MAX_SEARCH_PAGES {
            let page_param = page.to_string();
            let body = self
                .http
                .get_text_as(&url, &[("page", page_param.as_str())], BROWSER_USER_AGENT)
                .await?;
            let result = parse_search_page(&body, &matcher);
            if let Some(entry) = result.matched {
                return Ok(entry);
            }
            if result.rows == 0 {
                debug!("Metacritic page {} had no results, stopping", page);
                break;
            }
        }
        Ok(RatingEntry::NotFound)
    }
}
