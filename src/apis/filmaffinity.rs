use crate::constants::FILMAFFINITY;
use crate::error::Result;
use crate::infra::{join_url, HttpClient};
use crate::normalize::{clean_title, Scale, TitleMatcher};
use crate::types::{RatingContext, RatingEntry, RatingSource};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

// Search results layout
static RESULT_ROWS: Lazy<Selector> = Lazy::new(|| selector("li.se-it"));
static ROW_TITLE: Lazy<Selector> = Lazy::new(|| selector("div.mc-title a"));
static ROW_YEAR: Lazy<Selector> = Lazy::new(|| selector("span.mc-year"));
static ROW_AVERAGE: Lazy<Selector> = Lazy::new(|| selector("div.avg"));

// Single movie page layout, served when the search has one hit
static MAIN_TITLE: Lazy<Selector> = Lazy::new(|| selector("h1#main-title"));
static INFO_VALUE: Lazy<Selector> = Lazy::new(|| selector("dl.movie-info dd"));
static PUBLISHED: Lazy<Selector> = Lazy::new(|| selector(r#"dd[itemprop="datePublished"]"#));
static AKAS: Lazy<Selector> = Lazy::new(|| selector("dd.akas ul li"));
static PAGE_AVERAGE: Lazy<Selector> = Lazy::new(|| selector("div#movie-rat-avg"));

pub struct FilmAffinityScraper {
    http: HttpClient,
    base_url: String,
}

impl FilmAffinityScraper {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(scope: &Html, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(text_of)
}

/// FilmAffinity scores out of 10, sometimes with a decimal comma.
fn rating_entry(raw: &str) -> RatingEntry {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) => RatingEntry::found(format!("{normalized}/10"), Scale::OutOf10.normalize(n)),
        Err(_) => RatingEntry::NotFound,
    }
}

fn search_results(document: &Html, matcher: &TitleMatcher<'_>) -> RatingEntry {
    for row in document.select(&RESULT_ROWS) {
        let (Some(title), Some(year)) = (
            row.select(&ROW_TITLE).next().map(text_of),
            row.select(&ROW_YEAR).next().map(text_of),
        ) else {
            continue;
        };
        if matcher.matches(&title, &year) {
            debug!("Matched FilmAffinity row '{}' ({})", title, year);
            return row
                .select(&ROW_AVERAGE)
                .next()
                .map(|avg| rating_entry(&text_of(avg)))
                .unwrap_or(RatingEntry::NotFound);
        }
    }
    RatingEntry::NotFound
}

/// The movie page lists its own title, original title and akas; any of them may carry the
/// canonical title.
fn movie_page(document: &Html, matcher: &TitleMatcher<'_>) -> Option<RatingEntry> {
    let page_title = first_text(document, &MAIN_TITLE)?;
    let original_title = document
        .select(&INFO_VALUE)
        .next()?
        .text()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let year = first_text(document, &PUBLISHED)?;

    let mut titles = vec![clean_title(&page_title), clean_title(&original_title)];
    titles.extend(document.select(&AKAS).map(|li| clean_title(&text_of(li))));

    let title_known = titles.iter().any(|t| matcher.is_known_cleaned(t))
        || matcher.is_alternative_title(&page_title);
    if year != matcher.year() || !title_known {
        return None;
    }
    debug!("Matched FilmAffinity movie page '{}' ({})", page_title, year);
    Some(rating_entry(&first_text(document, &PAGE_AVERAGE)?))
}

/// Search results when the page has rows, otherwise the single movie page layout.
pub fn parse_page(body: &str, matcher: &TitleMatcher<'_>) -> RatingEntry {
    let document = Html::parse_document(body);
    if document.select(&RESULT_ROWS).next().is_some() {
        search_results(&document, matcher)
    } else {
        movie_page(&document, matcher).unwrap_or(RatingEntry::NotFound)
    }
}

#[async_trait::async_trait]
impl RatingSource for FilmAffinityScraper {
    fn name(&self) -> &'static str {
        FILMAFFINITY
    }

    #[instrument(skip(self, ctx), fields(title = %ctx.movie.title))]
    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        let matcher = TitleMatcher::new(ctx.movie);
        if matcher.year().is_empty() {
            return Ok(RatingEntry::NotFound);
        }
        let url = join_url(&self.base_url, "en/search.php");
        let body = self
            .http
            .get_text(&url, &[("stext", ctx.movie.title.as_str())])
            .await?;
        Ok(parse_page(&body, &matcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CanonicalMovie;

    const SEARCH_PAGE: &str = r#"
<html><body><ul>
  <li class="se-it">
    <div class="mc-title"><a href="/en/film1.html">Nine Queens</a></div>
    <span class="mc-year">2001</span>
    <div class="avg">6.0</div>
  </li>
  <li class="se-it">
    <div class="mc-title"><a href="/en/film2.html">Nine Queens</a></div>
    <span class="mc-year">2000</span>
    <div class="avg"> 7,5 </div>
  </li>
</ul></body></html>"#;

    const MOVIE_PAGE: &str = r#"
<html><body>
  <h1 id="main-title"><span>The Mirror</span></h1>
  <dl class="movie-info">
    <dt>Original title</dt>
    <dd>Zerkalo<span class="aka">aka</span></dd>
    <dt>Year</dt>
    <dd itemprop="datePublished">1975</dd>
    <dt>AKA</dt>
    <dd class="akas"><ul><li>Mirror</li><li>Das Spiegelbild</li></ul></dd>
  </dl>
  <div id="movie-rat-avg" itemprop="ratingValue"> 8.0 </div>
</body></html>"#;

    fn nine_queens() -> CanonicalMovie {
        CanonicalMovie {
            title: "Nine Queens".to_string(),
            original_title: "Nueve reinas".to_string(),
            year: "2000".to_string(),
            ..CanonicalMovie::default()
        }
    }

    fn mirror() -> CanonicalMovie {
        CanonicalMovie {
            title: "Mirror".to_string(),
            original_title: "Зеркало".to_string(),
            year: "1975".to_string(),
            ..CanonicalMovie::default()
        }
    }

    #[test]
    fn test_search_row_with_matching_year() {
        let movie = nine_queens();
        let entry = parse_page(SEARCH_PAGE, &TitleMatcher::new(&movie));
        assert_eq!(entry, RatingEntry::found("7.5/10", 7.5));
    }

    #[test]
    fn test_search_without_matching_year() {
        let mut movie = nine_queens();
        movie.year = "1999".to_string();
        assert_eq!(
            parse_page(SEARCH_PAGE, &TitleMatcher::new(&movie)),
            RatingEntry::NotFound
        );
    }

    #[test]
    fn test_movie_page_matches_through_akas() {
        let movie = mirror();
        let entry = parse_page(MOVIE_PAGE, &TitleMatcher::new(&movie));
        assert_eq!(entry, RatingEntry::found("8.0/10", 8.0));
    }

    #[test]
    fn test_movie_page_year_must_match() {
        let mut movie = mirror();
        movie.year = "1974".to_string();
        assert_eq!(
            parse_page(MOVIE_PAGE, &TitleMatcher::new(&movie)),
            RatingEntry::NotFound
        );
    }

    #[test]
    fn test_movie_page_with_unknown_title() {
        let movie = CanonicalMovie {
            title: "Stalker".to_string(),
            original_title: "Сталкер".to_string(),
            year: "1975".to_string(),
            ..CanonicalMovie::default()
        };
        assert_eq!(
            parse_page(MOVIE_PAGE, &TitleMatcher::new(&movie)),
            RatingEntry::NotFound
        );
    }

    #[test]
    fn test_empty_page_is_not_found() {
        let movie = mirror();
        assert_eq!(
            parse_page("<html></html>", &TitleMatcher::new(&movie)),
            RatingEntry::NotFound
        );
    }

    #[test]
    fn test_movie_page_in_another_script_does_not_match() {
        let page = r#"
<html><body>
  <h1 id="main-title">Сталкер</h1>
  <dl class="movie-info"><dd>Сталкер</dd><dd itemprop="datePublished">1975</dd></dl>
  <div id="movie-rat-avg">8.1</div>
</body></html>"#;
        let movie = mirror();
        assert_eq!(
            parse_page(page, &TitleMatcher::new(&movie)),
            RatingEntry::NotFound
        );
    }
}
