use crate::types::CanonicalMovie;
use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED_OR_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(\[].*?[)\]]|[^a-z0-9]").expect("static regex"));

/// Loose form of a title for comparing across providers.
///
/// Lowercases, drops every "the", trims, then removes bracketed text and anything outside
/// `[a-z0-9]`. Never fails; the result may be empty.
pub fn clean_title(title: &str) -> String {
    let lowered = title.to_lowercase().replace("the", "");
    BRACKETED_OR_SYMBOL
        .replace_all(lowered.trim(), "")
        .into_owned()
}

/// Native rating scales and how each maps onto 0-10
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Percent,
    OutOf100,
    OutOf5,
    OutOf10,
}

impl Scale {
    pub fn normalize(self, native: f64) -> f64 {
        match self {
            Scale::Percent | Scale::OutOf100 => native / 10.0,
            Scale::OutOf5 => native * 2.0,
            Scale::OutOf10 => native,
        }
    }
}

/// Matching policy shared by the title-search scrapers: cleaned title (or exact alternative
/// title) plus exact year string.
///
/// Titles that clean to nothing (non-Latin scripts, a bare "The") never take part in cleaned
/// comparison, otherwise every such row would match.
#[derive(Debug, Clone)]
pub struct TitleMatcher<'a> {
    movie: &'a CanonicalMovie,
    cleaned_titles: Vec<String>,
}

impl<'a> TitleMatcher<'a> {
    pub fn new(movie: &'a CanonicalMovie) -> Self {
        let cleaned_titles = [&movie.title, &movie.original_title]
            .into_iter()
            .map(|t| clean_title(t))
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            movie,
            cleaned_titles,
        }
    }

    pub fn year(&self) -> &str {
        &self.movie.year
    }

    /// Whether an already cleaned title equals the canonical or original title
    pub fn is_known_cleaned(&self, cleaned: &str) -> bool {
        !cleaned.is_empty() && self.cleaned_titles.iter().any(|t| t == cleaned)
    }

    pub fn is_alternative_title(&self, candidate: &str) -> bool {
        self.movie.alternative_titles.contains(candidate)
    }

    pub fn title_matches(&self, candidate: &str) -> bool {
        self.is_known_cleaned(&clean_title(candidate)) || self.is_alternative_title(candidate)
    }

    pub fn matches(&self, candidate_title: &str, candidate_year: &str) -> bool {
        candidate_year == self.movie.year && self.title_matches(candidate_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mononoke() -> CanonicalMovie {
        CanonicalMovie {
            title: "Princess Mononoke".to_string(),
            original_title: "もののけ姫".to_string(),
            alternative_titles: ["Mononoke Hime".to_string()].into_iter().collect(),
            year: "1997".to_string(),
            ..CanonicalMovie::default()
        }
    }

    #[test]
    fn test_clean_drops_leading_article() {
        assert_eq!(clean_title("The Matrix"), clean_title("Matrix"));
        assert_eq!(clean_title("The Matrix"), "matrix");
    }

    #[test]
    fn test_clean_strips_parenthetical() {
        assert_eq!(clean_title("Mononoke Hime (1997)"), "mononokehime");
        assert_eq!(clean_title("Stalker [Director's Cut]"), "stalker");
    }

    #[test]
    fn test_clean_strips_punctuation() {
        assert_eq!(clean_title("Amélie!"), "amlie");
        assert_eq!(clean_title("  Nueve reinas  "), "nuevereinas");
    }

    #[test]
    fn test_clean_may_return_empty() {
        assert_eq!(clean_title("The"), "");
        assert_eq!(clean_title(""), "");
    }

    #[test]
    fn test_scales() {
        assert!((Scale::Percent.normalize(87.0) - 8.7).abs() < 1e-9);
        assert!((Scale::OutOf100.normalize(75.0) - 7.5).abs() < 1e-9);
        assert!((Scale::OutOf5.normalize(4.5) - 9.0).abs() < 1e-9);
        assert!((Scale::OutOf10.normalize(7.2) - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_matcher_requires_exact_year() {
        let movie = mononoke();
        let matcher = TitleMatcher::new(&movie);
        assert!(matcher.matches("Princess Mononoke", "1997"));
        assert!(!matcher.matches("Princess Mononoke", "1998"));
        assert!(!matcher.matches("Princess Mononoke", " 1997"));
    }

    #[test]
    fn test_matcher_accepts_alternative_title_verbatim() {
        let movie = mononoke();
        let matcher = TitleMatcher::new(&movie);
        assert!(matcher.matches("Mononoke Hime", "1997"));
        assert!(!matcher.matches("Spirited Away", "1997"));
    }

    #[test]
    fn test_matcher_ignores_titles_that_clean_to_nothing() {
        let movie = CanonicalMovie {
            title: "Mirror".to_string(),
            original_title: "Зеркало".to_string(),
            year: "1975".to_string(),
            ..CanonicalMovie::default()
        };
        let matcher = TitleMatcher::new(&movie);
        assert!(!matcher.matches("Сталкер", "1975"));
        assert!(!matcher.matches("The", "1975"));
        assert!(!matcher.is_known_cleaned(""));
        assert!(matcher.matches("The Mirror", "1975"));
    }
}
