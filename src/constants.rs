/// Source labels as they appear in the report, in report order.
pub const IMDB: &str = "IMDb";
pub const ROTTEN_TOMATOES: &str = "RottenTomatoes";
pub const METACRITIC: &str = "Metacritic";
pub const LETTERBOXD: &str = "Letterboxd";
pub const TMDB: &str = "TMDb";
pub const FILMAFFINITY: &str = "FilmAffinity";

pub const AVERAGE: &str = "Average";

// Source names used inside the OMDb `Ratings` array
pub const OMDB_IMDB_SOURCE: &str = "Internet Movie Database";
pub const OMDB_ROTTEN_TOMATOES_SOURCE: &str = "Rotten Tomatoes";
pub const OMDB_METACRITIC_SOURCE: &str = "Metacritic";

// Default base URLs, overridable through the config file
pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com";
pub const DEFAULT_ROTTEN_TOMATOES_URL: &str = "https://www.rottentomatoes.com";
pub const DEFAULT_METACRITIC_URL: &str = "https://www.metacritic.com";
pub const DEFAULT_LETTERBOXD_URL: &str = "https://letterboxd.com";
pub const DEFAULT_FILMAFFINITY_URL: &str = "https://www.filmaffinity.com";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Metacritic refuses requests without a browser-like agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/79.0.3945.88 Safari/537.37";

/// Locales whose alternative titles are kept for cross-source matching.
pub const ALTERNATIVE_TITLE_LOCALES: [&str; 2] = ["GB", "US"];

/// Upper bound on Metacritic search pages fetched per lookup.
pub const MAX_SEARCH_PAGES: u32 = 3;

pub const NOT_FOUND: &str = "Not found";
pub const NO_RATING: &str = "No rating";

/// Width shared by the label and the value on every report line.
pub const REPORT_WIDTH: usize = 25;

pub const TMDB_KEY_VAR: &str = "TMDB_KEY";
pub const OMDB_KEY_VAR: &str = "OMDB_KEY";
pub const CONFIG_PATH_VAR: &str = "MOVIE_RATINGS_CONFIG";
pub const LOG_DIR_VAR: &str = "MOVIE_RATINGS_LOG_DIR";
pub const DEFAULT_CONFIG_PATH: &str = "movie_ratings.toml";
