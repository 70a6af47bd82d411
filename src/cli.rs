use crate::error::{Result, RatingsError};
use crate::types::MovieQuery;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

pub const USAGE: &str = "Usage:
  movie_ratings title [year]
  movie_ratings --tmdb-id ID

Examples:
  movie_ratings Zerkalo
  movie_ratings \"Poor Things\"
  movie_ratings 'Nueve reinas' 2000
  movie_ratings Mononoke\\ Hime 1997
";

pub const INVALID_YEAR_MESSAGE: &str = "Error: The second input must be a four digit number.";

#[derive(Parser, Debug)]
#[command(name = "movie_ratings")]
#[command(about = "Aggregate a movie's rating from TMDb, OMDb and film websites")]
#[command(version)]
pub struct Cli {
    /// Movie title to search for
    #[arg(required_unless_present = "tmdb_id")]
    pub title: Option<String>,

    /// Four digit release year, narrows the search
    pub year: Option<String>,

    /// Look the movie up by TMDb id instead of searching by title
    #[arg(long)]
    pub tmdb_id: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// What `main` should do with the command line
#[derive(Debug)]
pub enum Invocation {
    Lookup {
        query: MovieQuery,
        json: bool,
        verbose: bool,
    },
    /// Wrong number of arguments: print usage and exit successfully
    Usage,
    /// Year argument is not four digits: print an error and usage, exit with failure
    InvalidYear(String),
    /// `--help` / `--version`, rendered by clap
    Info(clap::Error),
}

pub fn validate_year(year: &str) -> Result<String> {
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(year.to_string())
    } else {
        Err(RatingsError::InvalidYear(year.to_string()))
    }
}

/// Classifies argv without touching the network.
pub fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Invocation::Info(e),
                _ => Invocation::Usage,
            }
        }
    };

    let year = match cli.year {
        Some(year) => match validate_year(&year) {
            Ok(year) => Some(year),
            Err(_) => return Invocation::InvalidYear(year),
        },
        None => None,
    };

    let query = MovieQuery {
        title: cli.title.unwrap_or_default(),
        year,
        external_id: cli.tmdb_id,
    };
    Invocation::Lookup {
        query,
        json: cli.json,
        verbose: cli.verbose,
    }
}

/// `Searching for "{title} {year}"...`, shown before the lookup starts
pub fn searching_message(query: &MovieQuery) -> String {
    match (&query.external_id, &query.year) {
        (Some(id), _) => format!("\nLooking up TMDb id {id}..."),
        (None, Some(year)) => format!("\nSearching for \"{} {}\"...", query.title, year),
        (None, None) => format!("\nSearching for \"{}\"...", query.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_prints_usage() {
        assert!(matches!(parse_invocation(["movie_ratings"]), Invocation::Usage));
    }

    #[test]
    fn test_too_many_arguments_prints_usage() {
        let invocation = parse_invocation(["movie_ratings", "Mirror", "1975", "extra"]);
        assert!(matches!(invocation, Invocation::Usage));
    }

    #[test]
    fn test_title_only() {
        match parse_invocation(["movie_ratings", "Zerkalo"]) {
            Invocation::Lookup { query, json, verbose } => {
                assert_eq!(query, MovieQuery::new("Zerkalo", None));
                assert!(!json);
                assert!(!verbose);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_title_and_year() {
        match parse_invocation(["movie_ratings", "Nueve reinas", "2000"]) {
            Invocation::Lookup { query, .. } => {
                assert_eq!(query.title, "Nueve reinas");
                assert_eq!(query.year.as_deref(), Some("2000"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_three_digit_year_is_rejected() {
        match parse_invocation(["movie_ratings", "Mirror", "197"]) {
            Invocation::InvalidYear(year) => assert_eq!(year, "197"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_year_is_rejected() {
        assert!(matches!(
            parse_invocation(["movie_ratings", "Mirror", "19x5"]),
            Invocation::InvalidYear(_)
        ));
    }

    #[test]
    fn test_lookup_by_tmdb_id() {
        match parse_invocation(["movie_ratings", "--tmdb-id", "1398", "--json"]) {
            Invocation::Lookup { query, json, .. } => {
                assert_eq!(query.external_id.as_deref(), Some("1398"));
                assert!(query.title.is_empty());
                assert!(json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_help_is_rendered_by_clap() {
        assert!(matches!(
            parse_invocation(["movie_ratings", "--help"]),
            Invocation::Info(_)
        ));
    }

    #[test]
    fn test_validate_year() {
        assert_eq!(validate_year("1997").unwrap(), "1997");
        assert!(matches!(
            validate_year("97"),
            Err(RatingsError::InvalidYear(_))
        ));
        assert!(validate_year("١٩٩٧").is_err());
    }

    #[test]
    fn test_searching_message() {
        assert_eq!(
            searching_message(&MovieQuery::new("Mirror", Some("1975".into()))),
            "\nSearching for \"Mirror 1975\"..."
        );
        assert_eq!(
            searching_message(&MovieQuery::new("Zerkalo", None)),
            "\nSearching for \"Zerkalo\"..."
        );
    }
}
