pub mod fallback;
pub mod filmaffinity;
pub mod letterboxd;
pub mod metacritic;
pub mod omdb;
pub mod rotten_tomatoes;
pub mod tmdb;

use crate::config::Config;
use crate::infra::HttpClient;
use crate::types::RatingSource;

use fallback::Fallback;
use filmaffinity::FilmAffinityScraper;
use letterboxd::LetterboxdScraper;
use metacritic::MetacriticScraper;
use omdb::{OmdbField, OmdbSource};
use rotten_tomatoes::RottenTomatoesScraper;
use tmdb::TmdbRating;

/// The rating sources in report order.
pub fn default_sources(config: &Config, http: &HttpClient) -> Vec<Box<dyn RatingSource>> {
    let endpoints = &config.endpoints;
    vec![
        Box::new(OmdbSource::new(OmdbField::Imdb)),
        Box::new(Fallback::new(
            OmdbSource::new(OmdbField::RottenTomatoes),
            RottenTomatoesScraper::new(http.clone(), endpoints.rotten_tomatoes.clone()),
        )),
        Box::new(Fallback::new(
            OmdbSource::new(OmdbField::Metacritic),
            MetacriticScraper::new(http.clone(), endpoints.metacritic.clone()),
        )),
        Box::new(LetterboxdScraper::new(
            http.clone(),
            endpoints.letterboxd.clone(),
        )),
        Box::new(TmdbRating),
        Box::new(FilmAffinityScraper::new(
            http.clone(),
            endpoints.filmaffinity.clone(),
        )),
    ]
}
