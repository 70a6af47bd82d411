use crate::apis::tmdb::TmdbClient;
use crate::error::{Result, RatingsError};
use crate::types::{CanonicalMovie, MovieQuery};
use tracing::{info, instrument, warn};

/// Resolves a title/year or a TMDb id to one canonical movie
pub struct MovieResolver {
    tmdb: TmdbClient,
}

impl MovieResolver {
    pub fn new(tmdb: TmdbClient) -> Self {
        Self { tmdb }
    }

    /// `Ok(None)` when nothing matched; `Err` only for failures talking to TMDb.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &MovieQuery) -> Result<Option<CanonicalMovie>> {
        let movie_id = match &query.external_id {
            Some(id) => id.clone(),
            None => match self
                .tmdb
                .search_movie(&query.title, query.year.as_deref())
                .await?
            {
                Some(id) => id.to_string(),
                None => {
                    info!("No TMDb search results for '{}'", query.title);
                    return Ok(None);
                }
            },
        };

        let details = match self.tmdb.movie_details(&movie_id).await {
            Ok(details) => details,
            Err(RatingsError::Status { status: 404, .. }) => {
                info!("TMDb has no movie with id {}", movie_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let alternative_titles = match self.tmdb.alternative_titles(&movie_id).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!("Could not fetch alternative titles for {}: {}", movie_id, e);
                Vec::new()
            }
        };

        let movie = CanonicalMovie {
            year: details.year(),
            title: details.title,
            original_title: details.original_title,
            alternative_titles: alternative_titles.into_iter().collect(),
            cross_reference_id: details.imdb_id.unwrap_or_default(),
            source_id: details.id.to_string(),
            vote_average: details.vote_average,
            vote_count: details.vote_count,
        };
        info!("Resolved '{}' ({}) tmdb={}", movie.title, movie.year, movie.source_id);
        Ok(Some(movie))
    }
}
