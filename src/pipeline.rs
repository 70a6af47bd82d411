use crate::aggregator::average_rating;
use crate::apis::{default_sources, omdb::OmdbClient, tmdb::TmdbClient};
use crate::config::Config;
use crate::error::Result;
use crate::infra::HttpClient;
use crate::resolver::MovieResolver;
use crate::types::{
    MovieQuery, MovieReport, OmdbRatings, RatingContext, RatingEntry, RatingSource, SourceRating,
};
use tracing::{debug, info, instrument, warn};

/// Asks one source for its rating. This is the per-source boundary: whatever goes wrong
/// inside a source comes out as `NotFound` and never reaches the other sources.
#[instrument(skip(source, ctx), fields(source = source.name()))]
pub async fn rate_with(source: &dyn RatingSource, ctx: RatingContext<'_>) -> RatingEntry {
    match source.fetch_rating(ctx).await {
        Ok(entry) => {
            debug!("{} -> {}", source.name(), entry.display());
            entry
        }
        Err(e) => {
            debug!("{} failed: {}", source.name(), e);
            RatingEntry::NotFound
        }
    }
}

pub struct RatingsPipeline {
    resolver: MovieResolver,
    omdb: OmdbClient,
    sources: Vec<Box<dyn RatingSource>>,
}

impl RatingsPipeline {
    pub fn new(
        resolver: MovieResolver,
        omdb: OmdbClient,
        sources: Vec<Box<dyn RatingSource>>,
    ) -> Self {
        Self {
            resolver,
            omdb,
            sources,
        }
    }

    /// Wires up TMDb, OMDb and the scrapers from configuration, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpClient::new(&config.http)?;
        let tmdb = TmdbClient::new(
            http.clone(),
            config.endpoints.tmdb.clone(),
            config.credentials.tmdb_key.clone(),
        );
        let omdb = OmdbClient::new(
            http.clone(),
            config.endpoints.omdb.clone(),
            config.credentials.omdb_key.clone(),
        );
        Ok(Self::new(
            MovieResolver::new(tmdb),
            omdb,
            default_sources(config, &http),
        ))
    }

    /// Resolve the movie, then ask every source in turn. `Ok(None)` when the movie is unknown.
    #[instrument(skip(self))]
    pub async fn lookup(&self, query: &MovieQuery) -> Result<Option<MovieReport>> {
        let Some(movie) = self.resolver.resolve(query).await? else {
            return Ok(None);
        };

        let omdb = match self.omdb.fetch(&movie.cross_reference_id).await {
            Ok(ratings) => ratings,
            Err(e) => {
                warn!("OMDb lookup for '{}' failed: {}", movie.cross_reference_id, e);
                OmdbRatings::default()
            }
        };

        let ctx = RatingContext {
            movie: &movie,
            omdb: &omdb,
        };
        let mut ratings = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let entry = rate_with(source.as_ref(), ctx).await;
            ratings.push(SourceRating {
                source: source.name().to_string(),
                entry,
            });
        }

        let average = average_rating(&ratings);
        info!(
            "Found {} of {} ratings for '{}'",
            ratings.iter().filter(|r| r.entry.is_found()).count(),
            ratings.len(),
            movie.title
        );
        Ok(Some(MovieReport {
            movie,
            ratings,
            average,
        }))
    }
}
