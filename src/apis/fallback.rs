use crate::error::Result;
use crate::types::{RatingContext, RatingEntry, RatingSource};
use tracing::debug;

/// Reports `primary` when it finds a rating, otherwise asks `secondary`.
///
/// Used to scrape a site only when OMDb did not carry its score.
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P: RatingSource, S: RatingSource> Fallback<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait::async_trait]
impl<P: RatingSource, S: RatingSource> RatingSource for Fallback<P, S> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn fetch_rating(&self, ctx: RatingContext<'_>) -> Result<RatingEntry> {
        match self.primary.fetch_rating(ctx).await {
            Ok(entry) if entry.is_found() => return Ok(entry),
            Ok(_) => debug!("{}: primary had no rating, trying fallback", self.name()),
            Err(e) => debug!("{}: primary failed ({}), trying fallback", self.name(), e),
        }
        self.secondary.fetch_rating(ctx).await
    }
}
