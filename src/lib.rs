pub mod aggregator;
pub mod apis;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod types;

pub use config::Config;
pub use error::{RatingsError, Result};
pub use pipeline::RatingsPipeline;
pub use types::{CanonicalMovie, MovieQuery, MovieReport, RatingEntry};
