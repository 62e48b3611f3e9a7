/// Movie metadata provider abstraction
///
/// The recommendation pipeline only needs three read-only lookups from the
/// upstream catalog. Keeping them behind a trait lets the pipeline run against
/// TMDB in production and against mocks in tests.
use crate::{
    error::AppResult,
    models::{DiscoverResponse, GenreId, Review},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetch one page of the popularity-ranked discovery listing
    ///
    /// An empty `genre` means no genre filter.
    async fn discover_page(&self, genre: &GenreId, page: u32) -> AppResult<DiscoverResponse>;

    /// Fetch the trailer keys for a movie, in upstream order
    async fn fetch_videos(&self, movie_id: u64) -> AppResult<Vec<String>>;

    /// Fetch the reviews for a movie
    async fn fetch_reviews(&self, movie_id: u64) -> AppResult<Vec<Review>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
