/// Movie catalog abstraction
///
/// The catalog is a third-party REST API consumed read-only. Providers return
/// normalized [`Movie`] values; the raw response shapes stay inside the provider
/// and the mapper.
use crate::{
    error::AppResult,
    models::{Genre, Movie, SearchPage},
};

pub mod mapper;
pub mod tmdb;

pub use mapper::{parse_cast, parse_genres, parse_movie, parse_results, CatalogParseError};
pub use tmdb::TmdbProvider;

/// Result order requested from the discover endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverSort {
    /// Whatever order the catalog defaults to
    Catalog,
    /// Most popular first
    Popularity,
}

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Full-text search, one page at a time (pages start at 1)
    ///
    /// An empty query yields an empty page without calling out.
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<SearchPage>;

    /// Movies matching all of the given genre ids
    async fn discover_by_genres(
        &self,
        genre_ids: &[u64],
        sort: DiscoverSort,
    ) -> AppResult<Vec<Movie>>;

    /// This week's trending movies
    async fn trending(&self) -> AppResult<Vec<Movie>>;

    /// All movie genres the catalog knows
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    /// Full movie record with runtime, genres and the top-billed cast
    async fn movie_details(&self, id: u64) -> AppResult<Movie>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
