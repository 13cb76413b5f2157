use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    models::{Genre, Movie, MovieCard, SearchPage},
    services::catalog::{CatalogProvider, DiscoverSort},
    store::AppStore,
};

/// Catalog-backed views.
///
/// Catalog failures never reach the caller: they are logged and the view gets an
/// empty section (or `None` for a single movie), matching what a user would see.
#[derive(Clone)]
pub struct Browser {
    catalog: Arc<dyn CatalogProvider>,
    store: Arc<AppStore>,
    image_base_url: String,
}

impl Browser {
    pub fn new(catalog: Arc<dyn CatalogProvider>, store: Arc<AppStore>, image_base_url: String) -> Self {
        Self {
            catalog,
            store,
            image_base_url,
        }
    }

    /// Searches the catalog and remembers the query for the next session
    pub async fn search(&self, query: &str, page: u32) -> SearchPage {
        if let Err(e) = self.store.set_last_search(query) {
            tracing::warn!(error = %e, "Failed to remember last search");
        }

        match self.catalog.search_movies(query, page).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(
                    query = %query,
                    provider = self.catalog.name(),
                    error = %e,
                    "Movie search failed"
                );
                SearchPage::default()
            }
        }
    }

    pub async fn trending(&self) -> Vec<Movie> {
        self.catalog.trending().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error fetching trending movies");
            Vec::new()
        })
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.catalog.genres().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error fetching genres");
            Vec::new()
        })
    }

    /// Popular movies for one genre
    pub async fn by_genre(&self, genre_id: u64) -> Vec<Movie> {
        self.discover(&[genre_id], DiscoverSort::Popularity).await
    }

    /// Movies matching the user's preferred genres
    pub async fn recommended(&self, genre_ids: &[u64]) -> Vec<Movie> {
        self.discover(genre_ids, DiscoverSort::Catalog).await
    }

    async fn discover(&self, genre_ids: &[u64], sort: DiscoverSort) -> Vec<Movie> {
        self.catalog
            .discover_by_genres(genre_ids, sort)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(genres = ?genre_ids, error = %e, "Error discovering movies");
                Vec::new()
            })
    }

    pub async fn details(&self, id: u64) -> Option<Movie> {
        match self.catalog.movie_details(id).await {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Error getting movie details");
                None
            }
        }
    }

    /// Card view models, flagged with current watchlist membership
    pub fn cards(&self, movies: &[Movie]) -> Vec<MovieCard> {
        let watched: HashSet<u64> = self.store.watchlist().list().iter().map(|m| m.id).collect();
        movies
            .iter()
            .map(|movie| MovieCard::new(movie, &self.image_base_url, watched.contains(&movie.id)))
            .collect()
    }

    pub fn poster_url(&self, movie: &Movie) -> Option<String> {
        movie.poster_url(&self.image_base_url)
    }
}
