use std::sync::Arc;

use crate::{
    error::AppResult,
    models::Movie,
    services::accounts::Accounts,
    store::AppStore,
};

/// The watchlist (shared) and the signed-in user's favorites
#[derive(Clone)]
pub struct Library {
    store: Arc<AppStore>,
    accounts: Accounts,
}

impl Library {
    pub fn new(store: Arc<AppStore>, accounts: Accounts) -> Self {
        Self { store, accounts }
    }

    pub fn watchlist(&self) -> Vec<Movie> {
        self.store.watchlist().list()
    }

    pub fn in_watchlist(&self, movie_id: u64) -> bool {
        self.store.watchlist().contains(&movie_id)
    }

    pub fn add_to_watchlist(&self, movie: Movie) -> AppResult<bool> {
        self.store.watchlist().add(movie)
    }

    pub fn remove_from_watchlist(&self, movie_id: u64) -> AppResult<bool> {
        self.store.watchlist().remove(&movie_id)
    }

    /// Adds or removes `movie`; returns whether it is on the watchlist afterwards
    pub fn toggle_watchlist(&self, movie: Movie) -> AppResult<bool> {
        let watchlist = self.store.watchlist();
        if watchlist.contains(&movie.id) {
            watchlist.remove(&movie.id)?;
            Ok(false)
        } else {
            watchlist.add(movie)?;
            Ok(true)
        }
    }

    pub fn favorites(&self) -> AppResult<Vec<Movie>> {
        let user = self.accounts.require_user("view favorites")?;
        Ok(self.store.favorites(&user.id).list())
    }

    pub fn add_favorite(&self, movie: Movie) -> AppResult<bool> {
        let user = self.accounts.require_user("save favorites")?;
        self.store.favorites(&user.id).add(movie)
    }

    pub fn remove_favorite(&self, movie_id: u64) -> AppResult<bool> {
        let user = self.accounts.require_user("edit favorites")?;
        self.store.favorites(&user.id).remove(&movie_id)
    }
}
