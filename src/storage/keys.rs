use std::fmt::Display;

/// Fixed keys of the local storage area
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Watchlist,
    Favorites(String),
    Reviews(u64),
    Users,
    CurrentUser,
    VanillaWatchlist,
    VanillaPrefs,
    VanillaLastSearch,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Watchlist => write!(f, "watchlist"),
            StorageKey::Favorites(user_id) => write!(f, "favorites_{}", user_id),
            StorageKey::Reviews(movie_id) => write!(f, "reviews_{}", movie_id),
            StorageKey::Users => write!(f, "users"),
            StorageKey::CurrentUser => write!(f, "currentUser"),
            StorageKey::VanillaWatchlist => write!(f, "vanilla_watchlist"),
            StorageKey::VanillaPrefs => write!(f, "vanilla_prefs"),
            StorageKey::VanillaLastSearch => write!(f, "vanilla_lastsearch"),
        }
    }
}
