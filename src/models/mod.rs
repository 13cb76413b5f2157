use serde::{Deserialize, Serialize};

pub mod review;
pub mod user;

pub use review::Review;
pub use user::{SessionUser, User};

/// Shown in place of a poster when the catalog has none
pub const PLACEHOLDER_POSTER: &str = "/placeholder.png";

/// Maximum number of cast names kept on a movie
pub const MAX_CAST: usize = 5;

/// A movie as the client sees it, normalized from the catalog API.
///
/// Serialized with the catalog's field names so stored snapshots stay readable by
/// either client flavour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
}

impl Movie {
    /// Absolute poster URL, if the catalog supplied a poster path
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    pub results: Vec<Movie>,
    pub total_pages: u32,
}

/// What a movie card in a result grid displays
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub rating_label: String,
    pub poster_url: String,
    pub in_watchlist: bool,
}

impl MovieCard {
    pub fn new(movie: &Movie, image_base_url: &str, in_watchlist: bool) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            rating_label: format!("{:.1}", movie.vote_average),
            poster_url: movie
                .poster_url(image_base_url)
                .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            in_watchlist,
        }
    }
}
