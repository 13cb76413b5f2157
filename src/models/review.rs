use serde::{Deserialize, Serialize};

/// Lowest and highest star rating a review may carry
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A user's review of one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Time-based identifier (milliseconds since the epoch)
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub rating: u8,
    pub text: String,
    /// ISO-8601 timestamp of submission
    pub date: String,
}

/// Mean rating over a set of reviews
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}
