use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        review::{average_rating, MAX_RATING, MIN_RATING},
        Review,
    },
    services::accounts::Accounts,
    store::{time_based_id, AppStore},
};

/// Per-movie reviews. Append-only: there is no edit or delete.
#[derive(Clone)]
pub struct Reviews {
    store: Arc<AppStore>,
    accounts: Accounts,
}

impl Reviews {
    pub fn new(store: Arc<AppStore>, accounts: Accounts) -> Self {
        Self { store, accounts }
    }

    /// Records a review by the current user.
    ///
    /// A rating of 0 means none was picked. The text may be empty.
    pub fn submit(&self, movie_id: u64, rating: u8, text: &str) -> AppResult<Review> {
        let user = self.accounts.require_user("submit a review")?;

        if rating == 0 {
            return Err(AppError::InvalidInput("Please select a rating".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let review = self.store.reviews(movie_id).insert_with(|existing| {
            Ok(Review {
                id: time_based_id(|candidate| existing.iter().any(|r| r.id == candidate)),
                user_id: user.id,
                username: user.username,
                rating,
                text: text.to_string(),
                date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            })
        })?;

        tracing::info!(movie_id, rating, "Review submitted");
        Ok(review)
    }

    pub fn list(&self, movie_id: u64) -> Vec<Review> {
        self.store.reviews(movie_id).list()
    }

    pub fn average(&self, movie_id: u64) -> Option<f64> {
        average_rating(&self.list(movie_id))
    }
}
