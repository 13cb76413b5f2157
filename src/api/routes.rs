use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the router for the local HTTP shell
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/trending", get(handlers::trending))
        .route("/movies/discover", get(handlers::discover))
        .route("/genres", get(handlers::genres))
        .route("/genres/:id/movies", get(handlers::movies_by_genre))
        .route("/movies/:id", get(handlers::movie_details))
        .route("/movies/:id/summary", get(handlers::movie_summary))
        // Reviews
        .route(
            "/movies/:id/reviews",
            get(handlers::list_reviews).post(handlers::submit_review),
        )
        // Watchlist
        .route(
            "/watchlist",
            get(handlers::get_watchlist).post(handlers::add_to_watchlist),
        )
        .route("/watchlist/toggle", post(handlers::toggle_watchlist))
        .route("/watchlist/:id", delete(handlers::remove_from_watchlist))
        // Favorites
        .route(
            "/favorites",
            get(handlers::get_favorites).post(handlers::add_favorite),
        )
        .route("/favorites/:id", delete(handlers::remove_favorite))
        // Account
        .route("/account/register", post(handlers::register))
        .route("/account/login", post(handlers::login))
        .route("/account/logout", post(handlers::logout))
        .route("/account/me", get(handlers::current_user))
        // Vanilla preferences
        .route(
            "/preferences",
            get(handlers::get_preferences).put(handlers::put_preferences),
        )
        .route("/last-search", get(handlers::last_search))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
