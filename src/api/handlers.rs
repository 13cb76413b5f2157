use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{Genre, Movie, MovieCard, Review, SessionUser};
use crate::services::RegisterRequest;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<MovieCard>,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverQuery {
    /// Comma-separated genre ids
    pub genres: String,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsResponse {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_url: Option<String>,
    pub in_watchlist: bool,
    pub reviews: Vec<Review>,
    pub average_user_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub extract: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    /// 0 when the user did not pick a rating
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ListChangeResponse {
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub in_watchlist: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LastSearchResponse {
    pub query: String,
}

fn parse_genre_ids(raw: &str) -> AppResult<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| AppError::InvalidInput(format!("Invalid genre id: {}", part)))
        })
        .collect()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}

/// Search the catalog and render result cards
pub async fn search_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    tracing::info!(request_id = %request_id, query = %params.q, "Processing search request");

    let page = state.browser.search(&params.q, params.page.unwrap_or(1)).await;
    Json(SearchResponse {
        results: state.browser.cards(&page.results),
        total_pages: page.total_pages,
    })
}

pub async fn trending(State(state): State<AppState>) -> Json<Vec<MovieCard>> {
    let movies = state.browser.trending().await;
    Json(state.browser.cards(&movies))
}

pub async fn discover(
    State(state): State<AppState>,
    Query(params): Query<DiscoverQuery>,
) -> AppResult<Json<Vec<MovieCard>>> {
    let genre_ids = parse_genre_ids(&params.genres)?;
    if genre_ids.is_empty() {
        return Err(AppError::InvalidInput("At least one genre is required".to_string()));
    }

    let movies = state.browser.recommended(&genre_ids).await;
    Ok(Json(state.browser.cards(&movies)))
}

pub async fn genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(state.browser.genres().await)
}

/// Popular movies in one genre
pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<u64>,
) -> Json<Vec<MovieCard>> {
    let movies = state.browser.by_genre(genre_id).await;
    Json(state.browser.cards(&movies))
}

/// Movie details joined with local state: watchlist membership and reviews
pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieDetailsResponse>> {
    let movie = state
        .browser
        .details(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Movie {} is unavailable", id)))?;

    Ok(Json(MovieDetailsResponse {
        poster_url: state.browser.poster_url(&movie),
        in_watchlist: state.library.in_watchlist(id),
        reviews: state.reviews.list(id),
        average_user_rating: state.reviews.average(id),
        movie,
    }))
}

/// Encyclopedia summary for a movie, null when none is available
pub async fn movie_summary(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<SummaryResponse>> {
    let movie = state
        .browser
        .details(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Movie {} is unavailable", id)))?;

    let extract = state.encyclopedia.summary(&movie.title).await;
    Ok(Json(SummaryResponse { extract }))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<Vec<Review>> {
    Json(state.reviews.list(id))
}

pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state.reviews.submit(id, request.rating, &request.text)?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.library.watchlist())
}

/// Add a movie snapshot; re-adding an existing movie changes nothing
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<(StatusCode, Json<ListChangeResponse>)> {
    let changed = state.library.add_to_watchlist(movie)?;
    let status = if changed { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ListChangeResponse { changed })))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<ListChangeResponse>> {
    let changed = state.library.remove_from_watchlist(id)?;
    Ok(Json(ListChangeResponse { changed }))
}

pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<ToggleResponse>> {
    let in_watchlist = state.library.toggle_watchlist(movie)?;
    Ok(Json(ToggleResponse { in_watchlist }))
}

pub async fn get_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.library.favorites()?))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<(StatusCode, Json<ListChangeResponse>)> {
    let changed = state.library.add_favorite(movie)?;
    let status = if changed { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ListChangeResponse { changed })))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<ListChangeResponse>> {
    let changed = state.library.remove_favorite(id)?;
    Ok(Json(ListChangeResponse { changed }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SessionUser>)> {
    let user = state.accounts.register(request)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<SessionUser>> {
    Ok(Json(state.accounts.login(&request.email, &request.password)?))
}

pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.accounts.logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// The signed-in user, or null
pub async fn current_user(State(state): State<AppState>) -> Json<Option<SessionUser>> {
    Json(state.accounts.current_user())
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<Map<String, Value>> {
    Json(state.store.preferences())
}

pub async fn put_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<Map<String, Value>>,
) -> AppResult<Json<Map<String, Value>>> {
    state.store.set_preferences(&prefs)?;
    Ok(Json(prefs))
}

pub async fn last_search(State(state): State<AppState>) -> Json<LastSearchResponse> {
    Json(LastSearchResponse {
        query: state.store.last_search(),
    })
}
