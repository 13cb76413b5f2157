use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use cinelist::api::{create_router, AppState};
use cinelist::error::{AppError, AppResult};
use cinelist::models::{Genre, Movie, SearchPage};
use cinelist::services::{CatalogProvider, DiscoverSort, Encyclopedia};
use cinelist::storage::{MemoryStorage, Storage, StorageKey};
use cinelist::store::{AppStore, Variant};

/// Catalog serving a fixed set of movies; `None` simulates an outage
struct StaticCatalog {
    movies: Option<Vec<Movie>>,
}

impl StaticCatalog {
    fn movies(&self) -> AppResult<&Vec<Movie>> {
        self.movies
            .as_ref()
            .ok_or_else(|| AppError::ExternalApi("catalog offline".to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn search_movies(&self, query: &str, _page: u32) -> AppResult<SearchPage> {
        if query.trim().is_empty() {
            return Ok(SearchPage::default());
        }
        let results: Vec<Movie> = self
            .movies()?
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query.to_lowercase()))
            .cloned()
            .collect();
        Ok(SearchPage {
            total_pages: u32::from(!results.is_empty()),
            results,
        })
    }

    async fn discover_by_genres(
        &self,
        genre_ids: &[u64],
        _sort: DiscoverSort,
    ) -> AppResult<Vec<Movie>> {
        Ok(self
            .movies()?
            .iter()
            .filter(|m| m.genres.iter().any(|g| genre_ids.contains(&g.id)))
            .cloned()
            .collect())
    }

    async fn trending(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies()?.clone())
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.movies()?;
        Ok(vec![Genre {
            id: 878,
            name: "Science Fiction".to_string(),
        }])
    }

    async fn movie_details(&self, id: u64) -> AppResult<Movie> {
        self.movies()?
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| AppError::ExternalApi(format!("no movie {}", id)))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

struct StaticEncyclopedia;

#[async_trait::async_trait]
impl Encyclopedia for StaticEncyclopedia {
    async fn summary(&self, title: &str) -> Option<String> {
        (title == "Inception").then(|| "Inception is a 2010 science fiction film.".to_string())
    }
}

fn inception() -> Movie {
    Movie {
        id: 27205,
        title: "Inception".to_string(),
        poster_path: Some("/inception.jpg".to_string()),
        vote_average: 8.8,
        overview: "A thief who steals corporate secrets through dream-sharing.".to_string(),
        runtime: Some(148),
        genres: vec![Genre {
            id: 878,
            name: "Science Fiction".to_string(),
        }],
        cast: vec!["Leonardo DiCaprio".to_string()],
    }
}

fn heat() -> Movie {
    Movie {
        id: 949,
        title: "Heat".to_string(),
        poster_path: None,
        vote_average: 7.9,
        overview: String::new(),
        runtime: None,
        genres: Vec::new(),
        cast: Vec::new(),
    }
}

fn create_test_server_with(movies: Option<Vec<Movie>>, storage: Arc<MemoryStorage>) -> TestServer {
    let store = Arc::new(AppStore::new(storage, Variant::Component));
    let state = AppState::new(
        store,
        Arc::new(StaticCatalog { movies }),
        Arc::new(StaticEncyclopedia),
        "https://image.tmdb.org/t/p/w500".to_string(),
    );
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(Some(vec![inception(), heat()]), Arc::new(MemoryStorage::new()))
}

async fn register(server: &TestServer, email: &str, password: &str) -> serde_json::Value {
    let response = server
        .post("/account/register")
        .json(&json!({
            "username": "ana",
            "email": email,
            "password": password
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("trace-42"),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], "trace-42");
}

#[tokio::test]
async fn test_search_renders_single_card() {
    let server = create_test_server();

    let response = server.get("/movies/search").add_query_param("q", "Inception").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Inception");
    assert_eq!(results[0]["rating_label"], "8.8");
    assert_eq!(
        results[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/inception.jpg"
    );

    let response = server.get("/last-search").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["query"], "Inception");
}

#[tokio::test]
async fn test_catalog_outage_degrades_to_empty_sections() {
    let server = create_test_server_with(None, Arc::new(MemoryStorage::new()));

    let response = server.get("/movies/search").add_query_param("q", "Heat").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["results"].as_array().unwrap().is_empty());

    let trending: Vec<serde_json::Value> = server.get("/movies/trending").await.json();
    assert!(trending.is_empty());

    let genres: Vec<serde_json::Value> = server.get("/genres").await.json();
    assert!(genres.is_empty());

    server
        .get("/movies/27205")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discover_by_genre() {
    let server = create_test_server();

    let response = server.get("/movies/discover").add_query_param("genres", "878").await;
    response.assert_status_ok();
    let cards: Vec<serde_json::Value> = response.json();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["id"], 27205);

    server
        .get("/movies/discover")
        .add_query_param("genres", "sci-fi")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movies_by_genre() {
    let server = create_test_server();

    let response = server.get("/genres/878/movies").await;
    response.assert_status_ok();
    let cards: Vec<serde_json::Value> = response.json();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["title"], "Inception");

    let cards: Vec<serde_json::Value> = server.get("/genres/35/movies").await.json();
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_watchlist_add_is_idempotent() {
    let server = create_test_server();
    let movie = serde_json::to_value(inception()).unwrap();

    server
        .post("/watchlist")
        .json(&movie)
        .await
        .assert_status(StatusCode::CREATED);
    let response = server.post("/watchlist").json(&movie).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["changed"], false);

    let watchlist: Vec<serde_json::Value> = server.get("/watchlist").await.json();
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0]["id"], 27205);

    let response = server.get("/movies/search").add_query_param("q", "incep").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"][0]["in_watchlist"], true);
}

#[tokio::test]
async fn test_watchlist_remove_missing_is_noop() {
    let server = create_test_server();
    server.post("/watchlist").json(&heat()).await;

    let response = server.delete("/watchlist/1").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["changed"], false);

    let watchlist: Vec<serde_json::Value> = server.get("/watchlist").await.json();
    assert_eq!(watchlist.len(), 1);

    let body: serde_json::Value = server.delete("/watchlist/949").await.json();
    assert_eq!(body["changed"], true);
}

#[tokio::test]
async fn test_watchlist_toggle() {
    let server = create_test_server();

    let body: serde_json::Value = server.post("/watchlist/toggle").json(&heat()).await.json();
    assert_eq!(body["in_watchlist"], true);

    let body: serde_json::Value = server.post("/watchlist/toggle").json(&heat()).await.json();
    assert_eq!(body["in_watchlist"], false);
}

#[tokio::test]
async fn test_corrupt_watchlist_reads_as_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(&StorageKey::Watchlist, "][").unwrap();
    let server = create_test_server_with(Some(vec![heat()]), storage);

    let response = server.get("/watchlist").await;
    response.assert_status_ok();
    let watchlist: Vec<serde_json::Value> = response.json();
    assert!(watchlist.is_empty());
}

#[tokio::test]
async fn test_movie_details_with_local_state() {
    let server = create_test_server();
    server.post("/watchlist").json(&inception()).await;

    let response = server.get("/movies/27205").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Inception");
    assert_eq!(body["runtime"], 148);
    assert_eq!(body["in_watchlist"], true);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 0);
    assert!(body["average_user_rating"].is_null());
}

#[tokio::test]
async fn test_movie_summary() {
    let server = create_test_server();

    let body: serde_json::Value = server.get("/movies/27205/summary").await.json();
    assert_eq!(body["extract"], "Inception is a 2010 science fiction film.");

    let body: serde_json::Value = server.get("/movies/949/summary").await.json();
    assert!(body["extract"].is_null());
}

#[tokio::test]
async fn test_review_flow() {
    let server = create_test_server();

    // Signed out
    server
        .post("/movies/27205/reviews")
        .json(&json!({ "rating": 5, "text": "Great" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    register(&server, "ana@example.com", "pw").await;

    // Missing rating
    server
        .post("/movies/27205/reviews")
        .json(&json!({ "text": "Great" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/movies/27205/reviews")
        .json(&json!({ "rating": 4, "text": "Layered" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let review: serde_json::Value = response.json();
    assert_eq!(review["username"], "ana");
    assert_eq!(review["rating"], 4);

    // Rating only
    server
        .post("/movies/27205/reviews")
        .json(&json!({ "rating": 2 }))
        .await
        .assert_status(StatusCode::CREATED);

    let reviews: Vec<serde_json::Value> = server.get("/movies/27205/reviews").await.json();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[1]["text"], "");

    let body: serde_json::Value = server.get("/movies/27205").await.json();
    assert_eq!(body["average_user_rating"], 3.0);
}

#[tokio::test]
async fn test_login_with_wrong_password_leaves_current_user_untouched() {
    let storage = Arc::new(MemoryStorage::new());
    let server = create_test_server_with(Some(vec![heat()]), storage.clone());

    register(&server, "ana@example.com", "pw").await;
    server
        .post("/account/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .post("/account/login")
        .json(&json!({ "email": "ana@example.com", "password": "wrong" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(storage.get(&StorageKey::CurrentUser).unwrap(), None);

    let me: serde_json::Value = server.get("/account/me").await.json();
    assert!(me.is_null());

    let response = server
        .post("/account/login")
        .json(&json!({ "email": "ana@example.com", "password": "pw" }))
        .await;
    response.assert_status_ok();
    let me: serde_json::Value = server.get("/account/me").await.json();
    assert_eq!(me["email"], "ana@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let server = create_test_server();
    register(&server, "ana@example.com", "pw").await;

    server
        .post("/account/register")
        .json(&json!({
            "username": "other",
            "email": "ana@example.com",
            "password": "pw"
        }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_favorites_follow_current_user() {
    let server = create_test_server();

    server
        .get("/favorites")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    register(&server, "ana@example.com", "pw").await;
    server
        .post("/favorites")
        .json(&inception())
        .await
        .assert_status(StatusCode::CREATED);

    let favorites: Vec<serde_json::Value> = server.get("/favorites").await.json();
    assert_eq!(favorites.len(), 1);

    register(&server, "bo@example.com", "pw").await;
    let favorites: Vec<serde_json::Value> = server.get("/favorites").await.json();
    assert!(favorites.is_empty());

    let body: serde_json::Value = server.delete("/favorites/27205").await.json();
    assert_eq!(body["changed"], false);
}

#[tokio::test]
async fn test_preferences_round_trip() {
    let server = create_test_server();

    let prefs: serde_json::Value = server.get("/preferences").await.json();
    assert_eq!(prefs, json!({}));

    server
        .put("/preferences")
        .json(&json!({ "genres": [28, 878], "adult": false }))
        .await
        .assert_status_ok();

    let prefs: serde_json::Value = server.get("/preferences").await.json();
    assert_eq!(prefs["genres"], json!([28, 878]));
}
