/// TMDb catalog provider
///
/// Every request carries the `api_key` query parameter. List endpoints answer with a
/// `results` array; detail endpoints answer with the resource object itself.
///
/// API Flow:
/// 1. Browse: /search/movie, /discover/movie, /trending/movie/week, /genre/movie/list
/// 2. Details: /movie/{id} and /movie/{id}/credits, fetched concurrently and joined
use crate::{
    error::{AppError, AppResult},
    models::{Genre, Movie, SearchPage},
    services::catalog::{mapper, CatalogProvider, DiscoverSort},
};
use reqwest::Client as HttpClient;
use serde_json::Value;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GETs `path` with the API key plus `params` and returns the JSON body
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> AppResult<Value> {
        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        if query.trim().is_empty() {
            return Ok(SearchPage::default());
        }

        let body = self
            .get_json(
                "/search/movie",
                &[("query", query.to_string()), ("page", page.max(1).to_string())],
            )
            .await?;

        let results = mapper::parse_results(&body);
        let total_pages = body
            .get("total_pages")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);

        tracing::info!(
            query = %query,
            page,
            results = results.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(SearchPage {
            results,
            total_pages,
        })
    }

    async fn discover_by_genres(
        &self,
        genre_ids: &[u64],
        sort: DiscoverSort,
    ) -> AppResult<Vec<Movie>> {
        let with_genres = genre_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut params = vec![("with_genres", with_genres)];
        if sort == DiscoverSort::Popularity {
            params.push(("sort_by", "popularity.desc".to_string()));
        }

        let body = self.get_json("/discover/movie", &params).await?;

        Ok(mapper::parse_results(&body))
    }

    async fn trending(&self) -> AppResult<Vec<Movie>> {
        let body = self.get_json("/trending/movie/week", &[]).await?;
        Ok(mapper::parse_results(&body))
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let body = self.get_json("/genre/movie/list", &[]).await?;
        Ok(mapper::parse_genres(&body))
    }

    async fn movie_details(&self, id: u64) -> AppResult<Movie> {
        let movie_path = format!("/movie/{}", id);
        let credits_path = format!("/movie/{}/credits", id);

        let (movie, credits) = tokio::join!(
            self.get_json(&movie_path, &[]),
            self.get_json(&credits_path, &[])
        );

        let mut movie = mapper::parse_movie(&movie?)?;
        // Details still render when only the credits call failed
        movie.cast = match credits {
            Ok(credits) => mapper::parse_cast(&credits),
            Err(e) => {
                tracing::warn!(movie_id = id, error = %e, "Credits unavailable, showing no cast");
                Vec::new()
            }
        };

        tracing::info!(
            movie_id = id,
            cast = movie.cast.len(),
            provider = self.name(),
            "Movie details fetched"
        );

        Ok(movie)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
