//! Normalizes raw catalog JSON into [`Movie`] values.
//!
//! Search, discover and trending results, detail responses and stored snapshots all
//! come through here. Parsing is tagged: an entry without a usable id or title is
//! an error, never a half-filled movie.

use serde_json::Value;

use crate::models::{Genre, Movie, MAX_CAST};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogParseError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing or invalid movie id")]
    MissingId,

    #[error("movie {0} has neither title nor name")]
    MissingTitle(u64),
}

/// First non-empty string among `fields`
fn first_text<'a>(raw: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| raw.get(*field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

/// Maps one catalog object to a movie.
///
/// `title` falls back to `name`, `overview` to `summary` and then to empty text.
/// A missing rating reads as `0.0`.
pub fn parse_movie(raw: &Value) -> Result<Movie, CatalogParseError> {
    if !raw.is_object() {
        return Err(CatalogParseError::NotAnObject);
    }

    let id = raw
        .get("id")
        .and_then(Value::as_u64)
        .ok_or(CatalogParseError::MissingId)?;

    let title = first_text(raw, &["title", "name"])
        .ok_or(CatalogParseError::MissingTitle(id))?
        .to_string();

    let genres = raw
        .get("genres")
        .and_then(|g| serde_json::from_value::<Vec<Genre>>(g.clone()).ok())
        .unwrap_or_default();

    Ok(Movie {
        id,
        title,
        poster_path: raw
            .get("poster_path")
            .and_then(Value::as_str)
            .map(str::to_string),
        vote_average: raw
            .get("vote_average")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        overview: first_text(raw, &["overview", "summary"])
            .unwrap_or_default()
            .to_string(),
        runtime: raw
            .get("runtime")
            .and_then(Value::as_u64)
            .and_then(|minutes| u32::try_from(minutes).ok()),
        genres,
        cast: Vec::new(),
    })
}

/// Maps the `results` array of a list response, skipping entries that do not parse
pub fn parse_results(raw: &Value) -> Vec<Movie> {
    let Some(results) = raw.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|entry| match parse_movie(entry) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unparseable catalog entry");
                None
            }
        })
        .collect()
}

/// Up to [`MAX_CAST`] actor names from a credits response
pub fn parse_cast(raw: &Value) -> Vec<String> {
    raw.get("cast")
        .and_then(Value::as_array)
        .map(|cast| {
            cast.iter()
                .filter_map(|member| member.get("name").and_then(Value::as_str))
                .take(MAX_CAST)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The `genres` array of a genre-list response
pub fn parse_genres(raw: &Value) -> Vec<Genre> {
    raw.get("genres")
        .and_then(|g| serde_json::from_value(g.clone()).ok())
        .unwrap_or_default()
}
