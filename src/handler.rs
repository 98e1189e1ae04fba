//! HTTP request handlers for the URL shortener API
//!
//! `handle_shorten` and `handle_resolve` carry the request logic and only need a
//! [`UrlStore`]. The axum handlers below them adapt extractors and responses.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use url::Url;

use crate::database::{AppState, UrlStore};
use crate::error::AppError;
use crate::model::{ShortenForm, ShortenResponse, UrlRecord};
use crate::validation::is_valid_url;

/// Shortens `input`, reusing the existing id when the URL was seen before.
///
/// A missing input is rejected the same way as a malformed one.
pub fn handle_shorten(store: &UrlStore, input: Option<&str>) -> Result<UrlRecord, AppError> {
    let original_url = match input {
        Some(url) if is_valid_url(url) => url,
        _ => return Err(AppError::InvalidUrl),
    };

    let existing = if store.exists_by_original(original_url)? {
        store.lookup_short_by_original(original_url)?
    } else {
        None
    };

    // insert_new is find-or-create, so a lookup miss after a positive
    // existence check also lands here.
    let short_id = match existing {
        Some(short_id) => short_id,
        None => store.insert_new(original_url)?,
    };

    Ok(UrlRecord {
        original_url: original_url.to_string(),
        short_id,
    })
}

/// Resolves a short id to the original URL it was assigned to.
pub fn handle_resolve(store: &UrlStore, short_url: Option<&str>) -> Result<String, AppError> {
    let short_url = short_url.ok_or(AppError::MissingShortUrl)?;

    if !store.exists_by_short(short_url)? {
        return Err(AppError::ShortUrlNotFound);
    }

    store
        .lookup_original_by_short(short_url)?
        .ok_or_else(|| {
            tracing::warn!(short_url, "short url vanished between existence check and lookup");
            AppError::ShortUrlNotFound
        })
}

/// `POST /api/shorturl`
///
/// # Request Body
///
/// Form-encoded: `url=https%3A%2F%2Fexample.com`
///
/// # Response
///
/// - `{ "original_url": "https://example.com", "short_url": 0 }`
/// - `{ "error": "invalid url" }` when `url` is missing, malformed or not http(s)
pub async fn create_short_url(
    State(state): State<AppState>,
    form: Result<Form<ShortenForm>, FormRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    // Bodies that are not form-encoded carry no `url` field.
    let payload = form.map(|Form(payload)| payload).unwrap_or_default();

    match handle_shorten(&state.store, payload.url.as_deref()) {
        Ok(record) => Ok(Json(record.into())),
        Err(err) => {
            tracing::debug!(url = ?payload.url, error = %err, "rejected shorten request");
            Err(err)
        }
    }
}

/// `GET /api/shorturl/{short_url}`
///
/// Sends a `302 Found` to the original URL.
pub async fn redirect_url(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = handle_resolve(&state.store, Some(&short_url))?;
    Ok(found(&original_url))
}

/// `GET /api/shorturl` with no id
pub async fn missing_short_url() -> AppError {
    AppError::MissingShortUrl
}

fn found(original_url: &str) -> Response {
    // The serialized Url is percent-encoded and punycoded, so the Location
    // header is always an ASCII URI.
    let location = match Url::parse(original_url).map(String::from).map(HeaderValue::try_from) {
        Ok(Ok(value)) => value,
        _ => {
            tracing::error!(original_url, "stored url cannot be used as a redirect target");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
