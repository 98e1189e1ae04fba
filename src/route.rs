//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::database::AppState;
use crate::handler::{create_short_url, missing_short_url, redirect_url};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/shorturl` - Shortens the form field `url`
/// - `GET /api/shorturl/{short_url}` - Redirects to the original URL
/// - `GET /api/shorturl` and `GET /api/shorturl/` - Error, no id given
///
/// Every response allows cross-origin requests.
///
/// # Example Usage
///
/// ```no_run
/// # use shorturl::database::{AppState, UrlStore};
/// # use shorturl::route::create_app;
/// let store = UrlStore::open("data.db").unwrap();
/// let app = create_app(AppState::new(store));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/shorturl", post(create_short_url).get(missing_short_url))
        .route("/shorturl/", get(missing_short_url))
        .route("/shorturl/{short_url}", get(redirect_url));

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
