//! Data models for the URL shortener application
//!
//! Request and response shapes for the `/api/shorturl` endpoints, plus the
//! record type that ties an original URL to its short id.

use serde::{Deserialize, Serialize};

/// An original URL together with the sequential id it was assigned
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// The URL exactly as it was submitted
    pub original_url: String,

    /// Sequential identifier; the first stored URL gets 0
    pub short_id: u64,
}

/// Form payload for `POST /api/shorturl`
///
/// # Example
/// Body: `url=https%3A%2F%2Fexample.com`
#[derive(Deserialize, Debug, Default)]
pub struct ShortenForm {
    /// The URL to shorten. A missing field is answered like an invalid URL.
    pub url: Option<String>,
}

/// Response returned after shortening a URL
///
/// # Example
/// ```json
/// { "original_url": "https://freecodecamp.org", "short_url": 0 }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: u64,
}

impl From<UrlRecord> for ShortenResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            original_url: record.original_url,
            short_url: record.short_id,
        }
    }
}
