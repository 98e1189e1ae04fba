//! URL validation for submitted links

use url::Url;

/// Returns true if `input` is an absolute URL with an `http` or `https` scheme.
///
/// Relative references, empty strings and every other scheme (`ftp:`,
/// `mailto:`, `javascript:`, ...) are rejected.
///
/// # Example
///
/// ```
/// # use shorturl::validation::is_valid_url;
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("ftp://example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
