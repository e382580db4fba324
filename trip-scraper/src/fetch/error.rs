//! Page fetch error types.

/// Errors from fetching a route page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// No page is known for this URL
    #[error("page not found: {0}")]
    NotFound(String),

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}
