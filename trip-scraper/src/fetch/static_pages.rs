//! Page source backed by pre-loaded documents.
//!
//! Useful for tests and for re-running extraction against saved pages
//! without touching the network.

use std::collections::HashMap;
use std::path::Path;

use super::PageSource;
use super::error::FetchError;

/// Serves documents from memory, keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
}

impl StaticPages {
    /// Create an empty page set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page for a URL, replacing any previous one.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Add a page whose body is read from a file.
    pub fn with_file(self, url: impl Into<String>, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let body = std::fs::read_to_string(path)?;
        Ok(self.with_page(url, body))
    }

    /// Number of pages held.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no pages are held.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageSource for StaticPages {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn serves_known_pages() {
        let pages = StaticPages::new().with_page("https://a/", "<html></html>");
        assert_eq!(pages.fetch("https://a/").await.unwrap(), "<html></html>");
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn unknown_page_is_not_found() {
        let pages = StaticPages::new();
        assert!(pages.is_empty());
        assert!(matches!(
            pages.fetch("https://missing/").await,
            Err(FetchError::NotFound(url)) if url == "https://missing/"
        ));
    }

    #[tokio::test]
    async fn loads_page_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<p>saved</p>").unwrap();

        let pages = StaticPages::new().with_file("https://saved/", file.path()).unwrap();
        assert_eq!(pages.fetch("https://saved/").await.unwrap(), "<p>saved</p>");
    }
}
