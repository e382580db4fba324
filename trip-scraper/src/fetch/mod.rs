//! Route page retrieval.
//!
//! [`PageSource`] is the seam between the scraper and the network:
//! [`PageClient`] fetches live pages, [`StaticPages`] serves pages held in
//! memory or loaded from disk.

mod client;
mod error;
mod static_pages;

use std::future::Future;

pub use client::{FetchConfig, PageClient};
pub use error::FetchError;
pub use static_pages::StaticPages;

/// Something that can produce a page's document text for a URL.
pub trait PageSource {
    /// Fetch the page at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}
