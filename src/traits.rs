//! Seams to the outside world: the HTTP transport and the feed format writer

use async_trait::async_trait;

use crate::error::FeedError;
use crate::models::Feed;

/// GET-only HTTP access used by the VK fetchers
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Perform a GET request and return the response body
    ///
    /// # Arguments
    /// * `url` - Absolute URL without query string
    /// * `query` - Query parameters, appended in order
    ///
    /// # Returns
    /// * `Result<String, FeedError>` - Body text, or `Transport` / `HttpStatus` on failure
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, FeedError>;
}

/// Turns an assembled feed into a document
pub trait FeedSerializer: Send + Sync {
    /// MIME type of the produced document
    fn content_type(&self) -> &'static str;

    /// Serialize the feed
    ///
    /// # Returns
    /// * `Result<String, FeedError>` - The document text or a `Serialization` error
    fn serialize(&self, feed: &Feed) -> Result<String, FeedError>;
}
