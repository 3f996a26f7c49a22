//! Error taxonomy for the fetch-transform-serialize pipeline

use thiserror::Error;

/// Failures surfaced by the fetchers, the assembler and the serializer.
///
/// Every variant is returned to the caller; nothing in the library terminates the process.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    Transport(String),
    /// The API answered with a non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// The body is not JSON or does not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The body decoded but carried an `error` object
    #[error("Upstream API error: {message}")]
    UpstreamApi { code: Option<i64>, message: String },
    /// The wall page has no posts, so the feed has no timestamp to derive
    #[error("Wall page is empty")]
    EmptyPage,
    /// The feed could not be written in the target format
    #[error("Failed to serialize feed: {0}")]
    Serialization(String),
}
