//! Turns the wall of a VK group into an RSS feed.
//!
//! [`WallFeed`] fetches the group profile and one page of wall posts, renders
//! every post (following reposts to the original content) and serializes the
//! result with a [`FeedSerializer`], RSS 2.0 by default.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod render;
pub mod rss;
pub mod traits;
pub mod vk;
pub mod wall_feed;

pub use config::{Config, ConfigError, MediaToggles};
pub use error::FeedError;
pub use traits::{FeedSerializer, HttpFetch};
pub use wall_feed::{WallFeed, assemble_feed, build_feed};
