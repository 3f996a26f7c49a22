use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::FeedError;
use crate::http::ReqwestFetcher;
use crate::models::{Feed, FeedImage, FeedItem, GroupProfile, WallPost, unix_to_utc};
use crate::render::normalize_post;
use crate::rss::RssSerializer;
use crate::traits::{FeedSerializer, HttpFetch};
use crate::vk::VkApi;

/// Fetch-render-serialize pipeline for one group wall
#[derive(Clone)]
pub struct WallFeed {
    api: VkApi,
    config: Arc<Config>,
    serializer: Arc<dyn FeedSerializer>,
}

impl WallFeed {
    /// Pipeline over reqwest producing RSS
    pub fn new(config: Config) -> Result<Self, FeedError> {
        let transport = ReqwestFetcher::new(config.proxy.as_deref())?;
        Ok(Self::with_parts(
            config,
            Arc::new(transport),
            Arc::new(RssSerializer),
        ))
    }

    pub fn with_parts(
        config: Config,
        transport: Arc<dyn HttpFetch>,
        serializer: Arc<dyn FeedSerializer>,
    ) -> Self {
        let config = Arc::new(config);
        let api = VkApi::new(transport, config.clone());

        Self {
            api,
            config,
            serializer,
        }
    }

    /// MIME type of the rendered document, for the HTTP layer serving it
    pub fn content_type(&self) -> &'static str {
        self.serializer.content_type()
    }

    /// Fetch profile and wall concurrently, then render the document.
    ///
    /// Any fetch failure fails the whole build; no placeholder metadata is produced.
    pub async fn render(&self) -> Result<String, FeedError> {
        info!("Building feed for {}", self.config.domain);

        let (profile, posts) = tokio::try_join!(
            self.api.fetch_group_profile(),
            self.api.fetch_wall_page()
        )?;

        let document = assemble_feed(&profile, &posts, &self.config, self.serializer.as_ref())?;

        info!("Feed for {} ready with {} items", self.config.domain, posts.len());
        Ok(document)
    }
}

/// Build the feed model from a profile and a wall page.
///
/// Item identity and dates come from the fetched post, bodies from its effective post.
pub fn build_feed(
    profile: &GroupProfile,
    posts: &[WallPost],
    config: &Config,
) -> Result<Feed, FeedError> {
    let newest = posts.first().ok_or(FeedError::EmptyPage)?;
    let now = unix_to_utc(newest.date);
    let link = config.group_url();

    let items = posts
        .iter()
        .map(|post| {
            let posted_at = unix_to_utc(post.date);
            FeedItem {
                id: format!("{}_{}", post.owner_id, post.id),
                link: format!("https://vk.com/wall{}_{}", post.owner_id, post.id),
                created: posted_at,
                updated: posted_at,
                content: normalize_post(post, &config.toggles),
            }
        })
        .collect();

    Ok(Feed {
        title: profile.title.clone(),
        link: link.clone(),
        description: profile.description.clone(),
        copyright: config.copyright.clone(),
        image: FeedImage {
            url: profile.avatar_url.clone(),
            title: profile.title.clone(),
            link,
        },
        created: now,
        updated: now,
        items,
    })
}

/// Build the feed and serialize it
pub fn assemble_feed(
    profile: &GroupProfile,
    posts: &[WallPost],
    config: &Config,
    serializer: &dyn FeedSerializer,
) -> Result<String, FeedError> {
    let feed = build_feed(profile, posts, config)?;
    serializer.serialize(&feed)
}
