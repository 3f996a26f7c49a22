//! VK API calls: group profile lookup and wall page listing

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::{API_LANGUAGE, API_VERSION, Config};
use crate::error::FeedError;
use crate::models::{GroupProfile, WallPost};
use crate::render::first_non_empty;
use crate::traits::HttpFetch;

const GROUP_METHOD: &str = "groups.getById";
const WALL_METHOD: &str = "wall.get";
const UNKNOWN_UPSTREAM_ERROR: &str = "unknown upstream error";

/// Every VK answer is `{"response": ...}` or `{"error": {...}}`
#[derive(Deserialize)]
struct Envelope {
    response: Option<Value>,
    error: Option<Value>,
}

#[derive(Deserialize)]
struct RawGroup {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    photo_200: String,
    #[serde(default)]
    photo_100: String,
    #[serde(default)]
    photo_50: String,
}

impl From<RawGroup> for GroupProfile {
    fn from(raw: RawGroup) -> Self {
        let avatar_url = first_non_empty([
            raw.photo_200.as_str(),
            raw.photo_100.as_str(),
            raw.photo_50.as_str(),
        ])
        .unwrap_or_default()
        .to_string();

        Self {
            title: raw.name,
            description: raw.description,
            avatar_url,
        }
    }
}

#[derive(Deserialize)]
struct WallPage {
    #[serde(default)]
    items: Vec<WallPost>,
}

/// Client for the two VK methods the feed needs
#[derive(Clone)]
pub struct VkApi {
    transport: Arc<dyn HttpFetch>,
    config: Arc<Config>,
}

impl VkApi {
    pub fn new(transport: Arc<dyn HttpFetch>, config: Arc<Config>) -> Self {
        Self { transport, config }
    }

    /// Fetch title, description and avatar of the configured group
    pub async fn fetch_group_profile(&self) -> Result<GroupProfile, FeedError> {
        let params = [
            ("access_token", self.config.access_token.clone()),
            ("group_ids", self.config.domain.clone()),
            ("fields", "description".to_string()),
        ];

        let groups: Vec<RawGroup> = self.call(GROUP_METHOD, &params).await?;

        let group = groups.into_iter().next().ok_or_else(|| {
            FeedError::MalformedResponse(format!("{GROUP_METHOD} returned no groups"))
        })?;

        let profile = GroupProfile::from(group);
        info!("Fetched profile of {}: {}", self.config.domain, profile.title);
        Ok(profile)
    }

    /// Fetch one page of wall posts, newest first as returned by VK
    pub async fn fetch_wall_page(&self) -> Result<Vec<WallPost>, FeedError> {
        let params = [
            ("access_token", self.config.access_token.clone()),
            ("domain", self.config.domain.clone()),
            ("filter", self.config.filter.clone()),
            ("count", self.config.count.to_string()),
        ];

        let page: WallPage = self.call(WALL_METHOD, &params).await?;

        info!("Fetched {} posts from {}", page.items.len(), self.config.domain);
        Ok(page.items)
    }

    async fn call<T>(&self, method: &str, params: &[(&str, String)]) -> Result<T, FeedError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base_url, method);

        let mut query = params.to_vec();
        query.push(("lang", API_LANGUAGE.to_string()));
        query.push(("v", API_VERSION.to_string()));

        let body = self.transport.get(&url, &query).await?;

        decode_response(method, &body)
    }
}

/// Decode a VK envelope, turning an `error` object into `UpstreamApi`
fn decode_response<T>(method: &str, body: &str) -> Result<T, FeedError>
where
    T: DeserializeOwned,
{
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| FeedError::MalformedResponse(format!("{method}: {e}")))?;

    if let Some(error) = envelope.error {
        let message = error
            .get("error_msg")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_UPSTREAM_ERROR)
            .to_string();
        let code = error.get("error_code").and_then(Value::as_i64);

        warn!("{} failed: {}", method, message);
        return Err(FeedError::UpstreamApi { code, message });
    }

    let response = envelope
        .response
        .ok_or_else(|| FeedError::MalformedResponse(format!("{method}: missing response")))?;

    serde_json::from_value(response)
        .map_err(|e| FeedError::MalformedResponse(format!("{method}: {e}")))
}
