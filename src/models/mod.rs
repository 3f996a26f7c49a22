//! Data models for VK wall posts, group profiles and the assembled feed

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Group metadata used for the feed channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupProfile {
    pub title: String,
    pub description: String,
    /// Largest available avatar, empty when the group has none
    pub avatar_url: String,
}

/// A post as returned by `wall.get`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WallPost {
    pub owner_id: i64,
    pub id: i64,
    /// Unix seconds
    pub date: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Reposted posts, the first one is the original being shared
    #[serde(default, rename = "copy_history")]
    pub repost_chain: Vec<WallPost>,
}

impl WallPost {
    /// The post whose body is displayed: the repost target if any, otherwise the post itself
    pub fn effective(&self) -> &WallPost {
        self.repost_chain.first().unwrap_or(self)
    }
}

/// Attachment categories, in the order they are rendered into item bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Photo,
    Audio,
    Video,
    Document,
}

impl AttachmentKind {
    pub const RENDER_ORDER: [AttachmentKind; 4] = [
        AttachmentKind::Photo,
        AttachmentKind::Audio,
        AttachmentKind::Video,
        AttachmentKind::Document,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    Photo(Photo),
    Audio(Audio),
    Video(Video),
    Document(Document),
    /// Any type tag we do not render (`link`, `poll`, `sticker`, ...)
    Other(String),
}

impl Attachment {
    pub fn kind(&self) -> Option<AttachmentKind> {
        match self {
            Attachment::Photo(_) => Some(AttachmentKind::Photo),
            Attachment::Audio(_) => Some(AttachmentKind::Audio),
            Attachment::Video(_) => Some(AttachmentKind::Video),
            Attachment::Document(_) => Some(AttachmentKind::Document),
            Attachment::Other(_) => None,
        }
    }
}

/// Photo sizes, largest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub photo_1280: String,
    pub photo_807: String,
    pub photo_604: String,
    pub photo_130: String,
}

impl Photo {
    pub fn candidates(&self) -> [&str; 4] {
        [
            &self.photo_1280,
            &self.photo_807,
            &self.photo_604,
            &self.photo_130,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Audio {
    pub artist: String,
    pub title: String,
}

/// Video with its thumbnail sizes, largest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Video {
    pub title: String,
    pub photo_800: String,
    pub photo_640: String,
    pub photo_320: String,
    pub photo_130: String,
}

impl Video {
    pub fn thumbnail_candidates(&self) -> [&str; 4] {
        [
            &self.photo_800,
            &self.photo_640,
            &self.photo_320,
            &self.photo_130,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Document {
    pub url: String,
    pub title: String,
}

/// Wire shape of an attachment: `{"type": "photo", "photo": {...}}`
#[derive(Deserialize)]
struct RawAttachment {
    #[serde(rename = "type")]
    kind: String,
    photo: Option<Photo>,
    audio: Option<Audio>,
    video: Option<Video>,
    doc: Option<Document>,
}

impl<'de> Deserialize<'de> for Attachment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawAttachment::deserialize(deserializer)?;

        let attachment = match raw.kind.as_str() {
            "photo" => Attachment::Photo(raw.photo.unwrap_or_default()),
            "audio" => Attachment::Audio(raw.audio.unwrap_or_default()),
            "video" => Attachment::Video(raw.video.unwrap_or_default()),
            "doc" => Attachment::Document(raw.doc.unwrap_or_default()),
            _ => Attachment::Other(raw.kind),
        };

        Ok(attachment)
    }
}

/// Channel image shown by feed readers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedImage {
    pub url: String,
    pub title: String,
    pub link: String,
}

/// One rendered wall post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// `{owner_id}_{post_id}` of the outer post
    pub id: String,
    pub link: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub copyright: String,
    pub image: FeedImage,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

/// Convert VK unix seconds, falling back to the epoch for out-of-range values
pub fn unix_to_utc(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_else(|| {
        warn!("Timestamp {} is out of range, using the epoch", seconds);
        DateTime::default()
    })
}
