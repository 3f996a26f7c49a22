//! Rendering of wall posts and their attachments into HTML item bodies

use crate::config::MediaToggles;
use crate::models::{Attachment, AttachmentKind, WallPost};

const LINE_BREAK: &str = "<br>";
const AUDIO_MARKER: &str = "🎧";
const VIDEO_MARKER: &str = "🎬";
const DOCUMENT_MARKER: &str = "💾";

/// Pick the first non-empty candidate, candidates ordered by priority
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find(|candidate| !candidate.is_empty())
}

/// Render a single attachment.
///
/// Returns an empty string for disabled categories, unknown types and photos
/// without any usable size.
pub fn render_attachment(attachment: &Attachment, toggles: &MediaToggles) -> String {
    if !attachment.kind().is_some_and(|kind| toggles.allows(kind)) {
        return String::new();
    }

    match attachment {
        Attachment::Photo(photo) => first_non_empty(photo.candidates())
            .map(|url| format!("<img src='{url}'>{LINE_BREAK}"))
            .unwrap_or_default(),
        Attachment::Audio(audio) => {
            format!("{AUDIO_MARKER} {} - {}{LINE_BREAK}", audio.artist, audio.title)
        }
        Attachment::Video(video) => {
            let thumbnail = first_non_empty(video.thumbnail_candidates()).unwrap_or_default();
            format!(
                "{VIDEO_MARKER} {}{LINE_BREAK}<img src='{thumbnail}'>{LINE_BREAK}",
                video.title
            )
        }
        Attachment::Document(doc) => format!(
            "{DOCUMENT_MARKER} <a href='{}'>{}</a>{LINE_BREAK}",
            doc.url, doc.title
        ),
        Attachment::Other(_) => String::new(),
    }
}

/// Build the item body of a post.
///
/// The text of the effective post comes first, then attachments grouped by
/// category (photos, audio, video, documents), each group in stored order.
pub fn normalize_post(post: &WallPost, toggles: &MediaToggles) -> String {
    let effective = post.effective();

    let mut content = effective.text.replace('\n', LINE_BREAK);
    content.push_str(LINE_BREAK);

    for kind in AttachmentKind::RENDER_ORDER {
        if !toggles.allows(kind) {
            continue;
        }

        for attachment in effective
            .attachments
            .iter()
            .filter(|attachment| attachment.kind() == Some(kind))
        {
            content.push_str(&render_attachment(attachment, toggles));
        }
    }

    content
}
