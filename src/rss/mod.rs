//! RSS 2.0 writer built on quick-xml

use std::io::Cursor;

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::FeedError;
use crate::models::{Feed, FeedItem};
use crate::traits::FeedSerializer;

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Writes feeds as RSS 2.0 with bodies in `content:encoded`
#[derive(Debug, Clone, Copy, Default)]
pub struct RssSerializer;

impl FeedSerializer for RssSerializer {
    fn content_type(&self) -> &'static str {
        "application/rss+xml; charset=utf-8"
    }

    fn serialize(&self, feed: &Feed) -> Result<String, FeedError> {
        let mut writer = RssWriter::new();
        writer.write_feed(feed)?;
        writer.finish()
    }
}

struct RssWriter {
    inner: Writer<Cursor<Vec<u8>>>,
}

impl RssWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new(Cursor::new(Vec::new())),
        }
    }

    fn finish(self) -> Result<String, FeedError> {
        String::from_utf8(self.inner.into_inner().into_inner())
            .map_err(|e| FeedError::Serialization(e.to_string()))
    }

    fn write_feed(&mut self, feed: &Feed) -> Result<(), FeedError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", CONTENT_NAMESPACE));
        self.event(Event::Start(rss))?;
        self.start("channel")?;

        self.text_element("title", &feed.title)?;
        self.text_element("link", &feed.link)?;
        self.text_element("description", &feed.description)?;
        self.text_element("copyright", &feed.copyright)?;
        self.date_element("pubDate", &feed.created)?;
        self.date_element("lastBuildDate", &feed.updated)?;

        if !feed.image.url.is_empty() {
            self.start("image")?;
            self.text_element("url", &feed.image.url)?;
            self.text_element("title", &feed.image.title)?;
            self.text_element("link", &feed.image.link)?;
            self.end("image")?;
        }

        for item in &feed.items {
            self.write_item(item)?;
        }

        self.end("channel")?;
        self.end("rss")
    }

    fn write_item(&mut self, item: &FeedItem) -> Result<(), FeedError> {
        self.start("item")?;

        self.text_element("title", "")?;
        self.text_element("link", &item.link)?;
        self.text_element("description", "")?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        self.event(Event::Start(guid))?;
        self.event(Event::Text(BytesText::new(&item.id)))?;
        self.end("guid")?;

        self.date_element("pubDate", &item.created)?;

        self.start("content:encoded")?;
        // CDATA cannot contain its own terminator
        if item.content.contains("]]>") {
            self.event(Event::Text(BytesText::new(&item.content)))?;
        } else {
            self.event(Event::CData(BytesCData::new(item.content.as_str())))?;
        }
        self.end("content:encoded")?;

        self.end("item")
    }

    fn text_element(&mut self, name: &str, value: &str) -> Result<(), FeedError> {
        self.start(name)?;
        if !value.is_empty() {
            self.event(Event::Text(BytesText::new(value)))?;
        }
        self.end(name)
    }

    fn date_element(&mut self, name: &str, value: &DateTime<Utc>) -> Result<(), FeedError> {
        self.text_element(name, &value.to_rfc2822())
    }

    fn start(&mut self, name: &str) -> Result<(), FeedError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), FeedError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), FeedError> {
        self.inner
            .write_event(event)
            .map_err(|e| FeedError::Serialization(e.to_string()))
    }
}
