//! RSS 2.0 feed rendering

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::config::SiteConfig;
use crate::content::PostView;
use crate::error::{ConfigError, Result};

/// Feed-level settings
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub title: String,
    pub description: String,
    /// Canonical site URL; the feed cannot be rendered without it
    pub site_url: Option<String>,
    /// Path of the XSL stylesheet browsers use to present the feed
    pub stylesheet: String,
    pub language: String,
}

impl FeedSettings {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            site_url: config.site_url().map(str::to_string),
            stylesheet: config.feed.stylesheet.clone(),
            language: config.language.clone(),
        }
    }
}

/// One entry of the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    /// Site-relative link, the post's `url_path`
    pub link: String,
    pub pub_date: DateTime<Utc>,
    pub description: String,
}

impl From<&PostView> for FeedItem {
    fn from(view: &PostView) -> Self {
        Self {
            title: view.record.title.clone(),
            link: view.url_path.clone(),
            pub_date: view.record.pub_date,
            description: view.record.description.clone(),
        }
    }
}

/// A rendered feed, ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    /// Site URL without a trailing slash
    pub site: String,
    pub language: String,
    pub stylesheet: String,
    pub items: Vec<FeedItem>,
}

/// Build a feed document from posts that are already sorted and limited
///
/// Fails with [`ConfigError::SiteNotConfigured`] before looking at any item
/// when the site URL is unset.
pub fn render_feed(
    settings: &FeedSettings,
    items: &[PostView],
) -> std::result::Result<FeedDocument, ConfigError> {
    let site = settings
        .site_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::SiteNotConfigured)?;

    Ok(FeedDocument {
        title: settings.title.clone(),
        description: settings.description.clone(),
        site: site.trim_end_matches('/').to_string(),
        language: settings.language.clone(),
        stylesheet: settings.stylesheet.clone(),
        items: items.iter().map(FeedItem::from).collect(),
    })
}

impl FeedDocument {
    /// Well-known path of the feed, relative to the site root
    pub const PATH: &'static str = "rss.xml";

    /// Absolute URL of an item link
    pub fn absolute_link(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("{}/{}", self.site, link.trim_start_matches('/'))
        }
    }

    /// Serialize the document as RSS 2.0 XML
    pub fn to_xml(&self) -> Result<String> {
        let bytes = self.write_rss()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_rss(&self) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let stylesheet = format!(
            r#"xml-stylesheet href="{}" type="text/xsl""#,
            escape(self.stylesheet.as_str())
        );
        writer.write_event(Event::PI(BytesPI::new(stylesheet.as_str())))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", &self.title)?;
        push_text(&mut writer, "description", &self.description)?;
        push_text(&mut writer, "link", &self.site)?;
        push_text(&mut writer, "language", &self.language)?;

        for item in &self.items {
            let link = self.absolute_link(&item.link);

            writer.write_event(Event::Start(BytesStart::new("item")))?;
            push_text(&mut writer, "title", &item.title)?;
            push_text(&mut writer, "link", &link)?;

            let mut guid = BytesStart::new("guid");
            guid.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid))?;
            writer.write_event(Event::Text(BytesText::new(&link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_text(&mut writer, "description", &item.description)?;
            push_text(&mut writer, "pubDate", &item.pub_date.to_rfc2822())?;
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
