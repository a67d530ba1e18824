//! Post models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A validated blog post record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Post title
    pub title: String,

    /// Short summary, used in listings and the feed
    pub description: String,

    /// Publication date
    pub pub_date: DateTime<Utc>,

    /// Collection-relative identifier, e.g. `2024/hello-world`
    pub slug: String,
}

/// A post record together with its public URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub record: PostRecord,

    /// Collection-relative public URL (`/{collection}/{slug}`)
    pub url_path: String,
}

impl PostView {
    pub fn new(collection: &str, record: PostRecord) -> Self {
        let url_path = format!("/{}/{}", collection, record.slug);
        Self { record, url_path }
    }
}

/// Anything that carries a publication date
pub trait Dated {
    fn pub_date(&self) -> DateTime<Utc>;
}

impl Dated for PostRecord {
    fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }
}

impl Dated for PostView {
    fn pub_date(&self) -> DateTime<Utc> {
        self.record.pub_date
    }
}
