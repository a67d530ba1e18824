//! Post collections: validated, sorted and limited access to posts

use serde_yaml::Mapping;
use std::collections::HashMap;

use super::post::{Dated, PostRecord, PostView};
use super::schema;
use crate::error::Result;

/// An unvalidated entry of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Collection-relative identifier, used in error messages
    pub id: String,
    /// Front-matter data
    pub data: Mapping,
}

/// Storage that can list the raw entries of a named collection
pub trait CollectionSource {
    fn read_collection(&self, name: &str) -> Result<Vec<RawEntry>>;
}

/// In-memory collection storage
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: HashMap<String, Vec<RawEntry>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a collection
    pub fn insert(&mut self, collection: &str, entry: RawEntry) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(entry);
    }
}

impl CollectionSource for MemorySource {
    fn read_collection(&self, name: &str) -> Result<Vec<RawEntry>> {
        Ok(self.collections.get(name).cloned().unwrap_or_default())
    }
}

/// Read access to validated posts
///
/// Every call re-reads the source and re-validates every entry; nothing is
/// cached between calls.
pub struct Collection<S> {
    source: S,
}

impl<S: CollectionSource> Collection<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load and validate all posts of a collection, in storage order
    ///
    /// A single invalid entry fails the whole call.
    pub fn get_posts(&self, name: &str) -> Result<Vec<PostRecord>> {
        let entries = self.source.read_collection(name)?;
        tracing::debug!("Read {} entries from collection {:?}", entries.len(), name);

        entries
            .iter()
            .map(|entry| schema::validate(&entry.id, &entry.data).map_err(Into::into))
            .collect()
    }

    /// Load posts newest first with their public URL, keeping at most `limit`
    pub fn get_post_views(&self, name: &str, limit: Option<usize>) -> Result<Vec<PostView>> {
        let mut posts = self.get_posts(name)?;
        sort_by_date_desc(&mut posts);

        let limit = limit.unwrap_or(posts.len());
        Ok(posts
            .into_iter()
            .take(limit)
            .map(|record| PostView::new(name, record))
            .collect())
    }
}

/// Sort by publication date, most recent first
///
/// The sort is stable: items with equal dates keep their input order.
pub fn sort_by_date_desc<T: Dated>(items: &mut [T]) {
    items.sort_by(|a, b| b.pub_date().cmp(&a.pub_date()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, SchemaError};
    use chrono::{TimeZone, Utc};

    fn entry(title: &str, date: &str) -> RawEntry {
        let slug = crate::content::slugify(title);
        let yaml = format!(
            "title: {}\ndescription: About {}\npubDate: {}\nslug: {}\n",
            title, title, date, slug
        );
        RawEntry {
            id: format!("{}.md", slug),
            data: serde_yaml::from_str(&yaml).unwrap(),
        }
    }

    fn source(entries: Vec<RawEntry>) -> MemorySource {
        let mut source = MemorySource::new();
        for e in entries {
            source.insert("blog", e);
        }
        source
    }

    fn titles(views: &[PostView]) -> Vec<&str> {
        views.iter().map(|v| v.record.title.as_str()).collect()
    }

    #[test]
    fn test_get_posts_keeps_storage_order() {
        let collection = Collection::new(source(vec![
            entry("A", "2024-01-01"),
            entry("B", "2024-03-01"),
        ]));
        let posts = collection.get_posts("blog").unwrap();
        assert_eq!(posts[0].title, "A");
        assert_eq!(posts[1].title, "B");
    }

    #[test]
    fn test_get_post_views_sorted_and_limited() {
        let collection = Collection::new(source(vec![
            entry("A", "2024-01-01"),
            entry("B", "2024-03-01"),
            entry("C", "2024-02-01"),
        ]));

        let all = collection.get_post_views("blog", None).unwrap();
        assert_eq!(titles(&all), vec!["B", "C", "A"]);

        let two = collection.get_post_views("blog", Some(2)).unwrap();
        assert_eq!(titles(&two), vec!["B", "C"]);
        assert_eq!(two[0].url_path, "/blog/b");
    }

    #[test]
    fn test_limit_is_prefix_of_unlimited() {
        let collection = Collection::new(source(vec![
            entry("One", "2023-05-01"),
            entry("Two", "2024-05-01"),
            entry("Three", "2022-05-01"),
            entry("Four", "2024-01-01"),
        ]));
        let all = collection.get_post_views("blog", None).unwrap();

        for n in 0..=6 {
            let limited = collection.get_post_views("blog", Some(n)).unwrap();
            assert_eq!(limited.len(), n.min(all.len()));
            assert_eq!(&all[..limited.len()], &limited[..]);
            assert!(limited
                .windows(2)
                .all(|w| w[0].record.pub_date >= w[1].record.pub_date));
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let collection = Collection::new(source(vec![
            entry("First", "2024-01-01"),
            entry("Newest", "2024-06-01"),
            entry("Second", "2024-01-01"),
            entry("Third", "2024-01-01"),
        ]));
        let views = collection.get_post_views("blog", None).unwrap();
        assert_eq!(titles(&views), vec!["Newest", "First", "Second", "Third"]);
    }

    #[test]
    fn test_sort_by_date_desc_records() {
        let date = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
        let mut records: Vec<PostRecord> = [(1, "x"), (3, "y"), (1, "z")]
            .into_iter()
            .map(|(d, slug)| schema::build(slug, slug, "", date(d), slug).unwrap())
            .collect();
        sort_by_date_desc(&mut records);
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_invalid_entry_fails_whole_call() {
        let mut bad = entry("Bad", "2024-01-01");
        bad.data.remove("title");
        let collection = Collection::new(source(vec![entry("Good", "2024-01-01"), bad]));

        let err = collection.get_post_views("blog", Some(1)).unwrap_err();
        match err {
            Error::Schema(SchemaError::MissingField { entry, field }) => {
                assert_eq!(entry, "bad.md");
                assert_eq!(field, "title");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_collection_is_empty() {
        let collection = Collection::new(MemorySource::new());
        assert!(collection.get_post_views("notes", None).unwrap().is_empty());
    }
}
