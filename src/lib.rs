//! quillsite: a small blog engine
//!
//! Loads a collection of posts from front-matter files, validates them
//! against the post schema, and publishes the most recent ones as an RSS
//! feed. A separate [`theme`] module resolves the reader's light/dark
//! preference.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod server;
pub mod theme;

use std::path::{Path, PathBuf};

use content::{Collection, DirectorySource, PostView};
use error::Result;
use feed::{FeedDocument, FeedSettings};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding one sub-directory per collection
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site in a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already-loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Collections stored under the content directory
    pub fn collection(&self) -> Collection<DirectorySource> {
        Collection::new(DirectorySource::new(&self.content_dir))
    }

    /// Posts of the configured collection, newest first
    pub fn posts(&self, limit: Option<usize>) -> Result<Vec<PostView>> {
        self.collection()
            .get_post_views(&self.config.collection, limit)
    }

    /// Render the feed from the most recent posts
    pub fn render_feed(&self) -> Result<FeedDocument> {
        let posts = self.posts(Some(self.config.feed.limit))?;
        let settings = FeedSettings::from_config(&self.config);
        Ok(feed::render_feed(&settings, &posts)?)
    }

    /// Where the theme preference is persisted
    pub fn preference_store(&self) -> theme::FileStore {
        theme::FileStore::new(self.base_dir.join(".quillsite").join("preferences.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use std::fs;
    use tempfile::TempDir;

    fn write_post(site: &Site, name: &str, title: &str, date: &str) {
        let dir = site.content_dir.join(&site.config.collection);
        fs::create_dir_all(&dir).unwrap();
        let slug = content::slugify(title);
        fs::write(
            dir.join(name),
            format!(
                "---\ntitle: {}\ndescription: d\npubDate: {}\nslug: {}\n---\n",
                title, date, slug
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_defaults_without_config_file() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.content_dir, tmp.path().join("src/content"));
        assert_eq!(site.public_dir, tmp.path().join("public"));
    }

    #[test]
    fn test_render_feed_requires_site_url() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        write_post(&site, "a.md", "A", "2024-01-01");

        let err = site.render_feed().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::SiteNotConfigured)));
    }

    #[test]
    fn test_render_feed_uses_configured_limit() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "url: https://kzuraw.com\nfeed:\n  limit: 2\n",
        )
        .unwrap();
        let site = Site::new(tmp.path()).unwrap();
        write_post(&site, "a.md", "A", "2024-01-01");
        write_post(&site, "b.md", "B", "2024-03-01");
        write_post(&site, "c.md", "C", "2024-02-01");

        let doc = site.render_feed().unwrap();
        let titles: Vec<_> = doc.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
    }
}
