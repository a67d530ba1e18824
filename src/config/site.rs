//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    /// Canonical site URL. The feed cannot be rendered without it.
    pub url: Option<String>,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub collection: String,
    pub editor: String,

    #[serde(default)]
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "quillsite".to_string(),
            description: String::new(),
            language: "en-us".to_string(),
            url: None,
            content_dir: "src/content".to_string(),
            public_dir: "public".to_string(),
            collection: "blog".to_string(),
            editor: "code".to_string(),
            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load_error = |reason: String| ConfigError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        // An empty file is a valid, all-defaults configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| load_error(e.to_string()))
    }

    /// The configured site URL, if it is set to something non-blank
    pub fn site_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Number of most recent posts in the feed
    pub limit: usize,
    /// Path of the XSL stylesheet referenced by the feed
    pub stylesheet: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: 3,
            stylesheet: "/rss/styles.xsl".to_string(),
        }
    }
}
