//! Initialize a new site

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::Path;

use super::new::create_post;
use crate::{Site, CONFIG_FILE};

const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: ''
language: en-us

# Canonical URL, required by the RSS feed
url: https://example.com

# Directory
content_dir: src/content
public_dir: public

# Writing
collection: blog
editor: code

# Feed
feed:
  limit: 3
  stylesheet: /rss/styles.xsl
"#;

/// Stylesheet that makes the feed readable in a browser
const FEED_STYLESHEET: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:output method="html" version="1.0" encoding="UTF-8" indent="yes"/>
  <xsl:template match="/">
    <html lang="en">
      <head>
        <meta charset="utf-8"/>
        <meta name="viewport" content="width=device-width, initial-scale=1"/>
        <title><xsl:value-of select="/rss/channel/title"/> RSS feed</title>
      </head>
      <body>
        <header>
          <h1><xsl:value-of select="/rss/channel/title"/></h1>
          <p><xsl:value-of select="/rss/channel/description"/></p>
          <p>Copy this page's URL into your feed reader to subscribe.</p>
        </header>
        <main>
          <xsl:for-each select="/rss/channel/item">
            <article>
              <h2>
                <a>
                  <xsl:attribute name="href"><xsl:value-of select="link"/></xsl:attribute>
                  <xsl:value-of select="title"/>
                </a>
              </h2>
              <time><xsl:value-of select="pubDate"/></time>
              <p><xsl:value-of select="description"/></p>
            </article>
          </xsl:for-each>
        </main>
      </body>
    </html>
  </xsl:template>
</xsl:stylesheet>
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let site = Site::new(target_dir)?;
    fs::create_dir_all(site.content_dir.join(&site.config.collection))?;

    let stylesheet = site
        .public_dir
        .join(site.config.feed.stylesheet.trim_start_matches('/'));
    if let Some(parent) = stylesheet.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&stylesheet, FEED_STYLESHEET)?;

    let sample = create_post(&site, "Hello World", Utc::now())?;
    tracing::info!("Created sample post {:?}", sample);

    Ok(())
}

/// Run the init command for an existing site directory
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}
