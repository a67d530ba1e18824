//! Generate the feed file

use anyhow::Result;
use notify::Watcher;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::feed::FeedDocument;
use crate::{Site, CONFIG_FILE};

/// Render the feed and write it to `<public_dir>/rss.xml`
pub fn run(site: &Site) -> Result<PathBuf> {
    let start = Instant::now();

    let doc = site.render_feed()?;
    let xml = doc.to_xml()?;

    fs::create_dir_all(&site.public_dir)?;
    let output_path = site.public_dir.join(FeedDocument::PATH);
    fs::write(&output_path, xml)?;

    tracing::info!(
        "Generated {} with {} items in {:.2}s",
        FeedDocument::PATH,
        doc.items.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(output_path)
}

/// Watch the content directory and config file, regenerating on change
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    fs::create_dir_all(&site.content_dir)?;
    watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // Config may have changed too
                    let result = Site::new(&site.base_dir)
                        .map_err(anyhow::Error::from)
                        .and_then(|site| run(&site));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use tempfile::TempDir;

    fn site_with_post(url: Option<&str>) -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        if let Some(url) = url {
            fs::write(tmp.path().join(CONFIG_FILE), format!("url: {}\n", url)).unwrap();
        }
        let site = Site::new(tmp.path()).unwrap();
        let dir = site.content_dir.join("blog");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("2024-01-01-hello.md"),
            "---\ntitle: Hello\ndescription: First\npubDate: 2024-01-01\nslug: 2024/hello\n---\n",
        )
        .unwrap();
        (tmp, site)
    }

    #[test]
    fn test_generate_writes_feed() {
        let (_tmp, site) = site_with_post(Some("https://kzuraw.com"));
        let path = run(&site).unwrap();

        assert_eq!(path, site.public_dir.join("rss.xml"));
        let xml = fs::read_to_string(path).unwrap();
        assert!(xml.contains("<link>https://kzuraw.com/blog/2024/hello</link>"));
    }

    #[test]
    fn test_generate_without_site_url_writes_nothing() {
        let (_tmp, site) = site_with_post(None);
        let err = run(&site).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Config(ConfigError::SiteNotConfigured))
        ));
        assert!(!site.public_dir.join("rss.xml").exists());
    }
}
