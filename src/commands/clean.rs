//! Clean generated files

use anyhow::Result;
use std::fs;

use crate::feed::FeedDocument;
use crate::Site;

/// Remove the generated feed from the public directory
pub fn run(site: &Site) -> Result<()> {
    let feed_path = site.public_dir.join(FeedDocument::PATH);
    if feed_path.exists() {
        fs::remove_file(&feed_path)?;
        tracing::info!("Deleted: {:?}", feed_path);
    }

    Ok(())
}
