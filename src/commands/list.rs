//! List posts

use anyhow::Result;

use crate::Site;

/// Print posts newest first
pub fn run(site: &Site, limit: Option<usize>, json: bool) -> Result<()> {
    let posts = site.posts(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            post.record.pub_date.format("%Y-%m-%d"),
            post.record.title,
            post.url_path
        );
    }

    Ok(())
}
