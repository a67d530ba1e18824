//! Create a new post

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::content::slugify;
use crate::Site;

/// Front-matter written into a new post
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPostFrontMatter<'a> {
    title: &'a str,
    description: &'a str,
    pub_date: String,
    slug: String,
}

/// Create a post file for `title`, dated `now`, and return its path
pub fn create_post(site: &Site, title: &str, now: DateTime<Utc>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        bail!("Title cannot be empty");
    }

    let slug = slugify(title);
    if slug.is_empty() {
        bail!("Title must contain at least one letter or digit: {:?}", title);
    }

    let target_dir = site.content_dir.join(&site.config.collection);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}-{}.md", now.format("%Y-%m-%d"), slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let front_matter = NewPostFrontMatter {
        title,
        description: "",
        pub_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        slug: format!("{}/{}", now.year(), slug),
    };
    let content = format!("---\n{}---\n", serde_yaml::to_string(&front_matter)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

/// Ask for a post title on stdin
pub fn prompt_title() -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Post title: ")?;
    stdout.flush()?;

    let mut title = String::new();
    io::stdin().lock().read_line(&mut title)?;
    Ok(title.trim().to_string())
}

/// Editor command: `$EDITOR` when set, otherwise the configured one
fn editor(site: &Site) -> String {
    std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| site.config.editor.clone())
}

fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor {:?}", editor))?;
    if !status.success() {
        bail!("Editor {:?} exited with {}", editor, status);
    }
    Ok(())
}

/// Run the new command
pub fn run(site: &Site, title: Option<&str>, edit: bool) -> Result<PathBuf> {
    let title = match title {
        Some(t) => t.to_string(),
        None => prompt_title()?,
    };

    let path = create_post(site, &title, Utc::now())?;

    if edit {
        open_in_editor(&editor(site), &path)?;
    }

    println!("Blog post created");
    Ok(path)
}
