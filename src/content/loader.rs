//! Content loader - reads collections from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::collection::{CollectionSource, RawEntry};
use super::FrontMatter;
use crate::error::{Error, Result, SchemaError};

/// Reads collections stored as `<root>/<collection>/**/*.md`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that holds the files of a collection
    pub fn collection_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Read a single post file
    fn load_entry(&self, collection_dir: &Path, path: &Path) -> Result<RawEntry> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let id = path
            .strip_prefix(collection_dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let (fm, _body) =
            FrontMatter::parse(&content).map_err(|e| SchemaError::MalformedFrontMatter {
                entry: id.clone(),
                reason: e.to_string(),
            })?;

        Ok(RawEntry { id, data: fm.data })
    }
}

impl CollectionSource for DirectorySource {
    fn read_collection(&self, name: &str) -> Result<Vec<RawEntry>> {
        let collection_dir = self.collection_dir(name);
        if !collection_dir.exists() {
            tracing::warn!("Collection {:?} has no directory at {:?}", name, collection_dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in WalkDir::new(&collection_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| collection_dir.clone());
                Error::io(path, e.into())
            })?;

            let path = entry.path();
            if entry.file_type().is_file() && is_markdown_file(path) {
                tracing::debug!("Loading {:?}", path);
                entries.push(self.load_entry(&collection_dir, path)?);
            }
        }

        Ok(entries)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
