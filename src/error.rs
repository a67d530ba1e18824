//! Error types shared by the content pipeline, the feed and the theme resolver

use std::path::PathBuf;
use thiserror::Error;

/// A content record failed validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{entry}: missing required field `{field}`")]
    MissingField { entry: String, field: &'static str },

    #[error("{entry}: field `{field}` must be a {expected}, found {found}")]
    WrongType {
        entry: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{entry}: field `{field}` cannot be coerced to a date: {value}")]
    InvalidDate {
        entry: String,
        field: &'static str,
        value: String,
    },

    #[error("{entry}: field `slug` is not a normalized slug: {slug:?}")]
    InvalidSlug { entry: String, slug: String },

    #[error("{entry}: malformed front-matter: {reason}")]
    MalformedFrontMatter { entry: String, reason: String },
}

/// Required site-level configuration is missing or unreadable
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("site not configured: set `url` in _config.yml")]
    SiteNotConfigured,

    #[error("failed to load {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("preference store {path:?} is corrupt: {reason}")]
    Preference { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
