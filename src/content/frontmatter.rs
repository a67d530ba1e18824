//! Front-matter parsing

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Delimiter line that opens and closes a YAML front-matter block
const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("file does not start with a `---` front-matter block")]
    Missing,

    #[error("front-matter block is not closed with `---`")]
    Unterminated,

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,
}

/// Raw front-matter data from a post, before schema validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub data: Mapping,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}');

        let mut lines = content.split_inclusive('\n');
        match lines.next() {
            Some(first) if is_delimiter(first) => {}
            _ => return Err(FrontMatterError::Missing),
        }

        let yaml_start = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
        let mut offset = yaml_start;
        for line in lines {
            if is_delimiter(line) {
                let yaml = &content[yaml_start..offset];
                let remaining = content[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(yaml)?, remaining));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        // An empty block is an empty mapping; the schema decides what is missing
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(data) => Ok(Self { data }),
            Value::Null => Ok(Self::default()),
            _ => Err(FrontMatterError::NotAMapping),
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}
