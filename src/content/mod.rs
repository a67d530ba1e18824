//! Content module - post schema, collections and slugs

mod collection;
mod frontmatter;
pub mod loader;
mod post;
pub mod schema;
mod slug;

pub use collection::{sort_by_date_desc, Collection, CollectionSource, MemorySource, RawEntry};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::DirectorySource;
pub use post::{Dated, PostRecord, PostView};
pub use schema::DateInput;
pub use slug::{is_valid_slug, slugify};
