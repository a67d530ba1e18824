//! Slug derivation and validation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Separator placed between words of a slug
pub const SEPARATOR: char = '-';

/// Derive a URL-safe slug from a human-entered title
///
/// The title is lowercased, every run of characters outside `[a-z0-9]` becomes
/// a single `-`, and leading/trailing separators are trimmed.
///
/// # Examples
/// ```
/// assert_eq!(quillsite::content::slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches(SEPARATOR)
        .to_string()
}

/// Check that a stored slug only uses normalized segments
///
/// A slug may be nested (`2024/my-post`); every `/`-separated segment must be
/// non-empty and already in [`slugify`] normal form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('/')
            .all(|segment| !segment.is_empty() && slugify(segment) == segment)
}
