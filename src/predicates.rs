//! Single-criterion tests against a content record.

use std::{fmt, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::record::ContentRecord;

/// Strict `MM-DD-YYYY` shape; chrono alone accepts single-digit fields.
static BOUNDARY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("date pattern is valid"));

/// Matches folder patterns naming the posts or drafts directories.
static POSTS_OR_DRAFTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("post|draft").expect("folder pattern is valid"));

/// A before/after date that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
    /// Date text as supplied.
    pub input: String,
}

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid date (expecting MM-DD-YYYY)", self.input)
    }
}

/// True when every term matches the title or the slug.
pub fn matches_terms(record: &ContentRecord, terms: &[Regex]) -> bool {
    terms
        .iter()
        .all(|term| term.is_match(&record.title) || term.is_match(&record.slug))
}

/// Expand shorthand for the posts and drafts folders.
///
/// `post` becomes `_posts` and `_draft` becomes `_drafts`; other patterns
/// are returned unchanged so page folders can be matched as typed.
pub fn normalize_folder(pattern: &str) -> String {
    if !POSTS_OR_DRAFTS.is_match(pattern) {
        return pattern.to_string();
    }
    let mut normalized = pattern.to_string();
    if !normalized.starts_with('_') {
        normalized.insert(0, '_');
    }
    if !normalized.ends_with('s') {
        normalized.push('s');
    }
    normalized
}

/// True when the record's containing folder matches.
pub fn matches_folder(record: &ContentRecord, folder: &Regex) -> bool {
    folder.is_match(&record.folder())
}

/// True when any tag matches.
pub fn matches_tag(record: &ContentRecord, tag: &Regex) -> bool {
    record.tags.iter().any(|name| tag.is_match(name))
}

/// True when any category matches.
pub fn matches_category(record: &ContentRecord, category: &Regex) -> bool {
    record.categories.iter().any(|name| category.is_match(name))
}

/// True when the layout matches.
pub fn matches_layout(record: &ContentRecord, layout: &Regex) -> bool {
    layout.is_match(&record.layout)
}

/// True for unpublished records.
pub fn is_draft(record: &ContentRecord) -> bool {
    !record.published
}

/// Parse a before/after boundary in `MM-DD-YYYY`, accepting `/` separators.
pub fn parse_boundary(input: &str) -> Result<NaiveDate, InvalidDate> {
    let normalized = input.trim().replace('/', "-");
    let invalid = || InvalidDate {
        input: input.to_string(),
    };
    if !BOUNDARY_SHAPE.is_match(&normalized) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(&normalized, "%m-%d-%Y").map_err(|_| invalid())
}

/// True when the record is dated strictly before the boundary day.
pub fn is_before(record: &ContentRecord, boundary: NaiveDate) -> bool {
    record.date.date() < boundary
}

/// True when the record is dated strictly after the boundary day.
pub fn is_after(record: &ContentRecord, boundary: NaiveDate) -> bool {
    record.date.date() > boundary
}
