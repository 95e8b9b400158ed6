//! Content records: one post or page as seen by the filters and commands.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Posts and drafts.
    Posts,
    /// Standalone pages.
    Pages,
}

/// A post or page loaded from the content source directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    /// Display title; may be empty.
    pub(crate) title: String,
    /// URL slug; never empty.
    pub(crate) slug: String,
    /// Path relative to the source directory.
    pub(crate) source: PathBuf,
    /// Absolute path of the backing file.
    pub(crate) full_source: PathBuf,
    /// Creation date.
    pub(crate) date: NaiveDateTime,
    /// Last update date.
    pub(crate) updated: NaiveDateTime,
    /// False for drafts.
    pub(crate) published: bool,
    /// Layout name.
    pub(crate) layout: String,
    /// Tag names.
    pub(crate) tags: Vec<String>,
    /// Category names, flattened.
    pub(crate) categories: Vec<String>,
}

impl ContentRecord {
    /// Return the directory part of the relative source path.
    pub(crate) fn folder(&self) -> String {
        self.source
            .parent()
            .map(|parent| parent.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Return the file name of the backing file.
    pub(crate) fn file_name(&self) -> String {
        self.full_source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Return the title, or the slug when the title is empty.
    pub(crate) fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.slug
        } else {
            &self.title
        }
    }

    /// Return true when the record lives under the given source-relative directory.
    pub(crate) fn is_under(&self, dir: &Path) -> bool {
        self.source.starts_with(dir)
    }
}

/// Sort records newest first by `date`, keeping ties in load order.
pub fn sort_by_date_desc(records: &mut [ContentRecord]) {
    records.sort_by(|left, right| right.date.cmp(&left.date));
}
