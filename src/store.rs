//! Content database: scans a site's source directory into records.
//!
//! The database is rebuilt for every invocation and never cached. Files
//! that cannot be read or whose front matter does not parse are skipped
//! with a warning rather than failing the load.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::Site,
    diagnostics::Diagnostics,
    frontmatter::{Frontmatter, flatten_names, parse_frontmatter, scalar_text},
    paths::display_path,
    record::{Collection, ContentRecord},
};

/// Extensions recognized as posts.
const POST_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Extensions recognized as pages.
const PAGE_EXTENSIONS: &[&str] = &["md", "markdown", "html"];

/// Accepted front matter date-time formats.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// In-memory view of a site's posts and pages.
#[derive(Debug, Default)]
pub struct ContentDatabase {
    /// Posts and drafts in load order.
    posts: Vec<ContentRecord>,
    /// Pages in load order.
    pages: Vec<ContentRecord>,
}

/// Parameters shared by every file in one scanned tree.
#[derive(Debug, Clone, Copy)]
struct ScanKind {
    /// Publication flag unless front matter overrides it.
    published: bool,
    /// Layout unless front matter overrides it.
    layout: &'static str,
    /// Recognized file extensions.
    extensions: &'static [&'static str],
}

impl ContentDatabase {
    /// Load every post, draft, and page of a site.
    pub(crate) fn load(site: &Site, diagnostics: &mut Diagnostics) -> Self {
        let source_dir = site.source_dir();
        let post_kind = ScanKind {
            published: true,
            layout: "post",
            extensions: POST_EXTENSIONS,
        };
        let draft_kind = ScanKind {
            published: false,
            ..post_kind
        };
        let page_kind = ScanKind {
            published: true,
            layout: "page",
            extensions: PAGE_EXTENSIONS,
        };

        let mut posts = scan(source_dir, &site.posts_dir(), post_kind, diagnostics);
        posts.extend(scan(source_dir, &site.drafts_dir(), draft_kind, diagnostics));
        let pages = scan(source_dir, source_dir, page_kind, diagnostics);

        diagnostics.info(format!(
            "Loaded {} posts and {} pages from {}",
            posts.len(),
            pages.len(),
            display_path(site.root())
        ));
        Self { posts, pages }
    }

    /// Return the records of one collection in load order.
    pub(crate) fn get(&self, collection: Collection) -> Vec<ContentRecord> {
        match collection {
            Collection::Posts => self.posts.clone(),
            Collection::Pages => self.pages.clone(),
        }
    }

    /// Return posts followed by pages.
    pub(crate) fn all(&self) -> Vec<ContentRecord> {
        self.posts.iter().chain(&self.pages).cloned().collect()
    }
}

/// Scan one content tree rooted at `root`.
fn scan(
    source_dir: &Path,
    root: &Path,
    kind: ScanKind,
    diagnostics: &mut Diagnostics,
) -> Vec<ContentRecord> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut records = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry, kind));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                diagnostics.warn(format!("failed to read {}: {error}", root.display()));
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), kind.extensions) {
            continue;
        }
        if let Some(record) = load_record(source_dir, entry.path(), kind, diagnostics) {
            records.push(record);
        }
    }
    records
}

/// Return true for hidden or underscore-prefixed entries and asset directories.
fn is_ignored(entry: &DirEntry, kind: ScanKind) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('_') || name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && is_asset_dir(entry.path(), kind.extensions)
}

/// Return true when a sibling content file shares this directory's name.
fn is_asset_dir(dir: &Path, extensions: &[&str]) -> bool {
    let Some(name) = dir.file_name() else {
        return false;
    };
    extensions.iter().any(|extension| {
        let mut file_name = name.to_os_string();
        file_name.push(".");
        file_name.push(extension);
        dir.with_file_name(file_name).is_file()
    })
}

/// Return true when the path has one of the given extensions.
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extensions
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(extension))
        })
}

/// Load a single content file into a record.
fn load_record(
    source_dir: &Path,
    path: &Path,
    kind: ScanKind,
    diagnostics: &mut Diagnostics,
) -> Option<ContentRecord> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            diagnostics.warn_skipped(path, error.to_string());
            return None;
        }
    };
    let frontmatter = match parse_frontmatter(&contents) {
        Ok(frontmatter) => frontmatter,
        Err(error) => {
            diagnostics.warn_skipped(path, error.message);
            return None;
        }
    };

    let modified = modified_time(path);
    Some(build_record(source_dir, path, &frontmatter, kind, modified))
}

/// Combine front matter, path, and scan defaults into a record.
fn build_record(
    source_dir: &Path,
    path: &Path,
    frontmatter: &Frontmatter,
    kind: ScanKind,
    modified: NaiveDateTime,
) -> ContentRecord {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = frontmatter
        .slug
        .as_ref()
        .and_then(scalar_text)
        .filter(|slug| !slug.trim().is_empty())
        .unwrap_or(stem);
    let title = frontmatter
        .title
        .as_ref()
        .and_then(scalar_text)
        .unwrap_or_default();

    let date = frontmatter
        .date
        .as_ref()
        .and_then(parse_date)
        .unwrap_or(modified);
    let updated = frontmatter
        .updated
        .as_ref()
        .and_then(parse_date)
        .unwrap_or(modified);

    let source: PathBuf = path
        .strip_prefix(source_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf());

    ContentRecord {
        title,
        slug,
        source,
        full_source: path.to_path_buf(),
        date,
        updated,
        published: kind.published && frontmatter.published.unwrap_or(true),
        layout: frontmatter
            .layout
            .clone()
            .unwrap_or_else(|| kind.layout.to_string()),
        tags: frontmatter
            .tags
            .as_ref()
            .map(flatten_names)
            .unwrap_or_default(),
        categories: frontmatter
            .categories
            .as_ref()
            .map(flatten_names)
            .unwrap_or_default(),
    }
}

/// Parse a front matter date value.
fn parse_date(value: &serde_yaml::Value) -> Option<NaiveDateTime> {
    let text = scalar_text(value)?;
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}

/// Return the file modification time as local time.
fn modified_time(path: &Path) -> NaiveDateTime {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map(|modified| DateTime::<Local>::from(modified).naive_local())
        .unwrap_or_default()
}
