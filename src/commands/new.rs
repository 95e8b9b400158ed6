//! Implementation of the `postkit new` command.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{
    commands::{ColorChoice, require_terms},
    config::Site,
    diagnostics::Diagnostics,
    editor::{EditorConfig, open_file},
    error::{Error, Result},
    frontmatter::quote,
    palette,
    slug::slugify,
};

/// Where a new content file is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewKind {
    /// Published post in `_posts`.
    Post,
    /// Draft in `_drafts`.
    Draft,
    /// Page at `<slug>/index.md`.
    Page,
}

/// Execute the new command.
pub async fn run(
    color: ColorChoice,
    verbose: bool,
    site_root: &Path,
    title: &[String],
    kind: NewKind,
    editor: &EditorConfig,
) -> Result<()> {
    require_terms(title, "A title is required to create new content.")?;
    let diagnostics = Diagnostics::new(verbose);
    let site = Site::load(site_root)?;
    let title = title.join(" ");

    let path = execute(&site, title.trim(), kind)?;
    println!(
        "Created {}",
        palette::fmt_new_name(&path.display().to_string(), color.enabled())
    );
    diagnostics.info(format!("Opening {}", path.display()));
    open_file(editor, &path)
}

/// Scaffold a content file for `title` and return its path.
pub(crate) fn execute(site: &Site, title: &str, kind: NewKind) -> Result<PathBuf> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(Error::validation(format!(
            "`{title}` does not produce a usable file name."
        )));
    }
    let path = match kind {
        NewKind::Post => site.posts_dir().join(format!("{slug}.md")),
        NewKind::Draft => site.drafts_dir().join(format!("{slug}.md")),
        NewKind::Page => site.source_dir().join(&slug).join("index.md"),
    };
    if path.exists() {
        return Err(Error::PathExists { path });
    }

    write_scaffold(&path, title)?;
    Ok(path)
}

/// Write front matter with the title and creation time.
fn write_scaffold(path: &Path, title: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| Error::file_op("create", parent, error))?;
    }
    let date = Local::now().format("%Y-%m-%d %H:%M:%S");
    let contents = format!("---\ntitle: {}\ndate: {date}\ntags:\n---\n", quote(title));
    fs::write(path, contents).map_err(|error| Error::file_op("write", path, error))
}
