//! Test utilities for setting up mock sites and scripted prompts.
//!
//! `SiteFixture` builds an isolated site in a temp directory with a fluent
//! API for adding posts, drafts, pages, and asset directories.
//! `ScriptedPrompter` answers prompts from a queue and records every call.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::{
    config::Site,
    error::{Error, Result},
    prompt::Prompter,
    record::ContentRecord,
};

/// Content file with a title and date in its front matter.
pub fn post_content(title: &str, date: &str) -> String {
    format!("---\ntitle: {title}\ndate: {date}\ntags:\n---\nBody of {title}.\n")
}

/// Build an in-memory post record without touching the filesystem.
pub fn record(title: &str, slug: &str, source: &str, date: (i32, u32, u32)) -> ContentRecord {
    let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|day| day.and_hms_opt(12, 0, 0))
        .expect("valid date");
    ContentRecord {
        title: title.to_string(),
        slug: slug.to_string(),
        source: PathBuf::from(source),
        full_source: PathBuf::from("/site/source").join(source),
        date,
        updated: date,
        published: true,
        layout: "post".to_string(),
        tags: Vec::new(),
        categories: Vec::new(),
    }
}

/// Test fixture holding a temporary site.
pub struct SiteFixture {
    /// Root temp directory (the site root).
    root: TempDir,
    /// Content source directory.
    source_dir: PathBuf,
}

impl SiteFixture {
    /// Create a new site with `_config.yml` and an empty `source/_posts`.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        fs::write(root.path().join("_config.yml"), "title: Test Site\n").expect("write config");
        let source_dir = root.path().join("source");
        fs::create_dir_all(source_dir.join("_posts")).expect("create posts dir");
        Self { root, source_dir }
    }

    /// Write a file relative to the source directory.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.source_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        self
    }

    /// Add a published post under `_posts`.
    pub fn with_post(self, relative: &str, contents: &str) -> Self {
        self.with_file(&format!("_posts/{relative}"), contents)
    }

    /// Add a draft under `_drafts`.
    pub fn with_draft(self, relative: &str, contents: &str) -> Self {
        self.with_file(&format!("_drafts/{relative}"), contents)
    }

    /// Add a page relative to the source directory.
    pub fn with_page(self, relative: &str, contents: &str) -> Self {
        self.with_file(relative, contents)
    }

    /// Add a file to a post's asset directory under `_posts`.
    pub fn with_asset(self, post_stem: &str, file: &str, contents: &str) -> Self {
        self.with_post(&format!("{post_stem}/{file}"), contents)
    }

    /// Return the site root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Return the source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Load the fixture as a site.
    pub fn site(&self) -> Site {
        Site::load(self.root.path()).expect("load site")
    }

    /// Return an absolute path for a source-relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.source_dir.join(relative)
    }

    /// Check whether a source-relative path exists.
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Read a source-relative file.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read file")
    }

    /// List every file and directory below the source directory, sorted.
    pub fn tree(&self) -> Vec<String> {
        let mut entries = WalkDir::new(&self.source_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                let relative = entry
                    .path()
                    .strip_prefix(&self.source_dir)
                    .expect("inside source dir")
                    .to_string_lossy()
                    .into_owned();
                if entry.file_type().is_dir() {
                    format!("{relative}/")
                } else {
                    relative
                }
            })
            .collect::<Vec<_>>();
        entries.sort();
        entries
    }
}

impl Default for SiteFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A prompt invocation recorded by `ScriptedPrompter`.
#[derive(Debug, Clone)]
pub struct PromptCall {
    /// Prompt message.
    pub message: String,
    /// Options offered.
    pub options: Vec<String>,
}

/// Prompter that answers from a queue of indices.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    /// Remaining answers.
    answers: VecDeque<usize>,
    /// Recorded invocations.
    pub calls: Vec<PromptCall>,
}

impl ScriptedPrompter {
    /// Create a prompter answering with the given indices in order.
    pub fn answering(answers: &[usize]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            calls: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        self.calls.push(PromptCall {
            message: message.to_string(),
            options: options.to_vec(),
        });
        self.answers.pop_front().ok_or(Error::PromptCanceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_site_with_posts_dir() {
        let fixture = SiteFixture::new();
        assert!(fixture.exists("_posts"));
        assert_eq!(fixture.site().source_dir(), fixture.source_dir());
    }

    #[test]
    fn tree_lists_files_and_dirs() {
        let fixture = SiteFixture::new()
            .with_post("a.md", &post_content("A", "2020-01-01"))
            .with_asset("a", "img.png", "png");

        assert_eq!(
            fixture.tree(),
            vec!["_posts/", "_posts/a.md", "_posts/a/", "_posts/a/img.png"]
        );
    }
}
