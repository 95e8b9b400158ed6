//! Implementation of the `postkit integrate` command.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    commands::ColorChoice,
    config::Site,
    diagnostics::Diagnostics,
    error::{Error, Result},
    fileops::{BatchSummary, MoveOperation, prune_empty_dirs, restore_batch},
    palette,
};

/// What an integrate run did.
#[derive(Debug)]
pub struct IntegrateOutcome {
    /// Totals for the restore moves.
    pub(crate) summary: BatchSummary,
    /// Whether the exile directory was emptied and removed.
    pub(crate) exile_removed: bool,
}

/// Execute the integrate command.
pub async fn run(color: ColorChoice, verbose: bool, site_root: &Path) -> Result<()> {
    let use_color = color.enabled();
    let mut diagnostics = Diagnostics::new(verbose);
    let site = Site::load(site_root)?;

    let outcome = execute(&site, &mut diagnostics).await?;

    diagnostics.print_failure_summary();
    if outcome.summary.failed == 0 {
        println!("All exiled posts and asset directories restored.");
    } else {
        println!(
            "Restored {} item(s); {} left in {}.",
            outcome.summary.moved,
            outcome.summary.failed,
            palette::fmt_location(&site.exile_dir().display().to_string(), use_color)
        );
    }
    if outcome.exile_removed {
        diagnostics.info("Exile directory removed.");
    }
    Ok(())
}

/// Move every exiled entry back into `_posts`.
pub(crate) async fn execute(
    site: &Site,
    diagnostics: &mut Diagnostics,
) -> Result<IntegrateOutcome> {
    let exile_dir = site.exile_dir();
    let entries = exiled_entries(&exile_dir).await?;
    if entries.is_empty() {
        return Err(Error::ExileEmpty { path: exile_dir });
    }

    let posts_dir = site.posts_dir();
    let operations = entries
        .into_iter()
        .filter_map(|origin| {
            let name = origin.file_name()?.to_owned();
            Some(MoveOperation::new(origin, posts_dir.join(name)))
        })
        .collect();

    let summary = restore_batch(operations, diagnostics).await;
    let exile_removed = prune_empty_dirs(&exile_dir);
    Ok(IntegrateOutcome {
        summary,
        exile_removed,
    })
}

/// List the top-level entries of the exile directory.
async fn exiled_entries(exile_dir: &Path) -> Result<Vec<PathBuf>> {
    match tokio::fs::metadata(exile_dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(Error::ExileIsFile {
                path: exile_dir.to_path_buf(),
            });
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(Error::ExileMissing {
                path: exile_dir.to_path_buf(),
            });
        }
        Err(error) => return Err(Error::file_op("inspect", exile_dir, error)),
    }

    let mut reader = tokio::fs::read_dir(exile_dir)
        .await
        .map_err(|error| Error::file_op("read", exile_dir, error))?;
    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|error| Error::file_op("read", exile_dir, error))?
    {
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::execute;
    use crate::{
        commands::isolate,
        diagnostics::Diagnostics,
        error::Error,
        filter::FilterCriteria,
        store::ContentDatabase,
        testutil::{ScriptedPrompter, SiteFixture, post_content},
    };

    #[tokio::test]
    async fn isolate_all_then_integrate_restores_tree() {
        let fixture = SiteFixture::new()
            .with_post("first.md", &post_content("First", "2020-01-01"))
            .with_asset("first", "img.png", "png")
            .with_post("2021/nested.md", &post_content("Nested", "2021-01-01"))
            .with_asset("2021/nested", "deep/a.txt", "a")
            .with_post("last.markdown", &post_content("Last", "2022-01-01"))
            .with_draft("draft.md", &post_content("Draft", "2023-01-01"))
            .with_page("about/index.md", &post_content("About", "2019-01-01"));
        let before = fixture.tree();
        let site = fixture.site();
        let mut diagnostics = Diagnostics::new(false);
        let db = ContentDatabase::load(&site, &mut diagnostics);
        let criteria = FilterCriteria::terms(&[]).expect("criteria");

        isolate::execute(
            &site,
            &db,
            &criteria,
            true,
            false,
            &mut ScriptedPrompter::default(),
            &mut diagnostics,
        )
        .await
        .expect("isolated");
        assert!(fixture.exists("_posts/_exile/2021/nested/deep/a.txt"));
        assert!(!fixture.exists("_posts/last.markdown"));

        let outcome = execute(&site, &mut diagnostics).await.expect("integrated");

        assert_eq!(outcome.summary.failed, 0);
        assert!(outcome.exile_removed);
        assert_eq!(fixture.tree(), before);
    }

    #[tokio::test]
    async fn missing_exile_dir_fails_fast() {
        let fixture = SiteFixture::new().with_post("a.md", &post_content("A", "2020-01-01"));
        let result = execute(&fixture.site(), &mut Diagnostics::new(false)).await;
        assert!(matches!(result, Err(Error::ExileMissing { .. })));
    }

    #[tokio::test]
    async fn empty_exile_dir_fails_fast() {
        let fixture = SiteFixture::new();
        fs::create_dir_all(fixture.path("_posts/_exile")).expect("mkdir");
        let result = execute(&fixture.site(), &mut Diagnostics::new(false)).await;
        assert!(matches!(result, Err(Error::ExileEmpty { .. })));
        assert!(fixture.exists("_posts/_exile"));
    }

    #[tokio::test]
    async fn exile_file_is_rejected() {
        let fixture = SiteFixture::new().with_post("_exile", "file");
        let result = execute(&fixture.site(), &mut Diagnostics::new(false)).await;
        assert!(matches!(result, Err(Error::ExileIsFile { .. })));
    }

    #[tokio::test]
    async fn conflicts_stay_in_exile() {
        let fixture = SiteFixture::new()
            .with_post("taken.md", "current")
            .with_post("_exile/taken.md", "exiled")
            .with_post("_exile/free.md", "free");
        let mut diagnostics = Diagnostics::new(false);

        let outcome = execute(&fixture.site(), &mut diagnostics).await.expect("integrated");

        assert_eq!(outcome.summary.moved, 1);
        assert_eq!(outcome.summary.failed, 1);
        assert!(!outcome.exile_removed);
        assert_eq!(fixture.read("_posts/taken.md"), "current");
        assert!(fixture.exists("_posts/free.md"));
        assert!(fixture.exists("_posts/_exile/taken.md"));
    }
}
