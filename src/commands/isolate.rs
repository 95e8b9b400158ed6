//! Implementation of the `postkit isolate` command.
//!
//! Isolating keeps one post in `_posts` and parks every other post, with
//! its asset directory, under `_posts/_exile` so a build only sees the
//! kept post.

use std::{io::ErrorKind, path::Path};

use crate::{
    commands::ColorChoice,
    config::Site,
    diagnostics::Diagnostics,
    error::{Error, Result},
    fileops::{BatchSummary, MoveOperation, move_batch},
    filter::FilterCriteria,
    palette,
    prompt::{InquirePrompter, Prompter},
    record::{Collection, ContentRecord, sort_by_date_desc},
    select::{SelectRequest, select, updated_label},
    store::ContentDatabase,
};

/// Source-relative directory of published posts.
const POSTS_DIR: &str = "_posts";

/// What an isolate run did.
#[derive(Debug)]
pub struct IsolateOutcome {
    /// Title of the post left in place, if any.
    pub(crate) kept: Option<String>,
    /// Totals for the exile moves.
    pub(crate) summary: BatchSummary,
}

/// Execute the isolate command.
pub async fn run(
    color: ColorChoice,
    verbose: bool,
    site_root: &Path,
    terms: &[String],
    all: bool,
) -> Result<()> {
    let use_color = color.enabled();
    let mut diagnostics = Diagnostics::new(verbose);
    let criteria = FilterCriteria::terms(terms)?;
    let site = Site::load(site_root)?;
    let db = ContentDatabase::load(&site, &mut diagnostics);

    let outcome = execute(
        &site,
        &db,
        &criteria,
        all,
        use_color,
        &mut InquirePrompter,
        &mut diagnostics,
    )
    .await?;

    diagnostics.print_skipped_summary();
    diagnostics.print_failure_summary();
    let kept = outcome.kept.as_deref().unwrap_or("All posts");
    println!(
        "{} successfully isolated ({} exiled).",
        palette::fmt_location(kept, use_color),
        outcome.summary.moved
    );
    println!(
        "To restore the exiled posts, run {}",
        palette::fmt_hint("postkit integrate", use_color)
    );
    Ok(())
}

/// Pick the post to keep and move every other post into exile.
///
/// With `all`, nothing is kept and no prompt is shown.
pub(crate) async fn execute(
    site: &Site,
    db: &ContentDatabase,
    criteria: &FilterCriteria,
    all: bool,
    use_color: bool,
    prompter: &mut dyn Prompter,
    diagnostics: &mut Diagnostics,
) -> Result<IsolateOutcome> {
    let exile_dir = site.exile_dir();
    ensure_not_file(&exile_dir).await?;

    let mut posts = db
        .get(Collection::Posts)
        .into_iter()
        .filter(|record| record.is_under(Path::new(POSTS_DIR)))
        .collect::<Vec<_>>();
    sort_by_date_desc(&mut posts);

    let kept = if all {
        None
    } else {
        let candidates = criteria.apply(posts.clone(), diagnostics);
        let label = |record: &ContentRecord| updated_label(record, use_color);
        let chosen = select(
            &candidates,
            &SelectRequest {
                message: "Select the post you want to keep.",
                empty_message: "No posts matched.",
                label: &label,
            },
            prompter,
        )?;
        Some(chosen.clone())
    };

    tokio::fs::create_dir_all(&exile_dir)
        .await
        .map_err(|error| Error::file_op("create", &exile_dir, error))?;
    diagnostics.info(format!("Exile directory ready at {}", exile_dir.display()));

    let operations = posts
        .iter()
        .filter(|record| {
            kept.as_ref()
                .is_none_or(|keep| keep.full_source != record.full_source)
        })
        .filter_map(|record| {
            let relative = record.source.strip_prefix(POSTS_DIR).ok()?;
            Some(MoveOperation::new(
                &record.full_source,
                exile_dir.join(relative),
            ))
        })
        .collect::<Vec<_>>();

    let summary = move_batch(operations, diagnostics).await;
    Ok(IsolateOutcome {
        kept: kept.map(|record| record.display_title().to_string()),
        summary,
    })
}

/// Fail when something other than a directory occupies the exile path.
async fn ensure_not_file(exile_dir: &Path) -> Result<()> {
    match tokio::fs::metadata(exile_dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::ExileIsFile {
            path: exile_dir.to_path_buf(),
        }),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        Err(error) => Err(Error::file_op("inspect", exile_dir, error)),
    }
}
