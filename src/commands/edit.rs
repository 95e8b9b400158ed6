//! Implementation of the `postkit edit` command.

use std::path::{Path, PathBuf};

use crate::{
    commands::ColorChoice,
    config::Site,
    diagnostics::Diagnostics,
    editor::{EditorConfig, open_file},
    error::Result,
    filter::{FilterArgs, FilterCriteria},
    prompt::{InquirePrompter, Prompter},
    record::{Collection, ContentRecord, sort_by_date_desc},
    select::{SelectRequest, edit_label, select},
    store::ContentDatabase,
};

/// Execute the edit command.
pub async fn run(
    color: ColorChoice,
    verbose: bool,
    site_root: &Path,
    filters: &FilterArgs,
    page: bool,
    editor: &EditorConfig,
) -> Result<()> {
    let mut diagnostics = Diagnostics::new(verbose);
    let criteria = FilterCriteria::new(filters)?;
    let site = Site::load(site_root)?;
    let db = ContentDatabase::load(&site, &mut diagnostics);
    let collection = if page {
        Collection::Pages
    } else {
        Collection::Posts
    };

    let path = execute(
        &db,
        &criteria,
        collection,
        color.enabled(),
        &mut InquirePrompter,
        &mut diagnostics,
    )?;
    diagnostics.info(format!("Opening {}", path.display()));
    diagnostics.print_skipped_summary();
    open_file(editor, &path)
}

/// Filter a collection and pick the file to open.
pub(crate) fn execute(
    db: &ContentDatabase,
    criteria: &FilterCriteria,
    collection: Collection,
    use_color: bool,
    prompter: &mut dyn Prompter,
    diagnostics: &mut Diagnostics,
) -> Result<PathBuf> {
    let mut records = db.get(collection);
    sort_by_date_desc(&mut records);
    let matches = criteria.apply(records, diagnostics);

    let label = |record: &ContentRecord| edit_label(record, use_color);
    let chosen = select(
        &matches,
        &SelectRequest {
            message: "Select the file you wish to edit.",
            empty_message: "Sorry, no articles match your query.",
            label: &label,
        },
        prompter,
    )?;
    Ok(chosen.full_source.clone())
}
