//! Implementation of the `postkit rename` command.

use std::path::Path;

use crate::{
    commands::ColorChoice,
    config::Site,
    diagnostics::Diagnostics,
    error::{Error, Result},
    fileops::{RenameReport, apply_rename, plan_rename, rename_title, renamed_path},
    filter::FilterCriteria,
    palette,
    prompt::{InquirePrompter, Prompter},
    record::ContentRecord,
    select::{SelectRequest, select, source_label},
    store::ContentDatabase,
};

/// Which parts of a record to rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameScope {
    /// Title and file name.
    Both,
    /// Only the `title:` line.
    Title,
    /// Only the file name and asset directory.
    Filename,
}

impl RenameScope {
    /// Whether the title line is rewritten.
    const fn renames_title(self) -> bool {
        matches!(self, Self::Both | Self::Title)
    }

    /// Whether the file is moved.
    const fn renames_file(self) -> bool {
        matches!(self, Self::Both | Self::Filename)
    }
}

/// Scope choices, in display order. The final entry cancels.
const SCOPE_CHOICES: [(&str, Option<RenameScope>); 4] = [
    ("Yes, rename both", Some(RenameScope::Both)),
    (
        "Title only please (don't rename the file!)",
        Some(RenameScope::Title),
    ),
    (
        "Filename only please (don't rename the title!)",
        Some(RenameScope::Filename),
    ),
    ("No, forget it, cancel everything.", None),
];

/// What a rename changed.
#[derive(Debug)]
pub struct RenameOutcome {
    /// Previous title, when the title line was rewritten.
    pub(crate) old_title: Option<String>,
    /// File and asset moves, when the file was renamed.
    pub(crate) file: Option<RenameReport>,
}

/// Execute the rename command.
pub async fn run(
    color: ColorChoice,
    verbose: bool,
    site_root: &Path,
    terms: &[String],
    new_name: Option<&str>,
) -> Result<()> {
    let new_name = new_name.unwrap_or_default();
    if terms.iter().all(|term| term.trim().is_empty()) || new_name.trim().is_empty() {
        return Err(Error::validation(
            "Both a new and an old filename/title are required.",
        ));
    }
    let use_color = color.enabled();
    let mut diagnostics = Diagnostics::new(verbose);
    let criteria = FilterCriteria::terms(terms)?;
    let site = Site::load(site_root)?;
    let db = ContentDatabase::load(&site, &mut diagnostics);

    let outcome = execute(
        &db,
        &criteria,
        new_name,
        use_color,
        &mut InquirePrompter,
        &mut diagnostics,
    )?;
    diagnostics.print_skipped_summary();

    if let Some(old_title) = outcome.old_title {
        println!(
            "{} renamed to {}",
            palette::fmt_old_name(&old_title, use_color),
            palette::fmt_new_name(new_name, use_color)
        );
    }
    if let Some(report) = outcome.file {
        println!(
            "{} renamed to {}",
            palette::fmt_old_name(&report.file.origin.display().to_string(), use_color),
            palette::fmt_new_name(&report.file.destination.display().to_string(), use_color)
        );
        match report.asset {
            Some(_) => println!("Asset folder renamed as well."),
            None => diagnostics.info("No asset folder found."),
        }
    }
    Ok(())
}

/// Find the record, ask what to rename, and apply it.
///
/// Destinations are checked first; the title is then rewritten before the
/// file moves.
pub(crate) fn execute(
    db: &ContentDatabase,
    criteria: &FilterCriteria,
    new_name: &str,
    use_color: bool,
    prompter: &mut dyn Prompter,
    diagnostics: &mut Diagnostics,
) -> Result<RenameOutcome> {
    let candidates = criteria.apply(db.all(), diagnostics);

    let label = |record: &ContentRecord| source_label(record, use_color);
    let chosen = select(
        &candidates,
        &SelectRequest {
            message: "Select the post or page you wish to rename.",
            empty_message: "No posts or pages found using your query.",
            label: &label,
        },
        prompter,
    )?;

    let scope = choose_scope(chosen, new_name, use_color, prompter)?;
    let plan = if scope.renames_file() {
        Some(plan_rename(chosen, new_name)?)
    } else {
        None
    };

    let mut outcome = RenameOutcome {
        old_title: None,
        file: None,
    };
    if scope.renames_title() {
        rename_title(chosen, new_name)?;
        outcome.old_title = Some(chosen.display_title().to_string());
    }
    if let Some(plan) = plan {
        apply_rename(&plan)?;
        outcome.file = Some(plan);
    }
    Ok(outcome)
}

/// Ask which parts of `record` to rename.
fn choose_scope(
    record: &ContentRecord,
    new_name: &str,
    use_color: bool,
    prompter: &mut dyn Prompter,
) -> Result<RenameScope> {
    let new_file = renamed_path(record, new_name)
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_default();
    let message = format!(
        "Rename title ({}) to {}? Rename file ({}) to {}?",
        palette::fmt_old_name(record.display_title(), use_color),
        palette::fmt_new_name(new_name, use_color),
        palette::fmt_old_name(&record.file_name(), use_color),
        palette::fmt_new_name(&new_file, use_color)
    );
    let options = SCOPE_CHOICES
        .iter()
        .map(|(label, _)| (*label).to_string())
        .collect::<Vec<_>>();

    let index = prompter.select(&message, &options)?;
    match SCOPE_CHOICES.get(index) {
        Some((_, Some(scope))) => Ok(*scope),
        Some((_, None)) => Err(Error::Cancelled),
        None => Err(Error::SelectionOutOfRange {
            index,
            len: options.len(),
        }),
    }
}
