//! Implementation of the `postkit remove` command.

use std::path::Path;

use crate::{
    commands::{ColorChoice, require_terms},
    config::Site,
    diagnostics::Diagnostics,
    error::{Error, Result},
    fileops::{RemoveReport, remove_record},
    filter::FilterCriteria,
    palette,
    prompt::{InquirePrompter, Prompter},
    record::ContentRecord,
    select::{SelectRequest, select, source_label},
    store::ContentDatabase,
};

/// Index of the confirming choice.
const DELETE: usize = 0;
/// Index of the cancelling choice.
const CANCEL: usize = 1;

/// Execute the remove command.
pub async fn run(
    color: ColorChoice,
    verbose: bool,
    site_root: &Path,
    terms: &[String],
) -> Result<()> {
    require_terms(
        terms,
        "You need to search for a specific post before you can remove it.",
    )?;
    let use_color = color.enabled();
    let mut diagnostics = Diagnostics::new(verbose);
    let criteria = FilterCriteria::terms(terms)?;
    let site = Site::load(site_root)?;
    let db = ContentDatabase::load(&site, &mut diagnostics);

    let report = execute(&db, &criteria, use_color, &mut InquirePrompter, &mut diagnostics)?;
    diagnostics.print_skipped_summary();
    println!(
        "{}",
        palette::fmt_danger(&format!("{} deleted.", report.file.display()), use_color)
    );
    match report.asset_dir {
        Some(dir) => println!(
            "{}",
            palette::fmt_danger(
                &format!("{} (asset directory) deleted.", dir.display()),
                use_color
            )
        ),
        None => diagnostics.info("No asset directory found."),
    }
    Ok(())
}

/// Find the record, confirm, and delete it.
pub(crate) fn execute(
    db: &ContentDatabase,
    criteria: &FilterCriteria,
    use_color: bool,
    prompter: &mut dyn Prompter,
    diagnostics: &mut Diagnostics,
) -> Result<RemoveReport> {
    let candidates = criteria.apply(db.all(), diagnostics);

    let label = |record: &ContentRecord| source_label(record, use_color);
    let chosen = select(
        &candidates,
        &SelectRequest {
            message: "Select the post or page you wish to remove.",
            empty_message: "No posts or pages found using your query.",
            label: &label,
        },
        prompter,
    )?;

    let message = format!(
        "Remove {}? {}",
        palette::fmt_new_name(chosen.display_title(), use_color),
        palette::fmt_danger("This action is irreversible!", use_color)
    );
    let options = ["Delete it!".to_string(), "Cancel".to_string()];
    match prompter.select(&message, &options)? {
        DELETE => remove_record(chosen),
        CANCEL => Err(Error::Cancelled),
        index => Err(Error::SelectionOutOfRange {
            index,
            len: options.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::{
        diagnostics::Diagnostics,
        error::Error,
        filter::FilterCriteria,
        store::ContentDatabase,
        testutil::{ScriptedPrompter, SiteFixture, post_content},
    };

    fn fixture() -> SiteFixture {
        SiteFixture::new()
            .with_post("solo.md", &post_content("Solo post", "2020-01-01"))
            .with_post("pics.md", &post_content("Pictures", "2020-02-01"))
            .with_asset("pics", "cover.png", "png")
            .with_page("about/index.md", &post_content("About the post author", "2019-01-01"))
    }

    fn remove(fixture: &SiteFixture, terms: &[&str], answers: &[usize]) -> (Result<(), Error>, ScriptedPrompter) {
        let mut diagnostics = Diagnostics::new(false);
        let db = ContentDatabase::load(&fixture.site(), &mut diagnostics);
        let terms = terms.iter().map(|term| term.to_string()).collect::<Vec<_>>();
        let criteria = FilterCriteria::terms(&terms).expect("criteria");
        let mut prompter = ScriptedPrompter::answering(answers);
        let result = execute(&db, &criteria, false, &mut prompter, &mut diagnostics).map(|_| ());
        (result, prompter)
    }

    #[test]
    fn deletes_file_without_asset_dir() {
        let fixture = fixture();
        let (result, prompter) = remove(&fixture, &["solo"], &[0]);

        result.expect("removed");
        assert!(!fixture.exists("_posts/solo.md"));
        assert_eq!(prompter.calls.len(), 1);
        assert_eq!(prompter.calls[0].options, vec!["Delete it!", "Cancel"]);
    }

    #[test]
    fn deletes_asset_dir_with_file() {
        let fixture = fixture();
        let (result, _) = remove(&fixture, &["pictures"], &[0]);

        result.expect("removed");
        assert!(!fixture.exists("_posts/pics.md"));
        assert!(!fixture.exists("_posts/pics"));
    }

    #[test]
    fn searches_posts_and_pages() {
        let fixture = fixture();
        let (result, prompter) = remove(&fixture, &["post"], &[1, 0]);

        result.expect("removed");
        assert_eq!(
            prompter.calls[0].options,
            vec!["Solo post (_posts/solo.md)", "About the post author (about/index.md)"]
        );
        assert!(fixture.exists("_posts/solo.md"));
        assert!(!fixture.exists("about/index.md"));
    }

    #[test]
    fn cancel_leaves_files_in_place() {
        let fixture = fixture();
        let (result, _) = remove(&fixture, &["solo"], &[1]);

        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(fixture.exists("_posts/solo.md"));
    }

    #[test]
    fn no_match_reports_empty_selection() {
        let fixture = fixture();
        let (result, prompter) = remove(&fixture, &["nothing-here"], &[]);

        assert!(matches!(result, Err(Error::EmptySelection { .. })));
        assert!(prompter.calls.is_empty());
    }
}
