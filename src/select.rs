//! Resolve a narrowed record list to exactly one record.

use crate::{
    error::{Error, Result},
    palette,
    prompt::Prompter,
    record::ContentRecord,
};

/// How a selection is presented to the user.
pub struct SelectRequest<'a> {
    /// Prompt message shown above the list.
    pub message: &'a str,
    /// Error message when nothing matched.
    pub empty_message: &'a str,
    /// Render one record as a single-line label.
    pub label: &'a dyn Fn(&ContentRecord) -> String,
}

/// Pick one record from `items`.
///
/// A single match is returned without prompting. Several matches are
/// offered once as a list, and the chosen label is mapped back by position.
pub fn select<'r>(
    items: &'r [ContentRecord],
    request: &SelectRequest<'_>,
    prompter: &mut dyn Prompter,
) -> Result<&'r ContentRecord> {
    match items {
        [] => Err(Error::EmptySelection {
            message: request.empty_message.to_string(),
        }),
        [only] => Ok(only),
        _ => {
            let labels = items.iter().map(request.label).collect::<Vec<_>>();
            let index = prompter.select(request.message, &labels)?;
            items.get(index).ok_or(Error::SelectionOutOfRange {
                index,
                len: items.len(),
            })
        }
    }
}

/// `[draft] Title` or `[MM-DD-YYYY] Title (folder)`.
pub fn edit_label(record: &ContentRecord, use_color: bool) -> String {
    if record.published {
        format!(
            "[{}] {} ({})",
            palette::fmt_date(&record.date.format("%m-%d-%Y").to_string(), use_color),
            record.display_title(),
            palette::fmt_location(&record.folder(), use_color)
        )
    } else {
        format!(
            "[{}] {}",
            palette::fmt_draft("draft", use_color),
            record.display_title()
        )
    }
}

/// `Title (source path)`.
pub fn source_label(record: &ContentRecord, use_color: bool) -> String {
    format!(
        "{} ({})",
        record.display_title(),
        palette::fmt_location(&record.source.to_string_lossy(), use_color)
    )
}

/// `Title (YYYY-MM-DD of last update)`.
pub fn updated_label(record: &ContentRecord, use_color: bool) -> String {
    format!(
        "{} ({})",
        record.display_title(),
        palette::fmt_location(&record.updated.format("%Y-%m-%d").to_string(), use_color)
    )
}

#[cfg(test)]
mod tests {
    use super::{SelectRequest, edit_label, select, source_label, updated_label};
    use crate::{
        error::Error,
        record::ContentRecord,
        testutil::{ScriptedPrompter, record},
    };

    fn plain(record: &ContentRecord) -> String {
        source_label(record, false)
    }

    fn request() -> SelectRequest<'static> {
        SelectRequest {
            message: "Pick one",
            empty_message: "nothing",
            label: &plain,
        }
    }

    #[test]
    fn empty_list_fails_without_prompting() {
        let mut prompter = ScriptedPrompter::answering(&[]);
        let error = select(&[], &request(), &mut prompter).expect_err("should fail");
        assert!(matches!(error, Error::EmptySelection { message } if message == "nothing"));
        assert!(prompter.calls.is_empty());
    }

    #[test]
    fn single_match_skips_prompt() {
        let items = [record("Only", "only", "_posts/only.md", (2020, 1, 1))];
        let mut prompter = ScriptedPrompter::answering(&[]);
        let chosen = select(&items, &request(), &mut prompter).expect("selected");
        assert_eq!(chosen.title, "Only");
        assert!(prompter.calls.is_empty());
    }

    #[test]
    fn multiple_matches_prompt_once_and_map_by_position() {
        let items = [
            record("Same", "a", "_posts/a.md", (2020, 1, 1)),
            record("Same", "b", "_posts/b.md", (2020, 1, 2)),
            record("Other", "c", "_posts/c.md", (2020, 1, 3)),
        ];
        let mut prompter = ScriptedPrompter::answering(&[1]);
        let chosen = select(&items, &request(), &mut prompter).expect("selected");

        assert_eq!(chosen.slug, "b");
        assert_eq!(prompter.calls.len(), 1);
        assert_eq!(prompter.calls[0].options[0], "Same (_posts/a.md)");
    }

    #[test]
    fn out_of_range_answer_is_internal_error() {
        let items = [
            record("A", "a", "_posts/a.md", (2020, 1, 1)),
            record("B", "b", "_posts/b.md", (2020, 1, 2)),
        ];
        let mut prompter = ScriptedPrompter::answering(&[5]);
        let error = select(&items, &request(), &mut prompter).expect_err("should fail");
        assert!(matches!(error, Error::SelectionOutOfRange { index: 5, len: 2 }));
    }

    #[test]
    fn labels_render_without_color() {
        let mut post = record("Hello", "hello", "_posts/2020/hello.md", (2020, 1, 15));
        assert_eq!(edit_label(&post, false), "[01-15-2020] Hello (_posts/2020)");
        assert_eq!(updated_label(&post, false), "Hello (2020-01-15)");
        post.published = false;
        assert_eq!(edit_label(&post, false), "[draft] Hello");
    }
}
