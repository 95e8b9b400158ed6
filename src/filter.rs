//! Filter criteria and the narrowing pipeline.

use regex::{Regex, RegexBuilder};

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    predicates::{
        is_after, is_before, is_draft, matches_category, matches_folder, matches_layout,
        matches_tag, matches_terms, normalize_folder, parse_boundary,
    },
    record::ContentRecord,
};

/// User-supplied filter options before compilation.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text search terms.
    pub terms: Vec<String>,
    /// Keep records dated after this `MM-DD-YYYY` day.
    pub after: Option<String>,
    /// Keep records dated before this `MM-DD-YYYY` day.
    pub before: Option<String>,
    /// Category pattern.
    pub category: Option<String>,
    /// Keep only drafts.
    pub draft: bool,
    /// Folder pattern.
    pub folder: Option<String>,
    /// Layout pattern.
    pub layout: Option<String>,
    /// Tag pattern.
    pub tag: Option<String>,
}

/// Compiled, immutable filter criteria.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive terms that must all match title or slug.
    title_terms: Vec<Regex>,
    /// Raw after-date, validated when applied.
    after: Option<String>,
    /// Raw before-date, validated when applied.
    before: Option<String>,
    /// Category pattern.
    category: Option<Regex>,
    /// Keep only drafts.
    draft_only: bool,
    /// Folder pattern, after shorthand expansion.
    folder: Option<Regex>,
    /// Case-insensitive layout pattern.
    layout: Option<Regex>,
    /// Tag pattern.
    tag: Option<Regex>,
}

impl FilterCriteria {
    /// Compile criteria from raw arguments.
    pub(crate) fn new(args: &FilterArgs) -> Result<Self> {
        Ok(Self {
            title_terms: compile_terms(&args.terms)?,
            after: args.after.clone(),
            before: args.before.clone(),
            category: args.category.as_deref().map(compile).transpose()?,
            draft_only: args.draft,
            folder: args
                .folder
                .as_deref()
                .map(|folder| compile(&normalize_folder(folder)))
                .transpose()?,
            layout: args.layout.as_deref().map(compile_insensitive).transpose()?,
            tag: args.tag.as_deref().map(compile).transpose()?,
        })
    }

    /// Criteria that only match on search terms.
    pub(crate) fn terms(terms: &[String]) -> Result<Self> {
        Ok(Self {
            title_terms: compile_terms(terms)?,
            ..Self::default()
        })
    }

    /// Narrow `records` to those meeting every active criterion.
    ///
    /// Title terms always apply; the remaining criteria run in a fixed
    /// order when set. Relative order of the input is preserved. An
    /// invalid date boundary is reported and skipped.
    pub(crate) fn apply(
        &self,
        records: Vec<ContentRecord>,
        diagnostics: &mut Diagnostics,
    ) -> Vec<ContentRecord> {
        let mut results = keep(records, |record| matches_terms(record, &self.title_terms));

        if self.draft_only {
            results = keep(results, is_draft);
        }
        if let Some(layout) = &self.layout {
            results = keep(results, |record| matches_layout(record, layout));
        }
        if let Some(folder) = &self.folder {
            results = keep(results, |record| matches_folder(record, folder));
        }
        if let Some(tag) = &self.tag {
            results = keep(results, |record| matches_tag(record, tag));
        }
        if let Some(category) = &self.category {
            results = keep(results, |record| matches_category(record, category));
        }
        if let Some(before) = &self.before {
            match parse_boundary(before) {
                Ok(day) => results = keep(results, |record| is_before(record, day)),
                Err(error) => diagnostics.warn(format!("Before date {error}, ignoring argument.")),
            }
        }
        if let Some(after) = &self.after {
            match parse_boundary(after) {
                Ok(day) => results = keep(results, |record| is_after(record, day)),
                Err(error) => diagnostics.warn(format!("After date {error}, ignoring argument.")),
            }
        }

        results
    }
}

/// Retain records satisfying `predicate`.
fn keep(
    records: Vec<ContentRecord>,
    predicate: impl Fn(&ContentRecord) -> bool,
) -> Vec<ContentRecord> {
    records.into_iter().filter(|record| predicate(record)).collect()
}

/// Compile search terms case-insensitively.
pub(crate) fn compile_terms(terms: &[String]) -> Result<Vec<Regex>> {
    terms
        .iter()
        .filter(|term| !term.is_empty())
        .map(|term| compile_insensitive(term))
        .collect()
}

/// Compile a case-sensitive pattern.
fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|error| invalid_pattern(pattern, error))
}

/// Compile a case-insensitive pattern.
fn compile_insensitive(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|error| invalid_pattern(pattern, error))
}

/// Wrap a regex error.
fn invalid_pattern(pattern: &str, error: regex::Error) -> Error {
    Error::InvalidPattern {
        pattern: pattern.to_string(),
        source: Box::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterArgs, FilterCriteria};
    use crate::{diagnostics::Diagnostics, error::Error, testutil::record};

    fn sample() -> Vec<crate::record::ContentRecord> {
        let mut draft = record("Draft Rust notes", "rust-notes", "_drafts/rust-notes.md", (2020, 3, 1));
        draft.published = false;
        let mut tagged = record("Rust CLI tips", "cli-tips", "_posts/cli-tips.md", (2020, 2, 1));
        tagged.tags = vec!["rust".into()];
        tagged.categories = vec!["Code".into()];
        let mut page = record("About", "index", "about/index.md", (2019, 1, 1));
        page.layout = "page".into();
        vec![draft, tagged, page]
    }

    fn titles(records: &[crate::record::ContentRecord]) -> Vec<&str> {
        records.iter().map(|record| record.title.as_str()).collect()
    }

    fn run(args: FilterArgs) -> (Vec<crate::record::ContentRecord>, Diagnostics) {
        let mut diagnostics = Diagnostics::new(false);
        let criteria = FilterCriteria::new(&args).expect("criteria");
        let results = criteria.apply(sample(), &mut diagnostics);
        (results, diagnostics)
    }

    #[test]
    fn empty_criteria_keep_everything_in_order() {
        let (results, _) = run(FilterArgs::default());
        assert_eq!(titles(&results), vec!["Draft Rust notes", "Rust CLI tips", "About"]);
    }

    #[test]
    fn terms_are_case_insensitive() {
        let (results, _) = run(FilterArgs {
            terms: vec!["RUST".into()],
            ..FilterArgs::default()
        });
        assert_eq!(titles(&results), vec!["Draft Rust notes", "Rust CLI tips"]);
    }

    #[test]
    fn combines_structured_filters() {
        let (drafts, _) = run(FilterArgs {
            draft: true,
            ..FilterArgs::default()
        });
        assert_eq!(titles(&drafts), vec!["Draft Rust notes"]);

        let (by_folder, _) = run(FilterArgs {
            folder: Some("post".into()),
            ..FilterArgs::default()
        });
        assert_eq!(titles(&by_folder), vec!["Rust CLI tips"]);

        let (by_layout, _) = run(FilterArgs {
            layout: Some("PAGE".into()),
            ..FilterArgs::default()
        });
        assert_eq!(titles(&by_layout), vec!["About"]);

        let (by_tag_and_category, _) = run(FilterArgs {
            tag: Some("rust".into()),
            category: Some("Code".into()),
            ..FilterArgs::default()
        });
        assert_eq!(titles(&by_tag_and_category), vec!["Rust CLI tips"]);
    }

    #[test]
    fn date_window_is_exclusive() {
        let (results, diagnostics) = run(FilterArgs {
            after: Some("01-01-2019".into()),
            before: Some("03/01/2020".into()),
            ..FilterArgs::default()
        });
        assert_eq!(titles(&results), vec!["Rust CLI tips"]);
        assert_eq!(diagnostics.warning_count(), 0);
    }

    #[test]
    fn malformed_date_warns_and_keeps_everything() {
        let (results, diagnostics) = run(FilterArgs {
            before: Some("13-40-2020".into()),
            after: Some("soon".into()),
            ..FilterArgs::default()
        });
        assert_eq!(results.len(), 3);
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn invalid_pattern_is_rejected_up_front() {
        let error = FilterCriteria::new(&FilterArgs {
            tag: Some("(".into()),
            ..FilterArgs::default()
        })
        .expect_err("pattern should fail");
        assert!(matches!(error, Error::InvalidPattern { .. }));
    }
}
