//! YAML front matter parsing and title rewriting for content files.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::Deserialize;
use serde_yaml::Value;

/// Matches the first `title:` line of a document.
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^title:.*$").expect("title pattern is valid"));

/// Front matter fields read from a content file.
///
/// Every field is optional; loaders apply defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontmatter {
    /// Declared title, any scalar.
    pub(crate) title: Option<Value>,
    /// Declared slug overriding the file stem.
    pub(crate) slug: Option<Value>,
    /// Creation date.
    pub(crate) date: Option<Value>,
    /// Last update date.
    pub(crate) updated: Option<Value>,
    /// Layout name.
    pub(crate) layout: Option<String>,
    /// Publication flag.
    pub(crate) published: Option<bool>,
    /// Tag names as a scalar or list.
    pub(crate) tags: Option<Value>,
    /// Category names as a scalar, list, or nested list.
    pub(crate) categories: Option<Value>,
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, Clone)]
pub struct FrontmatterError {
    /// A human-readable error message.
    pub message: String,
}

/// Parse the front matter of a content file.
///
/// Documents without a `---` fenced block yield empty front matter.
pub fn parse_frontmatter(contents: &str) -> Result<Frontmatter, FrontmatterError> {
    let Some(bounds) = frontmatter_bounds(contents) else {
        return Ok(Frontmatter::default());
    };
    let block = &contents[bounds.start..bounds.end];
    if block.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(block).map_err(|error| FrontmatterError {
        message: error.to_string(),
    })
}

/// Replace the first `title:` line with a quoted new title.
///
/// Returns `None` when the document has no title line.
pub fn replace_title(contents: &str, new_title: &str) -> Option<String> {
    if !TITLE_LINE.is_match(contents) {
        return None;
    }
    let line = format!("title: {}", quote(new_title));
    Some(TITLE_LINE.replace(contents, NoExpand(&line)).into_owned())
}

/// Quote text as a YAML double-quoted scalar.
pub fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Render a scalar front matter value as text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Flatten a scalar or (nested) list of names into a list.
pub fn flatten_names(value: &Value) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(value, &mut names);
    names
}

/// Append every scalar found in `value` to `names`.
fn collect_names(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::Sequence(items) => {
            for item in items {
                collect_names(item, names);
            }
        }
        other => {
            if let Some(name) = scalar_text(other) {
                names.push(name);
            }
        }
    }
}

/// Byte range bounds for front matter in a document.
#[derive(Debug, Clone, Copy)]
struct FrontmatterBounds {
    /// Start byte index of the YAML payload.
    start: usize,
    /// End byte index of the YAML payload.
    end: usize,
}

/// Locate the byte range containing front matter in a document.
fn frontmatter_bounds(contents: &str) -> Option<FrontmatterBounds> {
    let mut offset = 0;
    let mut lines = contents.split_inclusive('\n');
    let first = lines.next()?;
    if trim_line_endings(first) != "---" {
        return None;
    }
    offset += first.len();
    let start = offset;

    for line in lines {
        if trim_line_endings(line) == "---" {
            return Some(FrontmatterBounds { start, end: offset });
        }
        offset += line.len();
    }

    None
}

/// Trim CRLF and LF suffixes from a line fragment.
fn trim_line_endings(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
