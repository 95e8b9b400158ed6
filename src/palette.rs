//! Color palette and styling for CLI output.
//!
//! Every styled fragment goes through a `fmt_*` helper that takes the
//! resolved color flag, so plain output stays byte-identical to the text.

use owo_colors::{OwoColorize, Style};

/// Style for the `draft` marker in selection labels.
pub fn draft() -> Style {
    Style::new().yellow().on_black()
}

/// Style for dates in selection labels.
pub fn date() -> Style {
    Style::new().dimmed()
}

/// Style for folders and source paths.
pub fn location() -> Style {
    Style::new().green()
}

/// Style for the current name of a record being changed.
pub fn old_name() -> Style {
    Style::new().green().underline()
}

/// Style for the name a record is being changed to.
pub fn new_name() -> Style {
    Style::new().cyan().underline()
}

/// Style for irreversible-action warnings.
pub fn danger() -> Style {
    Style::new().red().on_black()
}

/// Style for follow-up hints such as a command to run next.
pub fn hint() -> Style {
    Style::new().yellow()
}

/// Apply `style` to `text` when color is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format the draft marker.
pub fn fmt_draft(text: &str, use_color: bool) -> String {
    paint(text, draft(), use_color)
}

/// Format a date.
pub fn fmt_date(text: &str, use_color: bool) -> String {
    paint(text, date(), use_color)
}

/// Format a folder or path.
pub fn fmt_location(text: &str, use_color: bool) -> String {
    paint(text, location(), use_color)
}

/// Format an old name.
pub fn fmt_old_name(text: &str, use_color: bool) -> String {
    paint(text, old_name(), use_color)
}

/// Format a new name.
pub fn fmt_new_name(text: &str, use_color: bool) -> String {
    paint(text, new_name(), use_color)
}

/// Format a danger warning.
pub fn fmt_danger(text: &str, use_color: bool) -> String {
    paint(text, danger(), use_color)
}

/// Format a hint.
pub fn fmt_hint(text: &str, use_color: bool) -> String {
    paint(text, hint(), use_color)
}
