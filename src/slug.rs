//! Turn free text into a filesystem-safe file name.

/// Lowercase `text` and join its alphanumeric runs with hyphens.
///
/// Non-ASCII letters are kept, so titles in any script still produce a
/// readable name.
///
/// ```text
/// "Hello, World!"     -> "hello-world"
/// "  Rust & CLI 101 " -> "rust-cli-101"
/// ```
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
