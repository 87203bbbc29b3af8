//! URL slugification and output path utilities.
//!
//! Converts file names and tags to URL-safe path segments and maps site
//! paths to the files they are written to.

use regex::Regex;
use std::sync::LazyLock;

/// Characters forbidden in path segments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '(', ')', '[', ']', '"', '\t', '\r', '\n',
];

// ============================================================================
// Slugification
// ============================================================================

/// Sanitize a file stem or front matter slug into a single path segment.
///
/// Removes forbidden characters and replaces whitespace with `-`.
/// Case and non-ASCII letters are preserved.
pub fn sanitize_segment(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Normalize a tag into its URL segment.
///
/// Transliterates to ASCII, lowercases and collapses every run of
/// non-alphanumerics into one `-`:
/// `"Swift Evolution"` → `swift-evolution`, `"Café"` → `cafe`.
///
/// A tag made only of punctuation falls back to its percent-encoded form.
pub fn normalize_tag(tag: &str) -> String {
    static RE_NON_ALNUM: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

    let ascii = deunicode::deunicode(tag.trim()).to_ascii_lowercase();
    let slug = RE_NON_ALNUM.replace_all(&ascii, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        urlencoding::encode(&tag.trim().to_lowercase()).into_owned()
    } else {
        slug.to_owned()
    }
}

// ============================================================================
// Output Paths
// ============================================================================

/// Map a site path to the HTML file that serves it.
///
/// | Site path      | Output file              |
/// |----------------|--------------------------|
/// | `""`           | `index.html`             |
/// | `posts`        | `posts/index.html`       |
/// | `posts/hello`  | `posts/hello/index.html` |
pub fn html_output_path(site_path: &str) -> String {
    let trimmed = site_path.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_owned()
    } else {
        format!("{trimmed}/index.html")
    }
}

/// Absolute href for a site path (`posts/hello` → `/posts/hello`).
pub fn href(site_path: &str) -> String {
    format!("/{}", site_path.trim_matches('/'))
}
