//! Rendering of the restricted tag subset into LaTeX.
//!
//! Only anchors, unordered lists and list items are understood. Anything
//! else is rejected: the CV schema never emits other tags, so meeting one
//! means the document needs a human look rather than a best-effort guess.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::text::decode_entities;
use crate::error::{ConvertError, Result};

/// Regex matching comments, start tags and end tags.
/// Captures: (1) `/` for end tags, (2) tag name, (3) raw attribute text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)([^>]*)>").expect("valid regex")
});

/// Regex for the href attribute, double-quoted, single-quoted or bare.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HREF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid regex")
});

/// The recognized tag subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `<a href="...">`
    Anchor,
    /// `<ul>`
    UnorderedList,
    /// `<li>`
    ListItem,
    /// Any other tag, carrying its name.
    Unsupported(String),
}

impl Tag {
    /// Classify a tag name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "a" => Self::Anchor,
            "ul" => Self::UnorderedList,
            "li" => Self::ListItem,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Append the LaTeX that opens this tag.
    fn open(&self, attributes: &str, mut out: String) -> Result<String> {
        match self {
            Self::Anchor => {
                out.push_str("\\href{");
                out.push_str(&href(attributes));
                out.push_str("}{");
            }
            Self::UnorderedList => out.push_str("\\begin{itemize}\\setlength\\itemsep{0em}\n"),
            Self::ListItem => out.push_str("\\item "),
            Self::Unsupported(name) => return Err(ConvertError::UnsupportedMarkup(name.clone())),
        }
        Ok(out)
    }

    /// Append the LaTeX that closes this tag.
    fn close(&self, mut out: String) -> Result<String> {
        match self {
            Self::Anchor => out.push('}'),
            Self::UnorderedList => out.push_str("\\end{itemize}\n"),
            Self::ListItem => out.push('\n'),
            Self::Unsupported(name) => return Err(ConvertError::UnsupportedMarkup(name.clone())),
        }
        Ok(out)
    }
}

/// Extract the href value from raw attribute text, empty if absent.
fn href(attributes: &str) -> String {
    HREF_PATTERN
        .captures(attributes)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| decode_entities(m.as_str()).into_owned())
        .unwrap_or_default()
}

/// Render one matched tag (or comment) into the buffer.
fn render_tag(caps: &Captures<'_>, out: String) -> Result<String> {
    let Some(name) = caps.get(2) else {
        // Comment
        return Ok(out);
    };

    let tag = Tag::from_name(name.as_str());
    let is_end = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let attributes = caps.get(3).map_or("", |m| m.as_str());

    if is_end {
        tag.close(out)
    } else if attributes.trim_end().ends_with('/') {
        let out = tag.open(attributes.trim_end().trim_end_matches('/'), out)?;
        tag.close(out)
    } else {
        tag.open(attributes, out)
    }
}

/// Render the restricted tag subset into LaTeX.
///
/// Character references in text between tags and in `href` values are
/// decoded. Comments are dropped.
///
/// # Errors
/// Returns `ConvertError::UnsupportedMarkup` naming the first tag outside
/// the subset.
///
/// # Examples
/// ```
/// use europass_tex::latex::render_markup;
///
/// let latex = render_markup(r#"See <a href="http://x.org">site</a>"#).unwrap();
/// assert_eq!(latex, r"See \href{http://x.org}{site}");
///
/// assert!(render_markup("<table>").is_err());
/// ```
pub fn render_markup(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in TAG_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&decode_entities(&text[last..whole.start()]));
        out = render_tag(&caps, out)?;
        last = whole.end();
    }

    out.push_str(&decode_entities(&text[last..]));
    Ok(out)
}
