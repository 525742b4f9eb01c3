//! Configuration constants and validation functions for the converter.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ConvertError, Result};

/// Name of the root element every Europass CV document carries.
pub const ROOT_ELEMENT: &str = "SkillsPassport";

/// Reserved key under which leaf text is found.
pub const TEXT_KEY: &str = "#text";

/// Reserved key under which an element's attributes are found.
pub const ATTRIBUTES_KEY: &str = "#attributes";

/// URL prefixes that trigger auto-linking of bare URLs.
pub const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Characters that mark a URL as already delimited.
///
/// A URL directly preceded by one of these is left alone, and a bare URL
/// ends at the first one of them.
pub const DELIMITER_CHARS: &str = "'\"<>{}[]";

/// Whitespace recognized by the auto-link scan.
pub const WHITESPACE_CHARS: &str = " \t\n\r\x0b\x0c";

/// Entity names that also decode without a closing `;`.
pub const LEGACY_ENTITIES: [&str; 106] = [
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Literal substitutions applied after auto-linking, in order.
///
/// Escapes characters reserved by LaTeX and translates paragraph and
/// emphasis tags into their typeset equivalents.
pub const LATEX_SUBSTITUTIONS: [(&str, &str); 9] = [
    ("&", "\\&"),
    ("#", "\\#"),
    ("_", "\\_"),
    ("<p>", ""),
    ("</p>", "\n\n"),
    ("<strong>", "\\textbf{"),
    ("</strong>", "}"),
    ("<em>", "\\textit{"),
    ("</em>", "}"),
];

/// Separator placed between the two sides of a period.
pub const PERIOD_SEPARATOR: &str = " -- ";

/// Default color for section titles (HTML hex notation).
pub const DEFAULT_ACCENT_COLOR: &str = "0e4194";

/// Section title for job-related skills.
pub const SKILLS_TITLE: &str = "Skills: Job related";

/// Section title for education.
pub const EDUCATION_TITLE: &str = "Education and Training";

/// Section title for work experience.
pub const WORK_EXPERIENCE_TITLE: &str = "Work Experience";

/// Section title for achievements.
pub const ACHIEVEMENTS_TITLE: &str = "Additional Information";

/// Accent color pattern: six hex digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ACCENT_COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Options controlling the rendered LaTeX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Files pulled in with `\input{}` before the end of the document.
    pub include_files: Vec<String>,

    /// Whether to emit a table of contents at the end.
    pub table_of_contents: bool,

    /// Section title color, six hex digits.
    pub accent_color: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_files: Vec::new(),
            table_of_contents: true,
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

impl RenderOptions {
    /// Add a file to `\input{}` in the footer.
    #[must_use]
    pub fn with_include(mut self, name: impl Into<String>) -> Self {
        self.include_files.push(name.into());
        self
    }

    /// Set the section title color.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidAccentColor` if `color` is not six hex digits.
    pub fn with_accent_color(mut self, color: &str) -> Result<Self> {
        validate_accent_color(color)?;
        self.accent_color = color.to_string();
        Ok(self)
    }
}

/// Validate an accent color.
///
/// # Examples
/// ```
/// use europass_tex::config::validate_accent_color;
///
/// assert!(validate_accent_color("0e4194").is_ok());
/// assert!(validate_accent_color("#0e4194").is_err());
/// ```
pub fn validate_accent_color(color: &str) -> Result<()> {
    if ACCENT_COLOR_PATTERN.is_match(color) {
        Ok(())
    } else {
        Err(ConvertError::InvalidAccentColor(color.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accent_color_valid() {
        assert!(validate_accent_color("0e4194").is_ok());
        assert!(validate_accent_color("FFFFFF").is_ok());
        assert!(validate_accent_color("a1B2c3").is_ok());
    }

    #[test]
    fn test_validate_accent_color_invalid() {
        assert!(validate_accent_color("").is_err());
        assert!(validate_accent_color("0e419").is_err()); // 5 digits
        assert!(validate_accent_color("0e41945").is_err()); // 7 digits
        assert!(validate_accent_color("blue").is_err());
        assert!(validate_accent_color("#0e4194").is_err());
    }

    #[test]
    fn test_render_options_default() {
        let options = RenderOptions::default();
        assert!(options.include_files.is_empty());
        assert!(options.table_of_contents);
        assert_eq!(options.accent_color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_render_options_builders() {
        let options = RenderOptions::default()
            .with_include("electronics")
            .with_accent_color("336699")
            .unwrap();
        assert_eq!(options.include_files, vec!["electronics".to_string()]);
        assert_eq!(options.accent_color, "336699");

        assert!(RenderOptions::default().with_accent_color("nope").is_err());
    }

    #[test]
    fn test_substitutions_escape_before_tags() {
        // Escapes run first so the braces introduced by tag translation stay intact
        let escape_pos = LATEX_SUBSTITUTIONS
            .iter()
            .position(|(from, _)| *from == "_")
            .unwrap();
        let tag_pos = LATEX_SUBSTITUTIONS
            .iter()
            .position(|(from, _)| *from == "<strong>")
            .unwrap();
        assert!(escape_pos < tag_pos);
    }
}
