//! Conversion of field text into LaTeX.
//!
//! Field text passes through two stages:
//! - `text`: entity decoding, bare-URL auto-linking and the fixed
//!   substitution table
//! - `markup`: rendering of the remaining anchor and list tags
//!
//! `format` builds dates, periods and addresses on top of both.

mod format;
mod markup;
mod text;

pub use format::{
    format_address, format_date, format_date_value, format_organisation_address, format_period,
    join_period,
};
pub use markup::{render_markup, Tag};
pub use text::{auto_link, decode_entities, prepare_literal};

use crate::error::Result;

/// Convert optional field text into a LaTeX fragment.
///
/// An absent field converts to the empty string.
///
/// # Errors
/// Returns `ConvertError::UnsupportedMarkup` if the text contains a tag
/// outside the supported subset.
///
/// # Examples
/// ```
/// use europass_tex::latex::latex_text;
///
/// assert_eq!(latex_text(None).unwrap(), "");
/// assert_eq!(
///     latex_text(Some("&lt;strong&gt;Bold&lt;/strong&gt; text")).unwrap(),
///     r"\textbf{Bold} text"
/// );
/// ```
pub fn latex_text(text: Option<&str>) -> Result<String> {
    match text {
        Some(text) => render_markup(&prepare_literal(text)),
        None => Ok(String::new()),
    }
}
