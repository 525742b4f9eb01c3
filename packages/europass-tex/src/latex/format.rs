//! Date, period and address formatting.

use super::latex_text;
use crate::config::PERIOD_SEPARATOR;
use crate::error::{ConvertError, OptionalField, Result};
use crate::tree::{find_key, lookup_attribute, Attribute, Entry, Scope, Value};

/// Render a date's attributes as `year`, `year/month` or `year/month/day`.
///
/// Dashes are stripped from each part, so Europass `--06` months and
/// `---15` days come out as plain numbers. A day is only used together
/// with a month.
///
/// # Examples
/// ```
/// use europass_tex::latex::format_date;
///
/// let attributes = vec![
///     ("year".to_string(), "2020".to_string()),
///     ("month".to_string(), "--06".to_string()),
/// ];
/// assert_eq!(format_date(&attributes), "2020/06");
/// ```
pub fn format_date(attributes: &[Attribute]) -> String {
    let part = |name: &str| lookup_attribute(attributes, name).map(|v| v.replace('-', ""));

    let mut date = part("year").unwrap_or_default();
    if let Some(month) = part("month") {
        date.push('/');
        date.push_str(&month);
        if let Some(day) = part("day") {
            date.push('/');
            date.push_str(&day);
        }
    }
    date
}

/// Render a date element's value.
///
/// # Errors
/// Returns `ConvertError::StructuralMismatch` unless the first entry of the
/// value is the element's attribute entry.
pub fn format_date_value(value: Value<'_>) -> Result<String> {
    match value.entries()?.first() {
        Some(Entry::Attributes(attributes)) => Ok(format_date(attributes)),
        _ => Err(ConvertError::StructuralMismatch(
            "date element must start with its attributes".to_string(),
        )),
    }
}

/// Join the two sides of a period.
///
/// # Examples
/// ```
/// use europass_tex::latex::join_period;
///
/// assert_eq!(join_period("2018/01", "2020/03"), "2018/01 -- 2020/03");
/// assert_eq!(join_period("2018/01", ""), "2018/01");
/// assert_eq!(join_period("", ""), "");
/// ```
pub fn join_period(from: &str, to: &str) -> String {
    match (from.is_empty(), to.is_empty()) {
        (false, false) => format!("{from}{PERIOD_SEPARATOR}{to}"),
        (false, true) => from.to_string(),
        (true, false) => to.to_string(),
        (true, true) => String::new(),
    }
}

/// Render a `Period` value holding optional `From` and `To` dates.
pub fn format_period(period: Value<'_>) -> Result<String> {
    let side = |key: &str| -> Result<String> {
        find_key(period.entries()?, key)
            .optional()?
            .map(format_date_value)
            .transpose()
            .map(Option::unwrap_or_default)
    };

    Ok(join_period(&side("From")?, &side("To")?))
}

/// Render an address suffix from an optional locality and label.
///
/// # Examples
/// ```
/// use europass_tex::latex::format_address;
///
/// assert_eq!(format_address("Ghent", "Belgium"), ", Ghent, (Belgium)");
/// assert_eq!(format_address("", "Belgium"), ", (Belgium)");
/// assert_eq!(format_address("", ""), "");
/// ```
pub fn format_address(locality: &str, label: &str) -> String {
    if !locality.is_empty() {
        format!(", {locality}, ({label})")
    } else if !label.is_empty() {
        format!(", ({label})")
    } else {
        String::new()
    }
}

/// Render the address suffix of an employer or organisation value.
///
/// `Municipality` and `Label` are both optional.
pub fn format_organisation_address(organisation: Value<'_>) -> Result<String> {
    let municipality = latex_text(organisation.text("Municipality").optional()?)?;
    let label = latex_text(organisation.text("Label").optional()?)?;
    Ok(format_address(&municipality, &label))
}
