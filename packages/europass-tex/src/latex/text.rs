//! Literal text preparation: entity decoding, auto-linking and escaping.

use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;

use crate::config::{
    DELIMITER_CHARS, LATEX_SUBSTITUTIONS, LEGACY_ENTITIES, URL_SCHEMES, WHITESPACE_CHARS,
};

/// Longest entity name considered after `&`.
const MAX_ENTITY_LEN: usize = 32;

/// Characters that end an entity name.
const NAME_TERMINATORS: &str = "\t\n\x0c <&#;";

/// Prepare raw field text for tag rendering.
///
/// Decodes entities, wraps bare URLs in anchor tags, then applies the
/// fixed substitution table.
///
/// # Examples
/// ```
/// use europass_tex::latex::prepare_literal;
///
/// assert_eq!(
///     prepare_literal("R&amp;D at http://example.com"),
///     r#"R\&D at <a href="http://example.com">http://example.com</a>"#
/// );
/// ```
pub fn prepare_literal(text: &str) -> String {
    let decoded = decode_entities(text);
    let linked = auto_link(&decoded);

    LATEX_SUBSTITUTIONS
        .iter()
        .fold(linked, |acc, (from, to)| acc.replace(from, to))
}

/// Decode HTML entities and character references.
///
/// Named entities and numeric references are decoded with or without their
/// closing `;`, but a name without `;` only matches the legacy entities
/// (longest prefix wins). The null character, surrogates and out-of-range
/// code points decode to U+FFFD. Anything else is kept as written.
///
/// # Examples
/// ```
/// use europass_tex::latex::decode_entities;
///
/// assert_eq!(decode_entities("x &copy 2020 &#233;t&eacute;"), "x © 2020 été");
/// assert_eq!(decode_entities("R&D"), "R&D");
/// ```
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        match resolve_reference(tail) {
            Some((replacement, consumed)) => {
                out.push_str(&replacement);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Resolve the reference at the start of `tail`, the text after an `&`.
///
/// Returns the replacement and the number of bytes of `tail` it consumes.
fn resolve_reference(tail: &str) -> Option<(Cow<'static, str>, usize)> {
    match tail.strip_prefix('#') {
        Some(number) => {
            resolve_numeric(number).map(|(c, consumed)| (Cow::Owned(c.to_string()), consumed + 1))
        }
        None => resolve_named(tail).map(|(text, consumed)| (Cow::Borrowed(text), consumed)),
    }
}

/// Decimal (`233`) or hex (`xE9`) reference with an optional `;`.
fn resolve_numeric(number: &str) -> Option<(char, usize)> {
    let (prefix, radix) = match number.as_bytes().first() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };

    let digits = &number[prefix..];
    let len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if len == 0 {
        return None;
    }

    let decoded = u32::from_str_radix(&digits[..len], radix)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);

    let terminator = usize::from(digits[len..].starts_with(';'));
    Some((decoded, prefix + len + terminator))
}

/// Named entity: `name;` from the full table, else the longest legacy
/// entity that prefixes the name.
fn resolve_named(tail: &str) -> Option<(&'static str, usize)> {
    let name_len = tail
        .char_indices()
        .take_while(|&(_, c)| !NAME_TERMINATORS.contains(c))
        .take(MAX_ENTITY_LEN)
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    let name = &tail[..name_len];
    if name.is_empty() {
        return None;
    }

    if tail[name_len..].starts_with(';') {
        if let Some(text) = resolve_html5_entity(name) {
            return Some((text, name_len + 1));
        }
    }

    LEGACY_ENTITIES
        .iter()
        .filter(|legacy| name.starts_with(**legacy))
        .max_by_key(|legacy| legacy.len())
        .and_then(|legacy| resolve_html5_entity(legacy).map(|text| (text, legacy.len())))
}

/// Wrap bare URLs in `<a href="URL">URL</a>`.
///
/// A URL directly preceded by a delimiter character (quote, bracket, brace,
/// angle bracket) is considered already marked up and left alone. Only the
/// single preceding character is inspected.
pub fn auto_link(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        let rest = &text[pos..];

        if URL_SCHEMES.iter().any(|scheme| rest.starts_with(scheme))
            && previous.map_or(true, |p| !DELIMITER_CHARS.contains(p))
        {
            let end = rest
                .find(|ch: char| WHITESPACE_CHARS.contains(ch) || DELIMITER_CHARS.contains(ch))
                .unwrap_or(rest.len());
            let url = &rest[..end];
            out.push_str(&format!(r#"<a href="{url}">{url}</a>"#));
            previous = url.chars().last();
            pos += end;
        } else {
            out.push(c);
            previous = Some(c);
            pos += c.len_utf8();
        }
    }

    out
}
