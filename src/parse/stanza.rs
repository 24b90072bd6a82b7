//! Stanza-level parsing.
//!
//! A status file is a sequence of stanzas separated by blank lines. Within
//! a stanza, a field starts at a line with no leading whitespace; an
//! indented line continues the previous field's value (dpkg's wrapping for
//! multi-line fields such as `Description`).

use crate::core::field::Field;
use crate::core::header::FieldName;
use crate::core::record::FieldSet;
use crate::parse::errors::ParseError;
use crate::parse::value;

/// Split file content into raw stanzas.
///
/// Leading/trailing whitespace of the whole file is trimmed first, then
/// stanzas split on blank lines.
pub fn split_stanzas(content: &str) -> Vec<&str> {
    content
        .trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|stanza| !stanza.is_empty())
        .collect()
}

/// Parse one stanza into its typed field set.
pub fn parse_stanza(stanza: &str) -> Result<FieldSet, ParseError> {
    let mut fields = FieldSet::default();
    for raw_field in split_fields(stanza.trim()) {
        fields.push(parse_field(raw_field)?)?;
    }
    Ok(fields)
}

/// Split a stanza into raw field strings, keeping continuation lines
/// attached to their field.
fn split_fields(stanza: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let bytes = stanza.as_bytes();
    let mut start = 0;

    for i in 0..bytes.len() {
        if bytes[i] == b'\n' && bytes.get(i + 1) != Some(&b' ') {
            if start < i {
                groups.push(&stanza[start..i]);
            }
            start = i + 1;
        }
    }
    if start < stanza.len() {
        groups.push(&stanza[start..]);
    }
    groups
}

/// Parse one raw field string into a typed `Field`.
///
/// The `(header, value)` split happens at the first `:` that is followed
/// by whitespace or ends the line; the header must match the recognized
/// table case-sensitively.
fn parse_field(raw_field: &str) -> Result<Field, ParseError> {
    let colon = find_separator(raw_field).ok_or_else(|| ParseError::MalformedField {
        raw: raw_field.to_string(),
    })?;

    let header = raw_field[..colon].trim();
    let raw_value = raw_field[colon + 1..].trim();

    let name = FieldName::from_header(header).ok_or_else(|| ParseError::UnknownField {
        header: header.to_string(),
        raw: raw_field.to_string(),
    })?;

    let value = value::decode(name, raw_value)?;
    Ok(Field::new(raw_field, name, value))
}

/// Byte offset of the first `:` followed by whitespace or end of input.
fn find_separator(raw_field: &str) -> Option<usize> {
    let bytes = raw_field.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' {
            match bytes.get(i + 1) {
                None => return Some(i),
                Some(next) if next.is_ascii_whitespace() => return Some(i),
                Some(_) => {}
            }
        }
    }
    None
}
