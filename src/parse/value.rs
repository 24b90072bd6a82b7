//! Field value grammars.
//!
//! Maps a field's raw value text onto the typed `FieldValue` variant its
//! header calls for. Grammar violations are hard errors: they abort the
//! whole snapshot parse rather than presenting partial data.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::conffile::ConffileEntry;
use crate::core::contact::Contact;
use crate::core::description::Description;
use crate::core::field::FieldValue;
use crate::core::header::{FieldKind, FieldName};
use crate::core::package_version::{PackageVersion, VersionedRef};
use crate::parse::errors::ParseError;

/// `name (constraint)` with the parenthesized part anchored at the end.
static VERSIONED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) \((.+)\)$").unwrap());

/// Minimal `local@domain` shape check; no full RFC validation.
static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s<>]+@[^@\s<>]+$").unwrap());

/// Decode a raw field value according to its header's grammar.
pub fn decode(name: FieldName, raw_value: &str) -> Result<FieldValue, ParseError> {
    match name.kind() {
        FieldKind::Scalar => Ok(FieldValue::Scalar(Some(raw_value.to_string()))),
        FieldKind::List => Ok(FieldValue::List(split_list(raw_value))),
        FieldKind::PackageVersions => {
            Ok(FieldValue::PackageVersions(decode_package_versions(name, raw_value)?))
        }
        FieldKind::Emails => Ok(FieldValue::Contacts(decode_contacts(name, raw_value)?)),
        FieldKind::Description => Ok(FieldValue::Text(Some(Description::parse(raw_value)))),
        FieldKind::Conffiles => Ok(FieldValue::Conffiles(decode_conffiles(name, raw_value)?)),
    }
}

/// Split a comma-separated list, dropping surrounding whitespace.
fn split_list(raw_value: &str) -> Vec<String> {
    if raw_value.is_empty() {
        return Vec::new();
    }
    raw_value
        .split(',')
        .map(|item| item.trim().to_string())
        .collect()
}

/// Decode a dependency-bearing list: comma-separated entries, each
/// either one target or a `|`-separated group of alternatives.
fn decode_package_versions(
    name: FieldName,
    raw_value: &str,
) -> Result<Vec<VersionedRef>, ParseError> {
    if raw_value.is_empty() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for item in raw_value.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let members = item
            .split('|')
            .map(|token| parse_package_version(name, token.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(entry) = VersionedRef::from_alternatives(members) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Parse one `name (constraint)` token; the constraint is optional and
/// captured verbatim, with no interpretation of its operator.
fn parse_package_version(name: FieldName, token: &str) -> Result<PackageVersion, ParseError> {
    if token.is_empty() {
        return Err(ParseError::FieldDecode {
            field: name.id(),
            reason: "empty dependency target".to_string(),
            raw: token.to_string(),
        });
    }

    if let Some(caps) = VERSIONED.captures(token) {
        return Ok(PackageVersion::new(&caps[1]).with_constraint(&caps[2]));
    }

    // A bare ` (` with no closing paren is a truncated constraint, not a
    // package name.
    if token.contains(" (") {
        return Err(ParseError::FieldDecode {
            field: name.id(),
            reason: "unterminated version constraint".to_string(),
            raw: token.to_string(),
        });
    }

    Ok(PackageVersion::new(token))
}

/// Decode an RFC-5322-ish mailbox list: `Display Name <addr>` or bare
/// addresses, comma-separated outside quotes and angle brackets.
fn decode_contacts(name: FieldName, raw_value: &str) -> Result<Vec<Contact>, ParseError> {
    if raw_value.is_empty() {
        return Ok(Vec::new());
    }

    split_mailboxes(raw_value)
        .into_iter()
        .filter(|piece| !piece.trim().is_empty())
        .map(|piece| parse_contact(name, piece.trim()))
        .collect()
}

/// Split on commas that sit outside double quotes and angle brackets.
fn split_mailboxes(raw_value: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_angle = false;

    for (i, ch) in raw_value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => in_angle = true,
            '>' if !in_quotes => in_angle = false,
            ',' if !in_quotes && !in_angle => {
                pieces.push(&raw_value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&raw_value[start..]);
    pieces
}

fn parse_contact(name: FieldName, piece: &str) -> Result<Contact, ParseError> {
    let bad_address = |address: &str| ParseError::FieldDecode {
        field: name.id(),
        reason: format!("`{}` does not look like an email address", address),
        raw: piece.to_string(),
    };

    let (display, address) = match piece.find('<') {
        Some(open) => {
            let close = piece.rfind('>').ok_or_else(|| ParseError::FieldDecode {
                field: name.id(),
                reason: "unterminated `<` in address".to_string(),
                raw: piece.to_string(),
            })?;
            let display = piece[..open].trim().trim_matches('"').trim();
            let address = piece[open + 1..close].trim();
            let display = if display.is_empty() {
                None
            } else {
                Some(display.to_string())
            };
            (display, address)
        }
        None => (None, piece),
    };

    // A newsgroup-style source leaves a trailing `;` on the address,
    // which would fail the shape check below.
    let address = address.trim_end_matches(';').trim();

    if !ADDRESS.is_match(address) {
        return Err(bad_address(address));
    }

    Ok(Contact::new(address, display))
}

/// Decode a `Conffiles` value: one `path hash` pair per non-empty line.
fn decode_conffiles(name: FieldName, raw_value: &str) -> Result<Vec<ConffileEntry>, ParseError> {
    let mut entries = Vec::new();
    for line in raw_value.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (path, hash) = match (parts.next(), parts.next()) {
            (Some(path), Some(hash)) => (path, hash),
            _ => {
                return Err(ParseError::FieldDecode {
                    field: name.id(),
                    reason: "expected `path hash` pair".to_string(),
                    raw: line.to_string(),
                });
            }
        };
        entries.push(ConffileEntry::new(path, hash));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depends(raw: &str) -> Vec<VersionedRef> {
        match decode(FieldName::Depends, raw).unwrap() {
            FieldValue::PackageVersions(refs) => refs,
            other => panic!("expected package versions, got {:?}", other),
        }
    }

    #[test]
    fn test_simple_dependency_with_constraint() {
        let refs = depends("libc6 (>= 2.14)");
        assert_eq!(refs.len(), 1);
        let members = refs[0].members();
        assert_eq!(members[0].name().as_str(), "libc6");
        assert_eq!(members[0].constraint(), Some(">= 2.14"));
    }

    #[test]
    fn test_alternatives_in_source_order() {
        // Scenario: `bar (>= 2.0) | baz` decodes to one alternatives
        // entry with two members in order.
        let refs = depends("bar (>= 2.0) | baz");
        assert_eq!(refs.len(), 1);
        assert!(matches!(refs[0], VersionedRef::Alternatives(_)));

        let members = refs[0].members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name().as_str(), "bar");
        assert_eq!(members[0].constraint(), Some(">= 2.0"));
        assert_eq!(members[1].name().as_str(), "baz");
        assert_eq!(members[1].constraint(), None);
    }

    #[test]
    fn test_alternative_count_matches_pipe_tokens() {
        let refs = depends("a | b | c, d");
        assert_eq!(refs[0].members().len(), 3);
        assert_eq!(refs[1].members().len(), 1);
    }

    #[test]
    fn test_unterminated_constraint_is_error() {
        let err = decode(FieldName::Depends, "libc6 (>= 2.14").unwrap_err();
        assert!(matches!(err, ParseError::FieldDecode { field: "depends", .. }));
    }

    #[test]
    fn test_enhances_splits_on_comma() {
        let value = decode(FieldName::Enhances, "gzip, bzip2 , xz-utils").unwrap();
        assert_eq!(
            value,
            FieldValue::List(vec![
                "gzip".to_string(),
                "bzip2".to_string(),
                "xz-utils".to_string()
            ])
        );
    }

    #[test]
    fn test_contact_with_display_name() {
        let value = decode(FieldName::Maintainer, "Ubuntu Developers <ubuntu-devel@lists.ubuntu.com>").unwrap();
        let FieldValue::Contacts(contacts) = value else {
            panic!("expected contacts");
        };
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].address(), "ubuntu-devel@lists.ubuntu.com");
        assert_eq!(contacts[0].display(), Some("Ubuntu Developers"));
    }

    #[test]
    fn test_contact_bare_address_and_list() {
        let value = decode(
            FieldName::Maintainer,
            "one@example.org, Two Person <two@example.org>",
        )
        .unwrap();
        let FieldValue::Contacts(contacts) = value else {
            panic!("expected contacts");
        };
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].address(), "one@example.org");
        assert_eq!(contacts[0].display(), None);
        assert_eq!(contacts[1].display(), Some("Two Person"));
    }

    #[test]
    fn test_contact_strips_trailing_semicolon() {
        let value = decode(FieldName::Maintainer, "news <list@news.example.org;>").unwrap();
        let FieldValue::Contacts(contacts) = value else {
            panic!("expected contacts");
        };
        assert_eq!(contacts[0].address(), "list@news.example.org");
    }

    #[test]
    fn test_contact_quoted_display_with_comma() {
        let value = decode(
            FieldName::Maintainer,
            "\"Packager, Deb\" <deb@example.org>",
        )
        .unwrap();
        let FieldValue::Contacts(contacts) = value else {
            panic!("expected contacts");
        };
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].display(), Some("Packager, Deb"));
    }

    #[test]
    fn test_bad_email_is_error() {
        let err = decode(FieldName::Maintainer, "not an address").unwrap_err();
        assert!(matches!(err, ParseError::FieldDecode { field: "maintainer", .. }));
    }

    #[test]
    fn test_conffiles_pairs() {
        let value = decode(
            FieldName::Conffiles,
            "/etc/foo.conf 0123abcd\n /etc/bar.conf ffee0011",
        )
        .unwrap();
        let FieldValue::Conffiles(entries) = value else {
            panic!("expected conffiles");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path(), "/etc/foo.conf");
        assert_eq!(entries[1].hash(), "ffee0011");
    }

    #[test]
    fn test_conffiles_missing_hash_is_error() {
        let err = decode(FieldName::Conffiles, "/etc/foo.conf").unwrap_err();
        assert!(matches!(err, ParseError::FieldDecode { field: "conffiles", .. }));
    }

    #[test]
    fn test_empty_values_decode_to_empty_variants() {
        assert_eq!(
            decode(FieldName::Depends, "").unwrap(),
            FieldValue::PackageVersions(Vec::new())
        );
        assert_eq!(
            decode(FieldName::Enhances, "").unwrap(),
            FieldValue::List(Vec::new())
        );
        assert_eq!(
            decode(FieldName::Maintainer, "").unwrap(),
            FieldValue::Contacts(Vec::new())
        );
    }
}
