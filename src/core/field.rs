//! Typed fields.
//!
//! A `Field` pairs one recognized header with its decoded value while
//! retaining the raw source text verbatim, so records can always be
//! re-serialized or inspected exactly as they appeared on disk.

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::Serialize;

use crate::core::conffile::ConffileEntry;
use crate::core::contact::Contact;
use crate::core::description::Description;
use crate::core::header::{FieldKind, FieldName};
use crate::core::package_version::VersionedRef;

/// The decoded value of a field, one variant per decode rule.
///
/// Serialization mirrors the shapes the read API exposes: scalars as
/// strings, lists as arrays, descriptions as `{summary, verbose}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(Option<String>),
    List(Vec<String>),
    PackageVersions(Vec<VersionedRef>),
    Contacts(Vec<Contact>),
    Text(Option<Description>),
    Conffiles(Vec<ConffileEntry>),
}

impl FieldValue {
    /// The empty value of the right variant for a field that is absent
    /// from its stanza.
    pub fn empty(kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::Scalar => FieldValue::Scalar(None),
            FieldKind::List => FieldValue::List(Vec::new()),
            FieldKind::PackageVersions => FieldValue::PackageVersions(Vec::new()),
            FieldKind::Emails => FieldValue::Contacts(Vec::new()),
            FieldKind::Description => FieldValue::Text(None),
            FieldKind::Conffiles => FieldValue::Conffiles(Vec::new()),
        }
    }

    /// Whether this is the empty/absent value for its variant.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(v) => v.is_none(),
            FieldValue::List(v) => v.is_empty(),
            FieldValue::PackageVersions(v) => v.is_empty(),
            FieldValue::Contacts(v) => v.is_empty(),
            FieldValue::Text(v) => v.is_none(),
            FieldValue::Conffiles(v) => v.is_empty(),
        }
    }

    /// A flat string rendition used for exact and substring filtering.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Scalar(Some(s)) => Cow::Borrowed(s),
            FieldValue::Scalar(None) => Cow::Borrowed(""),
            FieldValue::List(items) => Cow::Owned(items.join(", ")),
            FieldValue::PackageVersions(refs) => {
                let mut out = String::new();
                for (i, entry) in refs.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}", entry);
                }
                Cow::Owned(out)
            }
            FieldValue::Contacts(contacts) => {
                let mut out = String::new();
                for (i, contact) in contacts.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    match contact.display() {
                        Some(display) => {
                            let _ = write!(out, "{} <{}>", display, contact.address());
                        }
                        None => out.push_str(contact.address()),
                    }
                }
                Cow::Owned(out)
            }
            FieldValue::Text(Some(desc)) => {
                if desc.body().is_empty() {
                    Cow::Borrowed(desc.summary())
                } else {
                    Cow::Owned(format!("{}\n{}", desc.summary(), desc.body()))
                }
            }
            FieldValue::Text(None) => Cow::Borrowed(""),
            FieldValue::Conffiles(entries) => {
                let mut out = String::new();
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    let _ = write!(out, "{} {}", entry.path(), entry.hash());
                }
                Cow::Owned(out)
            }
        }
    }
}

/// One field of a package record: header, raw text, decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The raw field text as it appeared in the stanza, header included
    raw: String,

    /// Which recognized header this is
    name: FieldName,

    /// The decoded value
    value: FieldValue,
}

impl Field {
    /// Create a field from its raw text and decoded value.
    pub fn new(raw: impl Into<String>, name: FieldName, value: FieldValue) -> Self {
        Field {
            raw: raw.into(),
            name,
            value,
        }
    }

    /// Synthesize the field for a header absent from its stanza.
    ///
    /// The value is the empty form of the correct variant; synthesized
    /// fields are returned to callers but never stored on the record.
    pub fn absent(name: FieldName) -> Self {
        Field {
            raw: format!("{}: ", name.header()),
            name,
            value: FieldValue::empty(name.kind()),
        }
    }

    /// The raw source text, header included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The field's name.
    pub fn name(&self) -> FieldName {
        self.name
    }

    /// The decoded value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The scalar string, for scalar-kind fields; `None` otherwise.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Scalar(Some(s)) => Some(s),
            _ => None,
        }
    }
}
