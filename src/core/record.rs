//! Package records.
//!
//! A `PackageRecord` wraps one raw stanza and materializes its typed
//! field set on first access, memoizing it for the record's lifetime.
//! Records constructed through `Catalog::parse` are guaranteed to be
//! materialized (the catalog forces every record while validating the
//! snapshot), so borrowed accessors never miss there.

use std::sync::OnceLock;

use crate::core::field::{Field, FieldValue};
use crate::core::header::FieldName;
use crate::parse::errors::ParseError;
use crate::parse::stanza;
use crate::util::InternedString;

/// The typed fields of one stanza, in file order with unique keys.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// Append a field, rejecting duplicate headers within one stanza.
    pub fn push(&mut self, field: Field) -> Result<(), ParseError> {
        if self.get(field.name()).is_some() {
            return Err(ParseError::FieldDecode {
                field: field.name().id(),
                reason: "field appears twice in one stanza".to_string(),
                raw: field.raw().to_string(),
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Look up a stored field by name.
    pub fn get(&self, name: FieldName) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Iterate fields in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One package's stanza, typed lazily.
#[derive(Debug)]
pub struct PackageRecord {
    /// The stanza exactly as it appeared in the status file
    raw_stanza: String,

    /// Memoized typed fields, parsed on first access
    fields: OnceLock<FieldSet>,
}

impl PackageRecord {
    /// Wrap a raw stanza without parsing it.
    pub fn new(raw_stanza: impl Into<String>) -> Self {
        PackageRecord {
            raw_stanza: raw_stanza.into(),
            fields: OnceLock::new(),
        }
    }

    /// The stanza exactly as it appeared in the source file.
    pub fn raw_stanza(&self) -> &str {
        &self.raw_stanza
    }

    /// The typed field set, parsing and memoizing it on first call.
    pub fn fields(&self) -> Result<&FieldSet, ParseError> {
        if let Some(fields) = self.fields.get() {
            return Ok(fields);
        }
        let parsed = stanza::parse_stanza(&self.raw_stanza)?;
        // A concurrent first access may have won the race; either value
        // came from the same raw stanza.
        Ok(self.fields.get_or_init(|| parsed))
    }

    /// Borrowed access to a stored field.
    ///
    /// Returns `None` when the field is absent from the stanza, or when
    /// the record has not been materialized yet (records inside a built
    /// `Catalog` always are).
    pub fn get(&self, name: FieldName) -> Option<&Field> {
        self.fields.get()?.get(name)
    }

    /// Typed field access, synthesizing an empty field of the correct
    /// variant when the header is absent from the stanza.
    ///
    /// Synthesized fields are never inserted into the record's storage.
    pub fn field(&self, name: FieldName) -> Result<Field, ParseError> {
        Ok(self
            .fields()?
            .get(name)
            .cloned()
            .unwrap_or_else(|| Field::absent(name)))
    }

    /// The record's package name, interned.
    pub fn package_name(&self) -> Option<InternedString> {
        match self.get(FieldName::Package)?.value() {
            FieldValue::Scalar(Some(name)) if !name.is_empty() => {
                Some(InternedString::new(name))
            }
            _ => None,
        }
    }

    /// A reduced view holding only the requested fields, in request
    /// order, with absent fields synthesized.
    ///
    /// The view is a separate value over the same field data; requesting
    /// different projections of one record never interferes.
    pub fn select_fields(&self, names: &[FieldName]) -> Result<RecordView, ParseError> {
        let fields = names
            .iter()
            .map(|&name| self.field(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecordView { fields })
    }
}

impl Clone for PackageRecord {
    fn clone(&self) -> Self {
        let fields = OnceLock::new();
        if let Some(parsed) = self.fields.get() {
            // The clone starts out materialized when the original was.
            let _ = fields.set(parsed.clone());
        }
        PackageRecord {
            raw_stanza: self.raw_stanza.clone(),
            fields,
        }
    }
}

/// A non-destructive projection of a record onto a subset of fields.
#[derive(Debug, Clone)]
pub struct RecordView {
    fields: Vec<Field>,
}

impl RecordView {
    /// Iterate the projected fields in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Look up a projected field by name.
    pub fn get(&self, name: FieldName) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Number of projected fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the projection is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANZA: &str = "Package: foo\nVersion: 1.0\nDepends: bar (>= 2.0) | baz\nDescription: A tool\n Longer text.";

    #[test]
    fn test_lazy_parse_and_memoization() {
        let record = PackageRecord::new(STANZA);
        assert!(record.get(FieldName::Package).is_none());

        let fields = record.fields().unwrap();
        assert_eq!(fields.len(), 4);

        // Second access returns the memoized set.
        let again = record.fields().unwrap();
        assert!(std::ptr::eq(fields, again));
        assert!(record.get(FieldName::Package).is_some());
    }

    #[test]
    fn test_package_field_round_trips() {
        let record = PackageRecord::new(STANZA);
        let field = record.field(FieldName::Package).unwrap();
        assert_eq!(field.as_scalar(), Some("foo"));
        assert_eq!(record.package_name().unwrap().as_str(), "foo");
    }

    #[test]
    fn test_absent_field_synthesized_not_stored() {
        let record = PackageRecord::new(STANZA);
        let field = record.field(FieldName::Provides).unwrap();
        assert!(field.value().is_empty());

        // Synthesis must not grow the stored field set.
        assert_eq!(record.fields().unwrap().len(), 4);
        assert!(record.get(FieldName::Provides).is_none());
    }

    #[test]
    fn test_select_fields_is_pure_projection() {
        let record = PackageRecord::new(STANZA);

        let slim = record
            .select_fields(&[FieldName::Package, FieldName::Depends])
            .unwrap();
        assert_eq!(slim.len(), 2);

        // A second, different projection of the same record sees the
        // full field data, not the previous projection.
        let other = record
            .select_fields(&[FieldName::Package, FieldName::Version, FieldName::Description])
            .unwrap();
        assert_eq!(other.len(), 3);
        assert!(other.get(FieldName::Version).is_some());

        // And the record itself is untouched.
        assert_eq!(record.fields().unwrap().len(), 4);
    }

    #[test]
    fn test_select_fields_synthesizes_missing() {
        let record = PackageRecord::new("Package: foo\nVersion: 1.0");
        let view = record
            .select_fields(&[FieldName::Package, FieldName::Depends])
            .unwrap();
        let depends = view.get(FieldName::Depends).unwrap();
        assert!(depends.value().is_empty());
    }

    #[test]
    fn test_corrupt_stanza_surfaces_error() {
        let record = PackageRecord::new("Package: foo\nBogus-Field: x");
        assert!(record.fields().is_err());
        assert!(record.field(FieldName::Package).is_err());
    }

    #[test]
    fn test_raw_stanza_kept_verbatim() {
        let record = PackageRecord::new(STANZA);
        record.fields().unwrap();
        assert_eq!(record.raw_stanza(), STANZA);
    }
}
