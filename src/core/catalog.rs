//! The catalog: every package record from one status-file snapshot.
//!
//! A catalog is immutable once constructed. Construction force-parses
//! every record, so a corrupt status file yields no catalog at all
//! rather than a partially-populated one. Derived indices (package-name
//! list, provides map) build lazily on first use and are memoized for
//! the catalog's lifetime.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::core::field::FieldValue;
use crate::core::header::FieldName;
use crate::core::record::PackageRecord;
use crate::parse::errors::ParseError;
use crate::parse::stanza;
use crate::util::InternedString;

/// All package records for one status-file snapshot, in file order.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<PackageRecord>,

    /// Memoized `Package:` values in file order
    names: OnceLock<Vec<InternedString>>,

    /// Memoized map from provided names to providing packages
    provides: OnceLock<HashMap<InternedString, InternedString>>,
}

impl Catalog {
    /// Parse status-file content into a catalog.
    ///
    /// Every record is materialized and validated here: any grammar
    /// error aborts the whole parse, and each stanza must carry its
    /// `Package`/`Version` identity.
    pub fn parse(content: &str) -> Result<Catalog, ParseError> {
        let records: Vec<PackageRecord> = stanza::split_stanzas(content)
            .into_iter()
            .map(PackageRecord::new)
            .collect();

        for record in &records {
            let fields = record.fields()?;

            for (identity, reason) in [
                (FieldName::Package, "stanza has no Package field"),
                (FieldName::Version, "stanza has no Version field"),
            ] {
                let present = fields
                    .get(identity)
                    .and_then(|field| field.as_scalar())
                    .is_some_and(|value| !value.is_empty());
                if !present {
                    return Err(ParseError::FieldDecode {
                        field: identity.id(),
                        reason: reason.to_string(),
                        raw: record.raw_stanza().to_string(),
                    });
                }
            }
        }

        tracing::debug!("parsed {} package stanzas", records.len());

        Ok(Catalog {
            records,
            names: OnceLock::new(),
            provides: OnceLock::new(),
        })
    }

    /// Load and parse a status file.
    pub fn load(path: &Path) -> Result<Catalog, ParseError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ParseError::io(path, source))?;
        Self::parse(&content)
    }

    /// All records in file order.
    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose `field` value equals `value` exactly, in file order.
    pub fn filter_exact(&self, field: FieldName, value: &str) -> Vec<&PackageRecord> {
        self.records
            .iter()
            .filter(|record| {
                record
                    .get(field)
                    .is_some_and(|f| f.value().text() == value)
            })
            .collect()
    }

    /// Records whose `field` text contains `needle`, in file order.
    pub fn filter_contains(&self, field: FieldName, needle: &str) -> Vec<&PackageRecord> {
        self.records
            .iter()
            .filter(|record| {
                record
                    .get(field)
                    .is_some_and(|f| f.value().text().contains(needle))
            })
            .collect()
    }

    /// All `Package:` values in file order. Built once per catalog.
    pub fn package_names(&self) -> &[InternedString] {
        self.names.get_or_init(|| {
            self.records
                .iter()
                .filter_map(PackageRecord::package_name)
                .collect()
        })
    }

    /// Map from every provided (virtual) name to the providing package's
    /// own name, alternatives flattened. Built once per catalog.
    ///
    /// When two packages provide the same name the later stanza wins and
    /// the earlier mapping is silently replaced, matching dpkg-browser
    /// behavior; the overwrite is only visible at debug level.
    pub fn provides_map(&self) -> &HashMap<InternedString, InternedString> {
        self.provides.get_or_init(|| {
            let mut map = HashMap::new();
            for record in &self.records {
                let Some(package_name) = record.package_name() else {
                    continue;
                };
                let Some(field) = record.get(FieldName::Provides) else {
                    continue;
                };
                let FieldValue::PackageVersions(entries) = field.value() else {
                    continue;
                };

                for entry in entries {
                    for provided in entry.members() {
                        if let Some(previous) = map.insert(provided.name(), package_name) {
                            if previous != package_name {
                                tracing::debug!(
                                    "virtual package `{}` reassigned from `{}` to `{}`",
                                    provided.name(),
                                    previous,
                                    package_name
                                );
                            }
                        }
                    }
                }
            }
            map
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STANZAS: &str = "Package: foo\nVersion: 1.0\nDepends: bar (>= 2.0) | baz\n\nPackage: bar\nVersion: 2.1\nProvides: libbar1\n";

    #[test]
    fn test_parse_two_stanzas() {
        let catalog = Catalog::parse(TWO_STANZAS).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_package_names_in_file_order() {
        let catalog = Catalog::parse(TWO_STANZAS).unwrap();
        let names: Vec<_> = catalog.package_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["foo", "bar"]);

        // Memoized: the second call returns the same slice.
        assert!(std::ptr::eq(catalog.package_names(), catalog.package_names()));
    }

    #[test]
    fn test_filter_exact() {
        let catalog = Catalog::parse(TWO_STANZAS).unwrap();
        let hits = catalog.filter_exact(FieldName::Package, "bar");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].package_name().unwrap().as_str(), "bar");

        assert!(catalog.filter_exact(FieldName::Package, "quux").is_empty());
    }

    #[test]
    fn test_filter_contains() {
        let catalog = Catalog::parse(TWO_STANZAS).unwrap();
        let hits = catalog.filter_contains(FieldName::Package, "ba");
        assert_eq!(hits.len(), 1);

        let hits = catalog.filter_contains(FieldName::Version, ".");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_provides_map() {
        let catalog = Catalog::parse(TWO_STANZAS).unwrap();
        let map = catalog.provides_map();
        assert_eq!(
            map.get(&InternedString::new("libbar1")).map(|n| n.as_str()),
            Some("bar")
        );
    }

    #[test]
    fn test_provides_map_flattens_alternatives() {
        let content = "Package: foo\nVersion: 1.0\nProvides: virt-a | virt-b\n";
        let catalog = Catalog::parse(content).unwrap();
        let map = catalog.provides_map();
        assert_eq!(map.get(&InternedString::new("virt-a")).map(|n| n.as_str()), Some("foo"));
        assert_eq!(map.get(&InternedString::new("virt-b")).map(|n| n.as_str()), Some("foo"));
    }

    #[test]
    fn test_provides_conflict_last_write_wins() {
        let content = "Package: one\nVersion: 1\nProvides: virt\n\nPackage: two\nVersion: 2\nProvides: virt\n";
        let catalog = Catalog::parse(content).unwrap();
        assert_eq!(
            catalog
                .provides_map()
                .get(&InternedString::new("virt"))
                .map(|n| n.as_str()),
            Some("two")
        );
    }

    #[test]
    fn test_unknown_field_aborts_whole_parse() {
        // Scenario: one bogus header anywhere yields no catalog at all.
        let content = "Package: foo\nVersion: 1.0\n\nPackage: bar\nVersion: 2.0\nBogus-Field: x\n";
        let err = Catalog::parse(content).unwrap_err();
        assert!(matches!(err, ParseError::UnknownField { .. }));
    }

    #[test]
    fn test_missing_identity_is_error() {
        let err = Catalog::parse("Version: 1.0\n").unwrap_err();
        assert!(matches!(err, ParseError::FieldDecode { field: "package", .. }));

        let err = Catalog::parse("Package: foo\n").unwrap_err();
        assert!(matches!(err, ParseError::FieldDecode { field: "version", .. }));
    }

    #[test]
    fn test_empty_catalog_queries_return_empty() {
        let catalog = Catalog::parse("").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.filter_exact(FieldName::Package, "foo").is_empty());
        assert!(catalog.package_names().is_empty());
        assert!(catalog.provides_map().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Catalog::load(&tmp.path().join("absent")).unwrap_err();
        assert!(err.is_io());
    }
}
