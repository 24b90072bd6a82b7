//! High-level query operations over a snapshot.
//!
//! These are the operations the presentation layer (CLI here, an HTTP
//! front elsewhere) calls. "Not found" and "ambiguous" are ordinary
//! result values for the caller to render, never errors.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::cache::Snapshot;
use crate::core::field::FieldValue;
use crate::core::header::FieldName;
use crate::core::package_version::{PackageVersion, VersionedRef};
use crate::core::record::PackageRecord;
use crate::util::{Config, InternedString};

/// Alphabetical index of package names to description summaries.
pub fn package_index(snapshot: &Snapshot) -> Result<BTreeMap<String, String>> {
    let mut index = BTreeMap::new();
    for record in snapshot.catalog().records() {
        let name = record
            .field(FieldName::Package)
            .context("reading package name")?;
        let description = record
            .field(FieldName::Description)
            .context("reading description")?;

        let summary = match description.value() {
            FieldValue::Text(Some(desc)) => desc.summary().to_string(),
            _ => String::new(),
        };
        index.insert(name.value().text().into_owned(), summary);
    }
    Ok(index)
}

/// Result of a single-package lookup.
#[derive(Debug)]
pub enum DetailOutcome {
    /// No record matches the requested name, directly or via provides
    NotFound,
    /// More than one record matches the resolved name
    Ambiguous,
    Found(Box<PackageDetail>),
}

/// One package's queryable detail.
#[derive(Debug, Serialize)]
pub struct PackageDetail {
    /// The name the caller asked for
    pub requested: String,

    /// The name that answered; differs when a virtual name was
    /// resolved through the provides map
    pub actual: String,

    /// Projected fields keyed by canonical id; dependency fields carry
    /// per-target `viewable` flags
    pub fields: Map<String, Value>,

    /// Names of packages that depend on this one, in file order
    pub dependants: Vec<String>,
}

/// Look up one package by name, falling back through the provides map
/// for virtual names. Projects the result onto `config.return_fields`.
pub fn package_detail(snapshot: &Snapshot, config: &Config, name: &str) -> Result<DetailOutcome> {
    let catalog = snapshot.catalog();

    let mut actual = name.to_string();
    let mut matches = catalog.filter_exact(FieldName::Package, name);

    if matches.is_empty() {
        if let Some(provider) = catalog.provides_map().get(&InternedString::new(name)) {
            actual = provider.as_str().to_string();
            matches = catalog.filter_exact(FieldName::Package, provider.as_str());
        }
    }

    let record = match matches.len() {
        0 => return Ok(DetailOutcome::NotFound),
        1 => matches[0],
        _ => return Ok(DetailOutcome::Ambiguous),
    };

    let fields = project_fields(snapshot, record, &config.return_fields)?;

    let dependants = snapshot
        .resolver()
        .dependents_of(record)
        .iter()
        .filter_map(|dependent| dependent.package_name())
        .map(|dependent| dependent.as_str().to_string())
        .collect();

    Ok(DetailOutcome::Found(Box::new(PackageDetail {
        requested: name.to_string(),
        actual,
        fields,
        dependants,
    })))
}

/// Project a record onto the configured field ids, encoding dependency
/// fields with per-target `viewable` flags.
fn project_fields(
    snapshot: &Snapshot,
    record: &PackageRecord,
    field_ids: &[String],
) -> Result<Map<String, Value>> {
    let mut names = Vec::new();
    for id in field_ids {
        match FieldName::from_id(id) {
            Some(name) => names.push(name),
            None => tracing::warn!("ignoring unknown field id `{}` in return_fields", id),
        }
    }

    let view = record
        .select_fields(&names)
        .context("projecting record fields")?;

    let mut fields = Map::new();
    for field in view.iter() {
        let value = match (field.name(), field.value()) {
            (FieldName::Depends | FieldName::PreDepends, FieldValue::PackageVersions(entries)) => {
                encode_dependency_entries(snapshot, entries)
            }
            (_, value) => serde_json::to_value(value).context("encoding field value")?,
        };
        fields.insert(field.name().id().to_string(), value);
    }
    Ok(fields)
}

/// Encode dependency entries with navigability flags: a target is
/// viewable when it names a real package or a provided virtual name.
fn encode_dependency_entries(snapshot: &Snapshot, entries: &[VersionedRef]) -> Value {
    let encode_target = |pv: &PackageVersion| {
        json!({
            "packageName": pv.name().as_str(),
            "version": pv.constraint(),
            "viewable": snapshot.resolver().viewable(pv.name().as_str()),
        })
    };

    Value::Array(
        entries
            .iter()
            .map(|entry| match entry {
                VersionedRef::Simple(pv) => encode_target(pv),
                VersionedRef::Alternatives(alts) => {
                    Value::Array(alts.iter().map(encode_target).collect())
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SnapshotCache;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    const STATUS: &str = "\
Package: foo\nVersion: 1.0\nDepends: bar (>= 2.0) | virt-name, missing-pkg\nDescription: The foo tool\n Does foo things.\n\n\
Package: bar\nVersion: 2.1\nProvides: virt-name\nDescription: A bar library\n";

    fn snapshot(content: &str) -> (TempDir, Arc<Snapshot>) {
        let tmp = TempDir::new().unwrap();
        let path: PathBuf = tmp.path().join("status");
        std::fs::write(&path, content).unwrap();
        let snapshot = SnapshotCache::new().get_or_build(&path).unwrap();
        (tmp, snapshot)
    }

    #[test]
    fn test_package_index_sorted_with_summaries() {
        let (_tmp, snapshot) = snapshot(STATUS);
        let index = package_index(&snapshot).unwrap();

        let names: Vec<_> = index.keys().cloned().collect();
        assert_eq!(names, ["bar", "foo"]);
        assert_eq!(index["foo"], "The foo tool");
    }

    #[test]
    fn test_detail_found() {
        let (_tmp, snapshot) = snapshot(STATUS);
        let config = Config::default();

        let DetailOutcome::Found(detail) = package_detail(&snapshot, &config, "foo").unwrap()
        else {
            panic!("expected a match");
        };

        assert_eq!(detail.requested, "foo");
        assert_eq!(detail.actual, "foo");
        assert!(detail.fields.contains_key("package"));
        assert!(detail.fields.contains_key("description"));
        assert!(detail.dependants.is_empty());
    }

    #[test]
    fn test_detail_resolves_virtual_name() {
        let (_tmp, snapshot) = snapshot(STATUS);
        let config = Config::default();

        let DetailOutcome::Found(detail) =
            package_detail(&snapshot, &config, "virt-name").unwrap()
        else {
            panic!("expected provides fallback");
        };

        assert_eq!(detail.requested, "virt-name");
        assert_eq!(detail.actual, "bar");
        assert_eq!(detail.dependants, ["foo"]);
    }

    #[test]
    fn test_detail_not_found() {
        let (_tmp, snapshot) = snapshot(STATUS);
        let config = Config::default();
        assert!(matches!(
            package_detail(&snapshot, &config, "nope").unwrap(),
            DetailOutcome::NotFound
        ));
    }

    #[test]
    fn test_detail_ambiguous() {
        let content = "Package: dup\nVersion: 1\n\nPackage: dup\nVersion: 2\n";
        let (_tmp, snapshot) = snapshot(content);
        let config = Config::default();
        assert!(matches!(
            package_detail(&snapshot, &config, "dup").unwrap(),
            DetailOutcome::Ambiguous
        ));
    }

    #[test]
    fn test_dependency_viewable_annotation() {
        let (_tmp, snapshot) = snapshot(STATUS);
        let config = Config::default();

        let DetailOutcome::Found(detail) = package_detail(&snapshot, &config, "foo").unwrap()
        else {
            panic!("expected a match");
        };

        let depends = detail.fields["depends"].as_array().unwrap();
        // First entry is the alternatives group bar | virt-name.
        let alternatives = depends[0].as_array().unwrap();
        assert_eq!(alternatives[0]["packageName"], "bar");
        assert_eq!(alternatives[0]["viewable"], true);
        assert_eq!(alternatives[0]["version"], ">= 2.0");
        assert_eq!(alternatives[1]["packageName"], "virt-name");
        assert_eq!(alternatives[1]["viewable"], true);

        // Second entry names a package that is not installed at all.
        assert_eq!(depends[1]["packageName"], "missing-pkg");
        assert_eq!(depends[1]["viewable"], false);
    }

    #[test]
    fn test_unknown_return_field_ignored() {
        let (_tmp, snapshot) = snapshot(STATUS);
        let config = Config {
            return_fields: vec!["package".to_string(), "notAField".to_string()],
            ..Config::default()
        };

        let DetailOutcome::Found(detail) = package_detail(&snapshot, &config, "bar").unwrap()
        else {
            panic!("expected a match");
        };
        assert_eq!(detail.fields.len(), 1);
        assert!(detail.fields.contains_key("package"));
    }
}
