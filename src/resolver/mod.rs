//! Reverse-dependency resolution over a catalog.
//!
//! Answers "who depends on package X" by scanning every record's
//! `Depends` and `Pre-Depends` lists with alternatives flattened.
//! Matching is on package name only; version constraints are stored
//! verbatim and never compared. The scan is O(records × list length),
//! so results are memoized per package name for the catalog's lifetime
//! (catalogs are immutable, so entries never go stale).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::field::FieldValue;
use crate::core::header::FieldName;
use crate::core::record::PackageRecord;
use crate::core::Catalog;
use crate::util::InternedString;

/// Dependency fields that establish a reverse edge.
const DEPENDENCY_FIELDS: [FieldName; 2] = [FieldName::Depends, FieldName::PreDepends];

/// Reverse-dependency index over one immutable catalog.
#[derive(Debug)]
pub struct DependencyResolver {
    catalog: Arc<Catalog>,

    /// Memoized dependents by target name, as record indices in file order
    dependents: RwLock<HashMap<InternedString, Arc<Vec<usize>>>>,
}

impl DependencyResolver {
    /// Create a resolver over a catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        DependencyResolver {
            catalog,
            dependents: RwLock::new(HashMap::new()),
        }
    }

    /// The catalog this resolver indexes.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Every record that lists `record`'s package name in `Depends` or
    /// `Pre-Depends` (alternatives flattened), in catalog file order.
    pub fn dependents_of(&self, record: &PackageRecord) -> Vec<&PackageRecord> {
        let Some(target) = record.package_name() else {
            return Vec::new();
        };
        self.dependents_of_name(target)
    }

    /// `dependents_of` addressed by package name.
    pub fn dependents_of_name(&self, target: InternedString) -> Vec<&PackageRecord> {
        let indices = self.dependent_indices(target);
        let records = self.catalog.records();
        indices.iter().map(|&i| &records[i]).collect()
    }

    /// True when `name` leads somewhere in this catalog: either a real
    /// package or a virtual name some package provides. The presentation
    /// layer uses this to flag dependency links as navigable.
    pub fn viewable(&self, name: &str) -> bool {
        let name = InternedString::new(name);
        self.catalog.package_names().contains(&name)
            || self.catalog.provides_map().contains_key(&name)
    }

    fn dependent_indices(&self, target: InternedString) -> Arc<Vec<usize>> {
        {
            let memo = self.dependents.read().unwrap();
            if let Some(indices) = memo.get(&target) {
                return Arc::clone(indices);
            }
        }

        let computed: Vec<usize> = self
            .catalog
            .records()
            .iter()
            .enumerate()
            .filter(|(_, other)| Self::depends_on(other, target))
            .map(|(i, _)| i)
            .collect();

        let computed = Arc::new(computed);
        let mut memo = self.dependents.write().unwrap();
        // A concurrent scan for the same name may have finished first;
        // both computed the same answer over the immutable catalog.
        Arc::clone(memo.entry(target).or_insert(computed))
    }

    /// Whether `record` lists `target` in any dependency field.
    fn depends_on(record: &PackageRecord, target: InternedString) -> bool {
        DEPENDENCY_FIELDS.iter().any(|&field_name| {
            let Some(field) = record.get(field_name) else {
                return false;
            };
            let FieldValue::PackageVersions(entries) = field.value() else {
                return false;
            };
            entries.iter().any(|entry| entry.names_package(target))
        })
    }
}
