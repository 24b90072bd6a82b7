//! Dependency targets: package names with optional version constraints.
//!
//! A dependency list item is either a single `name (constraint)` target
//! or a `|`-separated group of alternatives, any one of which satisfies
//! the dependency. Constraints are captured verbatim; no version
//! comparison is ever performed on them.

use std::fmt;

use serde::Serialize;

use crate::util::InternedString;

/// One `name (constraint)` dependency target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageVersion {
    /// Target package name
    #[serde(rename = "packageName")]
    name: InternedString,

    /// Raw constraint text, e.g. `>= 2.0`, without the parentheses
    #[serde(rename = "version")]
    constraint: Option<String>,
}

impl PackageVersion {
    /// Create a target with no version constraint.
    pub fn new(name: impl Into<InternedString>) -> Self {
        PackageVersion {
            name: name.into(),
            constraint: None,
        }
    }

    /// Attach a verbatim constraint string.
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// Get the target package name.
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// Get the raw constraint text, if any.
    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref constraint) = self.constraint {
            write!(f, " ({})", constraint)?;
        }
        Ok(())
    }
}

/// A dependency list entry: one target, or an ordered group of
/// alternatives.
///
/// An `Alternatives` value always has at least two members; a
/// single-member group collapses to `Simple` on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VersionedRef {
    Simple(PackageVersion),
    Alternatives(Vec<PackageVersion>),
}

impl VersionedRef {
    /// Build an entry from a parsed alternative group, collapsing
    /// single-member groups to `Simple`.
    ///
    /// Returns `None` for an empty group.
    pub fn from_alternatives(mut members: Vec<PackageVersion>) -> Option<VersionedRef> {
        match members.len() {
            0 => None,
            1 => Some(VersionedRef::Simple(members.remove(0))),
            _ => Some(VersionedRef::Alternatives(members)),
        }
    }

    /// All targets in this entry, alternatives flattened.
    pub fn members(&self) -> &[PackageVersion] {
        match self {
            VersionedRef::Simple(pv) => std::slice::from_ref(pv),
            VersionedRef::Alternatives(alts) => alts,
        }
    }

    /// Whether any target in this entry names `name`.
    pub fn names_package(&self, name: InternedString) -> bool {
        self.members().iter().any(|pv| pv.name() == name)
    }
}

impl fmt::Display for VersionedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for member in self.members() {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{}", member)?;
            first = false;
        }
        Ok(())
    }
}
