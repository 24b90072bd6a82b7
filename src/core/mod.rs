//! Core data structures for debquery.
//!
//! This module contains the typed model of a status-file snapshot:
//! - The closed header table (FieldName) and typed fields
//! - Dependency targets, contacts, descriptions, conffiles
//! - Package records and the immutable catalog

pub mod catalog;
pub mod conffile;
pub mod contact;
pub mod description;
pub mod field;
pub mod header;
pub mod package_version;
pub mod record;

pub use catalog::Catalog;
pub use conffile::ConffileEntry;
pub use contact::Contact;
pub use description::Description;
pub use field::{Field, FieldValue};
pub use header::{FieldKind, FieldName};
pub use package_version::{PackageVersion, VersionedRef};
pub use record::{FieldSet, PackageRecord, RecordView};
