//! Debquery - a dpkg status-file parser and package dependency query
//! engine.
//!
//! This crate ingests the dpkg `status` control-file database, decomposes
//! each package stanza into typed fields, resolves cross-package
//! relationships (dependencies, virtual-package provision, alternative
//! satisfaction), and answers reverse-dependency queries. Parsed
//! snapshots are cached keyed on a content hash of the source file.

pub mod cache;
pub mod core;
pub mod ops;
pub mod parse;
pub mod resolver;
pub mod util;

pub use crate::core::{Catalog, Field, FieldName, FieldValue, PackageRecord, RecordView};
pub use cache::{Snapshot, SnapshotCache};
pub use parse::ParseError;
pub use resolver::DependencyResolver;
pub use util::{Config, InternedString};
