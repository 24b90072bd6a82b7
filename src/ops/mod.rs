//! High-level operations exposed to presentation layers.

pub mod query;

pub use query::{package_detail, package_index, DetailOutcome, PackageDetail};
