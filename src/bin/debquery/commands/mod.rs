//! Command implementations.

pub mod check;
pub mod completions;
pub mod dependents;
pub mod list;
pub mod provides;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use debquery::util::diagnostic;
use debquery::{Config, Snapshot, SnapshotCache};

use crate::cli::GlobalArgs;

/// Resolve the effective configuration and status-file path.
pub(crate) fn load_config(globals: &GlobalArgs) -> (Config, PathBuf) {
    let config = Config::load_or_default(globals.config.as_deref());
    let status_path = globals
        .status_file
        .clone()
        .unwrap_or_else(|| config.status_path.clone());
    (config, status_path)
}

/// Load the current snapshot, rendering parse failures as diagnostics.
pub(crate) fn load_snapshot(
    cache: &SnapshotCache,
    status_path: &std::path::Path,
    color: bool,
) -> Result<Arc<Snapshot>> {
    cache.get_or_build(status_path).map_err(|err| {
        diagnostic::emit(&err.to_diagnostic(), color);
        anyhow::anyhow!("failed to load status file")
    })
}
