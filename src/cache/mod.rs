//! Snapshot caching keyed on content hashes.
//!
//! Parsing a multi-megabyte status file on every query would dominate
//! request latency, so parsed catalogs are memoized per source path and
//! invalidated wholesale when the file's SHA-256 changes. The cache is a
//! plain value constructed by whoever wires up the query layer; there is
//! no process-wide instance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::core::Catalog;
use crate::parse::errors::ParseError;
use crate::resolver::DependencyResolver;
use crate::util::hash;

/// One immutable, fully-parsed snapshot of a status file.
///
/// Bundles the catalog with a resolver over it so dependents memos
/// survive for as long as the snapshot is cached.
#[derive(Debug)]
pub struct Snapshot {
    hash: String,
    catalog: Arc<Catalog>,
    resolver: DependencyResolver,
}

impl Snapshot {
    fn new(hash: String, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let resolver = DependencyResolver::new(Arc::clone(&catalog));
        Snapshot {
            hash,
            catalog,
            resolver,
        }
    }

    /// Content hash of the source bytes this snapshot was parsed from.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The parsed catalog.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The resolver bound to this snapshot's catalog.
    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }
}

/// Per-path cache slot. The slot mutex serializes the
/// hash-check-and-maybe-rebuild sequence for one path, so a hash change
/// triggers exactly one rebuild no matter how many readers race in;
/// late readers block on the mutex and find the fresh entry.
#[derive(Default)]
struct PathState {
    slot: Mutex<Option<Arc<Snapshot>>>,
}

/// Content-hash keyed cache of parsed snapshots.
pub struct SnapshotCache {
    states: Mutex<HashMap<PathBuf, Arc<PathState>>>,
}

impl SnapshotCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        SnapshotCache {
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached snapshot for `path`, rebuilding if the file's
    /// content hash changed.
    ///
    /// When the file cannot be read and a previously valid snapshot is
    /// cached, that snapshot is returned stale rather than failing the
    /// query; without one, the I/O error propagates. A *parse* error
    /// always propagates and leaves any prior entry in place.
    pub fn get_or_build(&self, path: &Path) -> Result<Arc<Snapshot>, ParseError> {
        self.get_or_build_with(
            path,
            |path| hash::sha256_file(path).map_err(|source| ParseError::io(path, source)),
            Catalog::load,
        )
    }

    /// `get_or_build` with injectable hash and build functions.
    ///
    /// Tests use this to count parses and to simulate hash/build
    /// failures without touching the filesystem policy.
    pub fn get_or_build_with<H, B>(
        &self,
        path: &Path,
        hash_fn: H,
        build_fn: B,
    ) -> Result<Arc<Snapshot>, ParseError>
    where
        H: FnOnce(&Path) -> Result<String, ParseError>,
        B: FnOnce(&Path) -> Result<Catalog, ParseError>,
    {
        let state = self.state_for(path);

        // Serializes rebuilds for this path; concurrent readers block
        // here and then see the entry the winner stored.
        let mut slot = state.slot.lock().unwrap();

        let current_hash = match hash_fn(path) {
            Ok(hash) => hash,
            Err(err) if err.is_io() => {
                if let Some(snapshot) = slot.as_ref() {
                    tracing::warn!(
                        "status file unreadable, serving stale snapshot: {}",
                        err
                    );
                    return Ok(Arc::clone(snapshot));
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        if let Some(snapshot) = slot.as_ref() {
            if snapshot.hash() == current_hash {
                tracing::debug!("snapshot cache hit for {}", path.display());
                return Ok(Arc::clone(snapshot));
            }
            tracing::debug!("snapshot cache invalidated for {}", path.display());
        }

        let catalog = match build_fn(path) {
            Ok(catalog) => catalog,
            Err(err) if err.is_io() => {
                if let Some(snapshot) = slot.as_ref() {
                    tracing::warn!(
                        "status file unreadable, serving stale snapshot: {}",
                        err
                    );
                    return Ok(Arc::clone(snapshot));
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let snapshot = Arc::new(Snapshot::new(current_hash, catalog));
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop all cached state for `path`.
    pub fn invalidate(&self, path: &Path) {
        let mut states = self.states.lock().unwrap();
        states.remove(path);
    }

    fn state_for(&self, path: &Path) -> Arc<PathState> {
        let mut states = self.states.lock().unwrap();
        Arc::clone(states.entry(path.to_path_buf()).or_default())
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
