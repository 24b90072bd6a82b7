//! `debquery provides` command

use std::collections::BTreeMap;

use anyhow::Result;
use debquery::SnapshotCache;

use crate::cli::{GlobalArgs, ProvidesArgs};
use crate::commands::{load_config, load_snapshot};

pub fn execute(args: ProvidesArgs, globals: &GlobalArgs) -> Result<()> {
    let (_config, status_path) = load_config(globals);
    let cache = SnapshotCache::new();
    let snapshot = load_snapshot(&cache, &status_path, globals.color)?;

    // Sort for stable output; the engine map itself is unordered.
    let map: BTreeMap<&str, &str> = snapshot
        .catalog()
        .provides_map()
        .iter()
        .map(|(provided, provider)| (provided.as_str(), provider.as_str()))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    for (provided, provider) in &map {
        println!("{} -> {}", provided, provider);
    }

    Ok(())
}
