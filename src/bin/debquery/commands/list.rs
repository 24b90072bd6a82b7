//! `debquery list` command

use anyhow::Result;
use debquery::ops;
use debquery::SnapshotCache;

use crate::cli::{GlobalArgs, ListArgs};
use crate::commands::{load_config, load_snapshot};

pub fn execute(args: ListArgs, globals: &GlobalArgs) -> Result<()> {
    let (_config, status_path) = load_config(globals);
    let cache = SnapshotCache::new();
    let snapshot = load_snapshot(&cache, &status_path, globals.color)?;

    let index = ops::package_index(&snapshot)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    for (name, summary) in &index {
        if summary.is_empty() {
            println!("{}", name);
        } else {
            println!("{} - {}", name, summary);
        }
    }

    Ok(())
}
