//! `debquery show` command

use anyhow::Result;
use debquery::ops::{self, DetailOutcome};
use debquery::util::diagnostic::suggestions;
use debquery::SnapshotCache;

use crate::cli::{GlobalArgs, ShowArgs};
use crate::commands::{load_config, load_snapshot};

pub fn execute(args: ShowArgs, globals: &GlobalArgs) -> Result<()> {
    let (mut config, status_path) = load_config(globals);
    if !args.fields.is_empty() {
        config.return_fields = args.fields;
    }

    let cache = SnapshotCache::new();
    let snapshot = load_snapshot(&cache, &status_path, globals.color)?;

    match ops::package_detail(&snapshot, &config, &args.name)? {
        DetailOutcome::NotFound => {
            anyhow::bail!("package `{}` not found\n{}", args.name, suggestions::PACKAGE_NOT_FOUND)
        }
        DetailOutcome::Ambiguous => {
            anyhow::bail!("package `{}` is ambiguous", args.name)
        }
        DetailOutcome::Found(detail) => {
            println!("{}", serde_json::to_string_pretty(&detail)?);
            Ok(())
        }
    }
}
