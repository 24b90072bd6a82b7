//! `debquery dependents` command

use anyhow::Result;
use debquery::util::diagnostic::suggestions;
use debquery::{FieldName, SnapshotCache};

use crate::cli::{DependentsArgs, GlobalArgs};
use crate::commands::{load_config, load_snapshot};

pub fn execute(args: DependentsArgs, globals: &GlobalArgs) -> Result<()> {
    let (_config, status_path) = load_config(globals);
    let cache = SnapshotCache::new();
    let snapshot = load_snapshot(&cache, &status_path, globals.color)?;

    let matches = snapshot
        .catalog()
        .filter_exact(FieldName::Package, &args.name);

    let record = match matches.len() {
        0 => anyhow::bail!(
            "package `{}` not found\n{}",
            args.name,
            suggestions::PACKAGE_NOT_FOUND
        ),
        1 => matches[0],
        _ => anyhow::bail!("package `{}` is ambiguous", args.name),
    };

    let names: Vec<String> = snapshot
        .resolver()
        .dependents_of(record)
        .iter()
        .filter_map(|dependent| dependent.package_name())
        .map(|name| name.as_str().to_string())
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    for name in &names {
        println!("{}", name);
    }

    Ok(())
}
