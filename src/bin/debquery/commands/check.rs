//! `debquery check` command

use anyhow::Result;
use debquery::util::diagnostic;
use debquery::Catalog;

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::load_config;

pub fn execute(_args: CheckArgs, globals: &GlobalArgs) -> Result<()> {
    let (_config, status_path) = load_config(globals);

    match Catalog::load(&status_path) {
        Ok(catalog) => {
            println!("{}: {} packages OK", status_path.display(), catalog.len());
            Ok(())
        }
        Err(err) => {
            diagnostic::emit(&err.to_diagnostic(), globals.color);
            anyhow::bail!("status file failed validation")
        }
    }
}
