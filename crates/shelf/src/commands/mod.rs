//! Command dispatch: bridges CLI args -> catalog operations -> output formatting.

pub mod categories;
pub mod config_cmd;
pub mod products;

use shelf_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    catalog: &Catalog,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(catalog, args, global).await,
        Command::Categories => categories::handle(catalog, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
