//! Category command handler.

use serde::Serialize;
use tabled::Tabled;

use shelf_core::{Catalog, CategoryFilter};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
#[serde(transparent)]
struct CategoryOption(String);

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
}

/// Print the category options: "All" followed by the service's categories.
pub async fn handle(catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    let categories = catalog
        .categories()
        .await
        .map_err(|e| CliError::from_core(e, catalog.config().base_url.as_str()))?;

    let options: Vec<CategoryOption> = std::iter::once(CategoryFilter::All.to_string())
        .chain(categories)
        .map(CategoryOption)
        .collect();

    let out = output::render_list(
        global.output,
        &options,
        |c| CategoryRow { name: c.0.clone() },
        |c| c.0.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
