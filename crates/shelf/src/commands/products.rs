//! Product command handlers.

use tabled::Tabled;

use shelf_core::{Catalog, Product};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

const TITLE_WIDTH: usize = 48;
const DESCRIPTION_WIDTH: usize = 60;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            title: truncate(&p.title, TITLE_WIDTH),
            category: p.category.clone(),
            price: format!("{:.2}", p.price),
            rating: p
                .rating
                .map(|r| format!("{:.1} ({})", r.rate, r.count))
                .unwrap_or_default(),
        }
    }
}

/// `--wide` table row: the summary columns plus the product card text.
#[derive(Tabled)]
struct WideProductRow {
    #[tabled(inline)]
    summary: ProductRow,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&Product> for WideProductRow {
    fn from(p: &Product) -> Self {
        Self {
            summary: ProductRow::from(p),
            description: truncate(&p.description, DESCRIPTION_WIDTH),
            image: p.image.clone(),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list) => {
            if let Some(term) = list.search {
                catalog.set_search_term(term);
            }
            if let Some(category) = list.category {
                catalog.set_category(category);
            }

            let config = catalog.config();
            let limit = list.limit.unwrap_or(config.initial_count);
            catalog
                .load(limit)
                .await
                .map_err(|e| CliError::from_core(e, config.base_url.as_str()))?;

            let view = catalog.view();
            let products = view.state.products();
            tracing::debug!(
                loaded = view.loaded_count,
                shown = products.len(),
                "products filtered"
            );

            let plain = |p: &Product| format!("{}\t{}", p.id, p.title);
            let out = if list.wide {
                output::render_list(global.output, products, |p| WideProductRow::from(p), plain)?
            } else {
                output::render_list(global.output, products, |p| ProductRow::from(p), plain)?
            };
            output::print_output(&out, global.quiet);

            if products.is_empty() {
                output::print_hint(
                    "No products match the current filter.",
                    global.color,
                    global.quiet,
                );
            }
            if view.state.load_more() {
                let next = limit.saturating_add(config.page_step);
                output::print_hint(
                    &format!("More products may be available: rerun with --limit {next}"),
                    global.color,
                    global.quiet,
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_titles() {
        assert_eq!(truncate("Mug", 48), "Mug");
    }

    #[test]
    fn truncate_marks_cut_titles() {
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
