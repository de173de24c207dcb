//! Product command handlers.
//!
//! Filter flags go through a `FilterComposer` whose listener feeds the
//! product collection's query, the same path an interactive filter panel
//! takes.

use std::sync::Arc;

use tabled::Tabled;
use tracing::debug;

use backoffice_core::{ApiClient, FilterChange, FilterComposer, Product, ProductStore};

use crate::cli::{GlobalOpts, ProductFilterArgs, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Arc<Product>> for ProductRow {
    fn from(p: &Arc<Product>) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            price: format!("{:.2}", p.price),
            stock: p.stock,
            category: p.category_id.map(|c| c.to_string()).unwrap_or_default(),
            tags: p.tags.join(", "),
        }
    }
}

/// Feed each provided flag into the composer as a separate change.
fn compose(composer: &mut FilterComposer, args: ProductFilterArgs) {
    if let Some(search) = args.search {
        composer.update(FilterChange::Search(search));
    }
    if args.category.is_some() {
        composer.update(FilterChange::Category(args.category));
    }
    if args.min_price.is_some() {
        composer.update(FilterChange::MinPrice(args.min_price));
    }
    if args.max_price.is_some() {
        composer.update(FilterChange::MaxPrice(args.max_price));
    }
    if args.in_stock {
        composer.update(FilterChange::InStock(true));
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: ApiClient,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(filters) => {
            let store = Arc::new(ProductStore::products(api));
            let target = Arc::clone(&store);
            let mut composer =
                FilterComposer::new(move |state| target.set_query(state.to_query()));
            compose(&mut composer, filters);
            debug!(query = ?store.query(), "listing products");

            store.fetch().await;
            util::ensure_loaded(store.state())?;

            // The backend may ignore unknown parameters; narrow locally too.
            let state = composer.state();
            let snap: Vec<Arc<Product>> = store
                .snapshot()
                .iter()
                .filter(|p| state.matches(p))
                .cloned()
                .collect();

            let out = output::render_list(
                &global.output,
                &snap,
                |p| ProductRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
