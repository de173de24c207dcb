//! Category command handlers.

use std::sync::Arc;

use tabled::Tabled;

use backoffice_core::{ApiClient, Category, CategoryStore, NewCategory};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Prefix")]
    prefix: String,
    #[tabled(rename = "Products")]
    products: u64,
}

impl From<&Arc<Category>> for CategoryRow {
    fn from(c: &Arc<Category>) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            prefix: c.prefix.clone(),
            products: c.product_count,
        }
    }
}

fn detail(c: &Category) -> String {
    output::detail_lines([
        ("ID", c.id.to_string()),
        ("Name", c.name.clone()),
        ("Prefix", c.prefix.clone()),
        ("Products", c.product_count.to_string()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: ApiClient,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = CategoryStore::categories(api);

    match args.command {
        CategoriesCommand::List => {
            let mut view = store.subscribe();
            let ((), settled) = tokio::join!(store.fetch(), view.settled());
            util::ensure_loaded(settled.unwrap_or_default())?;
            let out = output::render_list(
                &global.output,
                view.current().as_slice(),
                |c| CategoryRow::from(c),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Create { name } => {
            let created = store.create(&NewCategory { name }).await?;
            let out = output::render_single(
                &global.output,
                created.as_ref(),
                detail,
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete category {id}? Its products lose their category."),
                "categories delete",
                global.yes,
            )? {
                return Ok(());
            }
            store
                .remove(id)
                .await
                .map_err(|e| CliError::from(e).with_list_hint("categories list"))?;
            output::notice(&format!("Category {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
