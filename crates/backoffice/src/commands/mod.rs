//! Command handlers, one module per top-level subcommand.

pub mod analytics;
pub mod categories;
pub mod chat;
pub mod config_cmd;
pub mod conversations;
pub mod import;
pub mod prefs;
pub mod products;
pub mod util;

use backoffice_core::ApiClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a backend-bound command to its handler.
pub async fn dispatch(cmd: Command, api: ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Categories(args) => categories::handle(api, args, global).await,
        Command::Products(args) => products::handle(api, args, global).await,
        Command::Import(args) => import::handle(&api, args, global).await,
        Command::Chat(args) => chat::handle(&api, args, global).await,
        Command::Conversations(args) => conversations::handle(&api, args, global).await,
        Command::Analytics => analytics::handle(&api, global).await,
        Command::Config(_) | Command::Prefs(_) => Err(CliError::Internal(
            "local command routed to the backend dispatcher".into(),
        )),
    }
}
