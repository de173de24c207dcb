//! CRM conversation command handlers.

use tabled::Tabled;

use backoffice_core::{ApiClient, ConversationUser, CoreError};

use crate::cli::{ConversationsArgs, ConversationsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ConversationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Unread")]
    unread: u64,
}

impl From<&ConversationUser> for ConversationRow {
    fn from(u: &ConversationUser) -> Self {
        Self {
            id: u.id,
            name: u.name.clone().unwrap_or_default(),
            phone: u.phone.clone().unwrap_or_default(),
            status: u.status.clone().unwrap_or_default(),
            unread: u.unread_count,
        }
    }
}

pub async fn handle(
    api: &ApiClient,
    args: ConversationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConversationsCommand::List => {
            let users = api
                .list_conversation_users()
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(
                &global.output,
                &users,
                |u| ConversationRow::from(u),
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConversationsCommand::Update { id, data } => {
            let changes = util::parse_json_object("data", &data)?;
            let updated = api
                .update_conversation_user(id, &changes)
                .await
                .map_err(|e| {
                    CliError::from(CoreError::from(e)).with_list_hint("conversations list")
                })?;
            let out = output::render_single(
                &global.output,
                &updated,
                |u| {
                    output::detail_lines([
                        ("ID", u.id.to_string()),
                        ("Name", u.name.clone().unwrap_or_default()),
                        ("Status", u.status.clone().unwrap_or_default()),
                        ("Unread", u.unread_count.to_string()),
                    ])
                },
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
