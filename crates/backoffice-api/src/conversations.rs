// CRM conversation endpoints

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ConversationUser;

impl ApiClient {
    /// List conversation participants.
    ///
    /// `GET /conversations/users`
    pub async fn list_conversation_users(&self) -> Result<Vec<ConversationUser>, Error> {
        debug!("listing conversation users");
        self.get("/conversations/users", &[] as &[(&str, &str)])
            .await
    }

    /// Partially update a conversation participant.
    ///
    /// `PATCH /conversations/users/{id}` with any subset of fields.
    pub async fn update_conversation_user(
        &self,
        id: i64,
        changes: &(impl Serialize + Sync),
    ) -> Result<ConversationUser, Error> {
        debug!(id, "updating conversation user");
        self.patch(&format!("/conversations/users/{id}"), changes)
            .await
    }
}
