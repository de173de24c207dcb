// Chat proxy endpoint
//
// The backend's reply is forwarded verbatim; only the request is checked
// locally.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ChatRequest;

impl ApiClient {
    /// Send a chat message and return the backend's reply untouched.
    ///
    /// `POST /api/chat` with `{"message", "conversation_id"}`. A missing or
    /// blank message is rejected with `Error::BadRequest` before any
    /// network call.
    pub async fn chat(
        &self,
        message: Option<&str>,
        conversation_id: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => m,
            _ => {
                return Err(Error::BadRequest {
                    message: "message is required".into(),
                });
            }
        };

        debug!(conversation_id, "sending chat message");
        self.post(
            "/api/chat",
            &ChatRequest {
                message: message.to_owned(),
                conversation_id: conversation_id.map(str::to_owned),
            },
        )
        .await
    }
}
