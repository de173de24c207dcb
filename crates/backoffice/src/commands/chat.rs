//! Chat proxy command handler.

use backoffice_core::{ApiClient, CoreError};
use serde_json::Value;

use crate::cli::{ChatArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Reply text for table output: a bare string, or the first string-valued
/// field among the usual reply keys. Anything else prints as JSON.
fn reply_text(reply: &Value) -> String {
    if let Some(text) = reply.as_str() {
        return text.to_owned();
    }
    ["response", "reply", "message", "answer"]
        .iter()
        .find_map(|key| reply.get(key).and_then(Value::as_str))
        .map_or_else(
            || serde_json::to_string_pretty(reply).unwrap_or_default(),
            str::to_owned,
        )
}

pub async fn handle(api: &ApiClient, args: ChatArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let reply = api
        .chat(args.message.as_deref(), args.conversation.as_deref())
        .await
        .map_err(CoreError::from)?;

    let out = output::render_single(&global.output, &reply, reply_text, reply_text);
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reply_text_prefers_known_keys() {
        assert_eq!(reply_text(&json!("hi")), "hi");
        assert_eq!(reply_text(&json!({"response": "salam", "id": 1})), "salam");
        assert!(reply_text(&json!({"id": 1})).contains("\"id\": 1"));
    }
}
