//! One request/response round trip against `POST {base_url}/v1/chat/completions`.

use tracing::debug;

use crate::api::{ChatCompletionResponse, ChatMessage, ChatRequest};
use crate::core::error::{summarize_api_error, ChatError, NetworkFailure};
use crate::core::message::{Role, Turn};
use crate::core::settings::Settings;
use crate::utils::url::chat_completions_url;

/// Stateless chat-completion client. Settings are passed in on every call.
#[derive(Clone, Debug, Default)]
pub struct ChatExchange {
    client: reqwest::Client,
}

impl ChatExchange {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Send `history` plus a new user message and return the assistant reply.
    ///
    /// Blank text, or an unset base URL or model, fails with
    /// [`ChatError::ConfigurationOrInputMissing`] before any I/O. `history`
    /// is only read; callers decide whether to append the reply.
    pub async fn send(
        &self,
        history: &[Turn],
        text: &str,
        settings: &Settings,
    ) -> Result<Turn, ChatError> {
        validate_send(text, settings)?;

        let request = build_request(history, text, &settings.model_name);
        let url = chat_completions_url(&settings.base_url);
        debug!(
            %url,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(NetworkFailure::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(NetworkFailure::from)?;
        if !status.is_success() {
            let summary = summarize_api_error(&String::from_utf8_lossy(&body));
            debug!(%status, ?summary, "chat completion rejected");
            return Err(NetworkFailure::Status { status, summary }.into());
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_slice(&body).map_err(NetworkFailure::from)?;
        let reply = parsed.into_reply().ok_or(NetworkFailure::MissingReply)?;
        debug!(chars = reply.len(), "chat completion received");
        Ok(Turn::assistant(reply))
    }
}

/// Preconditions shared by [`ChatExchange::send`] and the session layer.
pub fn validate_send(text: &str, settings: &Settings) -> Result<(), ChatError> {
    if text.trim().is_empty() || !settings.is_configured() {
        return Err(ChatError::ConfigurationOrInputMissing);
    }
    Ok(())
}

/// Prior turns in order, then the new user text exactly as typed.
pub fn build_request(history: &[Turn], text: &str, model: &str) -> ChatRequest {
    let mut messages: Vec<ChatMessage> = history.iter().map(ChatMessage::from).collect();
    messages.push(ChatMessage {
        role: Role::User.to_api_role().to_string(),
        content: text.to_string(),
    });
    ChatRequest {
        model: model.to_string(),
        messages,
    }
}
