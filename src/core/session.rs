//! Chat-screen state: the running conversation and its loading indicator.
//!
//! Sends are split into [`ChatSession::begin_send`] and
//! [`ChatSession::finish_send`] so a front end can render the user's turn and
//! a spinner while the request is in flight. Every send gets a ticket; only
//! the newest ticket may change the conversation, so an older reply that
//! lands after a newer send is dropped.

use tracing::debug;

use crate::core::error::ChatError;
use crate::core::exchange::{validate_send, ChatExchange};
use crate::core::message::Turn;
use crate::core::settings::Settings;

pub const GREETING: &str = "Hello! How can I assist you today?";

/// An accepted send waiting for its reply.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub ticket: u64,
    /// Turns preceding the new user message.
    pub history: Vec<Turn>,
    pub text: String,
}

#[derive(Debug)]
pub enum SendOutcome {
    /// The reply was appended.
    Replied(Turn),
    /// The exchange failed; nothing was appended.
    Failed(ChatError),
    /// A newer send superseded this one; the result was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Vec<Turn>,
    loading: bool,
    latest_ticket: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that opens with the assistant greeting.
    pub fn with_greeting() -> Self {
        Self {
            conversation: vec![Turn::assistant(GREETING)],
            ..Self::default()
        }
    }

    pub fn conversation(&self) -> &[Turn] {
        &self.conversation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate, append the user turn, and mark the session as loading.
    ///
    /// On a precondition failure the session is left exactly as it was.
    pub fn begin_send(
        &mut self,
        text: &str,
        settings: &Settings,
    ) -> Result<PendingSend, ChatError> {
        validate_send(text, settings)?;

        let history = self.conversation.clone();
        self.conversation.push(Turn::user(text));
        self.latest_ticket += 1;
        self.loading = true;
        Ok(PendingSend {
            ticket: self.latest_ticket,
            history,
            text: text.to_string(),
        })
    }

    /// Apply the result of the send identified by `ticket`.
    pub fn finish_send(
        &mut self,
        ticket: u64,
        result: Result<Turn, ChatError>,
    ) -> SendOutcome {
        if ticket != self.latest_ticket {
            debug!(ticket, latest = self.latest_ticket, "dropping stale chat reply");
            return SendOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(turn) => {
                self.conversation.push(turn.clone());
                SendOutcome::Replied(turn)
            }
            Err(err) => SendOutcome::Failed(err),
        }
    }

    /// Validate, send, and apply in one step.
    pub async fn send(
        &mut self,
        exchange: &ChatExchange,
        text: &str,
        settings: &Settings,
    ) -> Result<SendOutcome, ChatError> {
        let pending = self.begin_send(text, settings)?;
        let result = exchange
            .send(&pending.history, &pending.text, settings)
            .await;
        Ok(self.finish_send(pending.ticket, result))
    }
}
