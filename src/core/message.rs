use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Assistant => ROLE_ASSISTANT,
        }
    }

    /// Wire role for the chat-completion payload. Only `assistant` is kept as
    /// is; every other speaker is sent as `user`.
    pub fn to_api_role(self) -> &'static str {
        match self {
            Role::Assistant => ROLE_ASSISTANT,
            _ => ROLE_USER,
        }
    }

    /// Lenient inverse of [`Role::to_api_role`]: unknown roles read as user.
    pub fn from_api_role(role: &str) -> Self {
        if role == ROLE_ASSISTANT {
            Role::Assistant
        } else {
            Role::User
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from_api_role(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// One message of a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    id: String,
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnIdGenerator::next(), Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnIdGenerator::next(), Role::Assistant, content)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

static TURN_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque turn ids: `<unix millis>-<process sequence>`.
///
/// The millisecond part keeps ids readable in logs; the sequence makes two
/// turns created within the same millisecond distinct.
pub struct TurnIdGenerator;

impl TurnIdGenerator {
    pub fn next() -> String {
        let seq = TURN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{}-{seq}", Utc::now().timestamp_millis())
    }
}
