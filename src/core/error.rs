//! Failure taxonomy shared by the exchange, discovery and settings layers.
//!
//! Front ends only need [`ChatError::kind`] to pick a notification; the
//! attached [`NetworkFailure`] / [`StoreError`] detail is for logs and
//! verbose output.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::core::settings::path_display;

/// The three user-facing failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationOrInputMissing,
    NetworkOrParseError,
    PersistenceError,
}

#[derive(Debug)]
pub enum ChatError {
    /// Blank message, or base URL / model name unset. No request was made.
    ConfigurationOrInputMissing,
    /// Transport failure, non-success status, or unexpected response shape.
    NetworkOrParse(NetworkFailure),
    /// A settings write did not complete.
    Persistence(StoreError),
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::ConfigurationOrInputMissing => ErrorKind::ConfigurationOrInputMissing,
            ChatError::NetworkOrParse(_) => ErrorKind::NetworkOrParseError,
            ChatError::Persistence(_) => ErrorKind::PersistenceError,
        }
    }

    /// Short message suitable for an alert or a status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::ConfigurationOrInputMissing => {
                "Please enter a message and ensure settings are configured."
            }
            ChatError::NetworkOrParse(_) => {
                "The request failed. Check the base URL and your connection."
            }
            ChatError::Persistence(_) => "Failed to save settings. Please try again.",
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::ConfigurationOrInputMissing => f.write_str(self.user_message()),
            ChatError::NetworkOrParse(detail) => write!(f, "Request failed: {detail}"),
            ChatError::Persistence(detail) => write!(f, "Failed to save settings: {detail}"),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::ConfigurationOrInputMissing => None,
            ChatError::NetworkOrParse(detail) => Some(detail),
            ChatError::Persistence(detail) => Some(detail),
        }
    }
}

impl From<NetworkFailure> for ChatError {
    fn from(value: NetworkFailure) -> Self {
        ChatError::NetworkOrParse(value)
    }
}

impl From<StoreError> for ChatError {
    fn from(value: StoreError) -> Self {
        ChatError::Persistence(value)
    }
}

/// What went wrong inside a `NetworkOrParse` failure.
#[derive(Debug)]
pub enum NetworkFailure {
    /// The request never produced a response (DNS, refused, reset, bad URL).
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status.
    Status {
        status: reqwest::StatusCode,
        summary: Option<String>,
    },
    /// The body was not the JSON shape we expected.
    Decode(serde_json::Error),
    /// The JSON parsed but held no `choices[0].message.content`.
    MissingReply,
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFailure::Transport(err) => write!(f, "transport error: {err}"),
            NetworkFailure::Status {
                status,
                summary: Some(summary),
            } => write!(f, "server returned {status}: {summary}"),
            NetworkFailure::Status {
                status,
                summary: None,
            } => write!(f, "server returned {status}"),
            NetworkFailure::Decode(err) => write!(f, "unexpected response body: {err}"),
            NetworkFailure::MissingReply => f.write_str("response contained no reply"),
        }
    }
}

impl StdError for NetworkFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            NetworkFailure::Transport(err) => Some(err),
            NetworkFailure::Decode(err) => Some(err),
            NetworkFailure::Status { .. } | NetworkFailure::MissingReply => None,
        }
    }
}

impl From<reqwest::Error> for NetworkFailure {
    fn from(value: reqwest::Error) -> Self {
        NetworkFailure::Transport(value)
    }
}

impl From<serde_json::Error> for NetworkFailure {
    fn from(value: serde_json::Error) -> Self {
        NetworkFailure::Decode(value)
    }
}

/// Errors raised by a key-value backend.
#[derive(Debug)]
pub enum StoreError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Serialize(toml::ser::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path_display(path), source)
            }
            StoreError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path_display(path), source)
            }
            StoreError::Serialize(source) => write!(f, "failed to encode settings: {source}"),
            StoreError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::Read { source, .. } => Some(source),
            StoreError::Parse { source, .. } => Some(source),
            StoreError::Serialize(source) => Some(source),
            StoreError::Write { source, .. } => Some(source),
        }
    }
}

/// Pull a one-line summary out of an OpenAI-style error body.
pub(crate) fn summarize_api_error(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(collapse_whitespace(trimmed));
    };

    value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .map(|text| collapse_whitespace(&text))
        .filter(|text| !text.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_every_variant() {
        assert_eq!(
            ChatError::ConfigurationOrInputMissing.kind(),
            ErrorKind::ConfigurationOrInputMissing
        );
        assert_eq!(
            ChatError::from(NetworkFailure::MissingReply).kind(),
            ErrorKind::NetworkOrParseError
        );
        let store = StoreError::Write {
            path: PathBuf::from("/tmp/settings.toml"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(ChatError::from(store).kind(), ErrorKind::PersistenceError);
    }

    #[test]
    fn summary_prefers_nested_error_message() {
        let body = r#"{"error":{"message":"model   not\nfound","type":"invalid_request_error"}}"#;
        assert_eq!(
            summarize_api_error(body).as_deref(),
            Some("model not found")
        );
    }

    #[test]
    fn summary_falls_back_to_flat_fields_and_raw_text() {
        assert_eq!(
            summarize_api_error(r#"{"error":"rate limited"}"#).as_deref(),
            Some("rate limited")
        );
        assert_eq!(
            summarize_api_error(r#"{"message":"bad gateway"}"#).as_deref(),
            Some("bad gateway")
        );
        assert_eq!(
            summarize_api_error("Internal Server Error").as_deref(),
            Some("Internal Server Error")
        );
        assert_eq!(summarize_api_error("  "), None);
        assert_eq!(summarize_api_error(r#"{"detail":"x"}"#), None);
    }

    #[test]
    fn status_display_includes_summary() {
        let failure = NetworkFailure::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            summary: Some("boom".to_string()),
        };
        assert_eq!(failure.to_string(), "server returned 500 Internal Server Error: boom");
    }
}
