//! Endpoint construction for OpenAI-compatible services.
//!
//! Users paste base URLs with or without a trailing slash. Everything that
//! talks to the network goes through [`endpoint_url`] so the resulting path
//! never contains a doubled separator.

/// Path of the chat-completion endpoint, relative to the base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

/// Path of the models-listing endpoint, relative to the base URL.
pub const MODELS_PATH: &str = "v1/models";

/// Strip surrounding whitespace and trailing slashes from a base URL.
///
/// ```
/// use parley::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8080/"), "http://localhost:8080");
/// assert_eq!(normalize_base_url("  http://localhost:8080  "), "http://localhost:8080");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one `/` between them.
///
/// ```
/// use parley::utils::url::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("http://localhost:8080/", "/v1/models"),
///     "http://localhost:8080/v1/models"
/// );
/// ```
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = normalize_base_url(base_url);
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

pub fn chat_completions_url(base_url: &str) -> String {
    endpoint_url(base_url, CHAT_COMPLETIONS_PATH)
}

pub fn models_url(base_url: &str) -> String {
    endpoint_url(base_url, MODELS_PATH)
}
