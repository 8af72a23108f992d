//! Model discovery against `GET {base_url}/v1/models`.

use std::fmt;

use tracing::debug;

use crate::api::ModelsResponse;
use crate::core::error::{summarize_api_error, ChatError, NetworkFailure};
use crate::utils::url::models_url;

/// A model advertised by the endpoint. Its display name is its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub id: String,
}

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn display_name(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// List the models served at `base_url`, in the order the server sent them.
///
/// An empty base URL is reported as missing configuration without touching
/// the network.
pub async fn fetch_models(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<Model>, ChatError> {
    if base_url.trim().is_empty() {
        return Err(ChatError::ConfigurationOrInputMissing);
    }

    let url = models_url(base_url);
    debug!(%url, "listing models");

    let response = client
        .get(&url)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(NetworkFailure::from)?;

    let status = response.status();
    let body = response.bytes().await.map_err(NetworkFailure::from)?;
    if !status.is_success() {
        let summary = summarize_api_error(&String::from_utf8_lossy(&body));
        debug!(%status, ?summary, "models request rejected");
        return Err(NetworkFailure::Status { status, summary }.into());
    }

    let parsed: ModelsResponse = serde_json::from_slice(&body).map_err(NetworkFailure::from)?;
    debug!(count = parsed.data.len(), "models listed");
    Ok(parsed
        .data
        .into_iter()
        .map(|info| Model::new(info.id))
        .collect())
}
