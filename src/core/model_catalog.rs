//! Models offered on the settings surface.
//!
//! The list is re-fetched whenever the base URL changes to a new non-empty
//! value. Like chat sends, refreshes carry tickets and only the latest one is
//! applied.

use tracing::debug;

use crate::api::models::{fetch_models, Model};
use crate::core::error::ChatError;
use crate::utils::url::normalize_base_url;

#[derive(Debug, Default)]
pub struct ModelCatalog {
    models: Vec<Model>,
    fetched_for: Option<String>,
    loading: bool,
    latest_ticket: u64,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Loaded(usize),
    Failed(ChatError),
    Stale,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn contains(&self, model_name: &str) -> bool {
        self.models.iter().any(|model| model.id == model_name)
    }

    /// True when `base_url` is non-empty and not the one last fetched.
    pub fn should_refresh(&self, base_url: &str) -> bool {
        let normalized = normalize_base_url(base_url);
        !normalized.is_empty() && self.fetched_for.as_deref() != Some(normalized.as_str())
    }

    pub fn begin_refresh(&mut self, base_url: &str) -> u64 {
        self.fetched_for = Some(normalize_base_url(base_url));
        self.latest_ticket += 1;
        self.loading = true;
        self.latest_ticket
    }

    /// Replace the list with the result of refresh `ticket`. A failure empties
    /// the list so a stale endpoint's models are never offered.
    pub fn finish_refresh(
        &mut self,
        ticket: u64,
        result: Result<Vec<Model>, ChatError>,
    ) -> RefreshOutcome {
        if ticket != self.latest_ticket {
            debug!(ticket, latest = self.latest_ticket, "dropping stale model list");
            return RefreshOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(models) => {
                self.models = models;
                RefreshOutcome::Loaded(self.models.len())
            }
            Err(err) => {
                self.models.clear();
                // Allow the same URL to be retried.
                self.fetched_for = None;
                RefreshOutcome::Failed(err)
            }
        }
    }

    /// Fetch if the URL changed; `None` when no fetch was needed.
    pub async fn refresh_if_changed(
        &mut self,
        client: &reqwest::Client,
        base_url: &str,
    ) -> Option<RefreshOutcome> {
        if !self.should_refresh(base_url) {
            return None;
        }
        let ticket = self.begin_refresh(base_url);
        let result = fetch_models(client, base_url).await;
        Some(self.finish_refresh(ticket, result))
    }
}
