//! Model listing functionality
//!
//! This module handles listing the models served at the configured base URL.

use std::error::Error;

use crate::api::models::{fetch_models, Model};
use crate::core::settings::{KeyValueStore, SettingsStore};
use crate::utils::url::models_url;

/// `*` marks the model currently saved in settings.
pub fn format_model_line(model: &Model, current_model: &str) -> String {
    let marker = if model.id == current_model { "*" } else { " " };
    format!(" {marker} {}", model.display_name())
}

pub fn found_models_line(count: usize) -> String {
    let noun = if count == 1 { "model" } else { "models" };
    format!("Found {count} {noun}")
}

pub async fn list_models<S: KeyValueStore>(
    base_url: Option<String>,
    store: &SettingsStore<S>,
    client: &reqwest::Client,
) -> Result<(), Box<dyn Error>> {
    let settings = store.load();
    let base_url = base_url.unwrap_or_else(|| settings.base_url.clone());
    if base_url.trim().is_empty() {
        return Err(
            "No base URL configured. Run 'parley set base-url <URL>' or pass --base-url.".into(),
        );
    }

    println!("🤖 Available models at {}", models_url(&base_url));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let models = fetch_models(client, &base_url).await?;
    if models.is_empty() {
        println!("No models found at this endpoint.");
        return Ok(());
    }

    for model in &models {
        println!("{}", format_model_line(model, &settings.model_name));
    }
    println!();
    println!("{}.", found_models_line(models.len()));

    if settings.has_model_name() && !models.iter().any(|m| m.id == settings.model_name) {
        println!(
            "⚠️  Saved model '{}' is not listed by this endpoint.",
            settings.model_name
        );
    }

    Ok(())
}
