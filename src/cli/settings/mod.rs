//! `set`, `unset` and `show` for the two persisted settings.
//!
//! Every change rewrites both entries, the same way the settings form saved
//! the base URL and model name together.

use std::error::Error;

use crate::cli::model_list::found_models_line;
use crate::cli::SettingKey;
use crate::core::model_catalog::{ModelCatalog, RefreshOutcome};
use crate::core::settings::{KeyValueStore, Settings, SettingsStore};

pub fn apply_setting(settings: &mut Settings, key: SettingKey, value: String) {
    match key {
        SettingKey::BaseUrl => settings.base_url = value,
        SettingKey::Model => settings.model_name = value,
    }
}

fn persist<S: KeyValueStore>(
    store: &SettingsStore<S>,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    match store.save(settings) {
        Ok(()) => {
            println!("✅ Settings have been saved.");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {}", err.user_message());
            Err(err.into())
        }
    }
}

pub async fn set_setting<S: KeyValueStore>(
    key: SettingKey,
    value: String,
    store: &SettingsStore<S>,
    client: &reqwest::Client,
) -> Result<(), Box<dyn Error>> {
    let mut settings = store.load();
    apply_setting(&mut settings, key, value);
    persist(store, &settings)?;

    if key == SettingKey::BaseUrl {
        check_model_offered(&settings, client).await;
    }
    Ok(())
}

pub fn unset_setting<S: KeyValueStore>(
    key: SettingKey,
    store: &SettingsStore<S>,
) -> Result<(), Box<dyn Error>> {
    let mut settings = store.load();
    apply_setting(&mut settings, key, String::new());
    persist(store, &settings)?;
    println!("Unset {}", key.as_str());
    Ok(())
}

pub fn show_settings<S: KeyValueStore>(store: &SettingsStore<S>) {
    println!("Current settings:");
    println!("{}", store.load());
}

/// Discovery after a base-URL change. Only advisory: nothing here can undo
/// the save.
async fn check_model_offered(settings: &Settings, client: &reqwest::Client) {
    let mut catalog = ModelCatalog::new();
    match catalog.refresh_if_changed(client, &settings.base_url).await {
        Some(RefreshOutcome::Loaded(count)) => {
            println!("{} at this endpoint.", found_models_line(count));
            if settings.has_model_name() && !catalog.contains(&settings.model_name) {
                println!(
                    "⚠️  Saved model '{}' is not listed. Run 'parley models' to pick one.",
                    settings.model_name
                );
            }
        }
        Some(RefreshOutcome::Failed(err)) => {
            eprintln!("⚠️  Could not list models: {err}");
        }
        Some(RefreshOutcome::Stale) | None => {}
    }
}
