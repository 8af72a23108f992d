//! One-shot "say" command

use std::error::Error;

use crate::core::exchange::ChatExchange;
use crate::core::settings::{KeyValueStore, SettingsStore};

pub async fn run_say<S: KeyValueStore>(
    prompt: Vec<String>,
    store: &SettingsStore<S>,
    client: reqwest::Client,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    let settings = store.load();
    let exchange = ChatExchange::new(client);

    match exchange.send(&[], &prompt, &settings).await {
        Ok(turn) => {
            println!("{}", turn.content());
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}
