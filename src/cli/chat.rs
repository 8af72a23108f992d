//! Line-oriented chat loop.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::api::models::Model;
use crate::cli::model_list::format_model_line;
use crate::core::error::ChatError;
use crate::core::exchange::ChatExchange;
use crate::core::message::{Role, Turn};
use crate::core::model_catalog::{ModelCatalog, RefreshOutcome};
use crate::core::session::{ChatSession, SendOutcome};
use crate::core::settings::{KeyValueStore, SettingsStore};

const PROMPT: &str = "> ";

#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Message(&'a str),
    ListModels,
    SwitchModel(&'a str),
    ShowSettings,
    Quit,
    Unknown(&'a str),
}

/// Classify one line typed at the prompt. Lines that do not start with `/`
/// are sent verbatim, whitespace included.
pub fn parse_line(line: &str) -> ReplInput<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return ReplInput::Message(line);
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    match name {
        "quit" | "exit" => ReplInput::Quit,
        "models" => ReplInput::ListModels,
        "settings" => ReplInput::ShowSettings,
        "model" if !rest.is_empty() => ReplInput::SwitchModel(rest),
        _ => ReplInput::Unknown(trimmed),
    }
}

pub fn render_turn(turn: &Turn) -> String {
    match turn.role() {
        Role::Assistant => format!("🤖 {}", turn.content()),
        Role::User => format!("🧑 {}", turn.content()),
    }
}

/// Models for `/models`. The endpoint is queried again only after the base
/// URL changes or the previous fetch failed.
pub async fn catalog_models<'c>(
    catalog: &'c mut ModelCatalog,
    client: &reqwest::Client,
    base_url: &str,
) -> Result<&'c [Model], ChatError> {
    if base_url.trim().is_empty() {
        return Err(ChatError::ConfigurationOrInputMissing);
    }
    let outcome = catalog.refresh_if_changed(client, base_url).await;
    match outcome {
        Some(RefreshOutcome::Failed(err)) => Err(err),
        Some(RefreshOutcome::Loaded(_) | RefreshOutcome::Stale) | None => Ok(catalog.models()),
    }
}

pub async fn run_chat<S: KeyValueStore>(
    store: &SettingsStore<S>,
    client: reqwest::Client,
) -> Result<(), Box<dyn Error>> {
    let mut settings = store.load();
    let exchange = ChatExchange::new(client);
    let mut session = ChatSession::with_greeting();
    let mut catalog = ModelCatalog::new();

    if !settings.is_configured() {
        println!("⚠️  Settings are incomplete:");
        println!("{settings}");
        println!("Run 'parley set base-url <URL>' and 'parley set model <ID>' first.");
        println!();
    }

    for turn in session.conversation() {
        println!("{}", render_turn(turn));
    }
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_line(&line) {
            ReplInput::Quit => break,
            ReplInput::ShowSettings => println!("{settings}"),
            ReplInput::ListModels => {
                match catalog_models(&mut catalog, exchange.client(), &settings.base_url).await {
                    Ok(models) if models.is_empty() => println!("No models found."),
                    Ok(models) => {
                        for model in models {
                            println!("{}", format_model_line(model, &settings.model_name));
                        }
                    }
                    Err(err) => eprintln!("❌ {err}"),
                }
            }
            ReplInput::SwitchModel(model) => {
                settings.model_name = model.to_string();
                match store.save(&settings) {
                    Ok(()) => {
                        println!("✅ Now using model: {model}");
                        if !catalog.models().is_empty() && !catalog.contains(model) {
                            eprintln!("⚠️  '{model}' is not listed by this endpoint.");
                        }
                    }
                    Err(err) => eprintln!("❌ {err}"),
                }
            }
            ReplInput::Unknown(command) => {
                eprintln!("⚠️  Unknown command: {command}");
                eprintln!("   Try /models, /model <id>, /settings or /quit.");
            }
            ReplInput::Message(text) => {
                let pending = match session.begin_send(text, &settings) {
                    Ok(pending) => pending,
                    Err(err) => {
                        eprintln!("⚠️  {}", err.user_message());
                        continue;
                    }
                };

                print!("…");
                io::stdout().flush()?;
                let result = exchange
                    .send(&pending.history, &pending.text, &settings)
                    .await;
                print!("\r");

                match session.finish_send(pending.ticket, result) {
                    SendOutcome::Replied(turn) => println!("{}\n", render_turn(&turn)),
                    SendOutcome::Failed(err) => {
                        debug!(error = %err, "chat exchange failed");
                        eprintln!("❌ {err}");
                    }
                    SendOutcome::Stale => {}
                }
            }
        }
    }

    Ok(())
}
