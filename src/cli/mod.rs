//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod chat;
pub mod model_list;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::cli::chat::run_chat;
use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::cli::settings::{set_setting, show_settings, unset_setting};
use crate::core::settings::{KeyValueStore, MemoryStore, SettingsStore, TomlFileStore};
use crate::utils::logging;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ")\nrustc ",
    env!("VERGEN_RUSTC_SEMVER"),
    "\ntarget ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
    "\nbuilt ",
    env!("VERGEN_BUILD_DATE"),
);

#[derive(Parser)]
#[command(name = "parley")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat client for OpenAI-compatible chat-completion endpoints")]
#[command(
    long_about = "Parley sends your messages, together with the conversation so far, to an \
OpenAI-compatible chat-completion endpoint and prints the reply.\n\n\
Setup:\n\
  parley set base-url http://localhost:8080\n\
  parley models                 List models served at the base URL\n\
  parley set model <id>\n\n\
Chat commands:\n\
  /models           List models served at the base URL\n\
  /model <id>       Switch to and save another model\n\
  /settings         Show the current base URL and model\n\
  /quit             Leave the chat\n\n\
Set RUST_LOG (or pass -v) for diagnostic output on stderr."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read and write settings at this path instead of the platform config directory
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "ephemeral")]
    pub settings: Option<PathBuf>,

    /// Keep settings in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Increase diagnostic output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,
    /// Send one message with no prior history and print the reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List the models served at the base URL
    Models {
        /// Query this base URL instead of the saved one
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Save a setting
    Set {
        key: SettingKey,
        value: String,
    },
    /// Clear a setting
    Unset {
        key: SettingKey,
    },
    /// Print the saved settings
    Show,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    BaseUrl,
    Model,
}

impl SettingKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::BaseUrl => "base-url",
            SettingKey::Model => "model",
        }
    }
}

pub type DynSettingsStore = SettingsStore<Box<dyn KeyValueStore>>;

fn open_settings_store(args: &Args) -> Result<DynSettingsStore, Box<dyn Error>> {
    let backend: Box<dyn KeyValueStore> = if args.ephemeral {
        Box::new(MemoryStore::new())
    } else if let Some(path) = &args.settings {
        Box::new(TomlFileStore::new(path.clone()))
    } else {
        let path = crate::core::settings::default_settings_path()
            .ok_or("Could not determine a config directory; pass --settings <PATH>")?;
        Box::new(TomlFileStore::new(path))
    };
    Ok(SettingsStore::new(backend))
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let store = open_settings_store(&args)?;
    let client = reqwest::Client::new();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&store, client).await,
        Commands::Say { prompt } => run_say(prompt, &store, client).await,
        Commands::Models { base_url } => list_models(base_url, &store, &client).await,
        Commands::Set { key, value } => set_setting(key, value, &store, &client).await,
        Commands::Unset { key } => unset_setting(key, &store),
        Commands::Show => {
            show_settings(&store);
            Ok(())
        }
    }
}
