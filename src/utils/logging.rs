//! Diagnostic logging to stderr.
//!
//! Stdout belongs to the conversation, so every tracing event goes to stderr.
//! `RUST_LOG` wins when set; otherwise the level comes from the number of
//! `-v` flags.

use tracing_subscriber::EnvFilter;

pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "parley=warn",
        1 => "parley=info",
        2 => "parley=debug",
        _ => "parley=trace,reqwest=debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
