//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use super::assistant::{ASSISTANT_VERSION, JARVIS, print_vocabulary};
use super::env::{DEFAULT_ENV_FILE, ENV_FILE_VAR};
use super::settings::Microphone;

/// Jarvis startup configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "jarvis")]
#[command(author, version = ASSISTANT_VERSION, about = "Load and check the Jarvis voice assistant configuration", long_about = None)]
pub struct AppConfig {
    /// Print the wake-word aliases and trigger-words and exit
    #[arg(long)]
    pub list_words: bool,

    /// Env file with KEY=value pairs (variables already set in the environment take precedence)
    #[arg(long, short = 'e', env = ENV_FILE_VAR, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Recording device number, -1 for the system default [default: 0]
    #[arg(long, short = 'm', allow_negative_numbers = true, value_parser = parse_microphone_index)]
    pub microphone_index: Option<Microphone>,

    /// Fail if PICOVOICE_TOKEN or AI_TOKEN is not configured
    #[arg(long)]
    pub require_tokens: bool,

    /// Print the resolved configuration as JSON (tokens redacted)
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let config = Self::parse();

        if config.list_words {
            print_vocabulary(&JARVIS);
            std::process::exit(0);
        }

        config
    }
}

/// Parse and validate a microphone index (-1 or a non-negative number).
fn parse_microphone_index(s: &str) -> Result<Microphone, String> {
    s.parse().map_err(|e: super::ConfigError| e.to_string())
}
