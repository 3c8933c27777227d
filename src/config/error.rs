//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or checking the assistant configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The env file exists but could not be read.
    #[error("failed to load env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// Microphone index is neither `-1` nor a non-negative ordinal.
    #[error("invalid microphone index '{0}': expected -1 (default device) or a non-negative device number")]
    InvalidMicrophoneIndex(String),

    /// Tokens were required but not configured.
    #[error("missing required tokens: {}", .0.join(", "))]
    MissingTokens(Vec<&'static str>),
}
