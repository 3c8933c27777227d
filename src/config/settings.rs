//! Immutable runtime settings built once at startup.
//!
//! Consumers receive a `Settings` value explicitly instead of reading the
//! process environment themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::info;

use super::assistant::{Assistant, JARVIS};
use super::env::EnvFile;
use super::error::ConfigError;

/// Wake-word service token variable.
pub const PICOVOICE_TOKEN_VAR: &str = "PICOVOICE_TOKEN";

/// AI service token variable.
pub const AI_TOKEN_VAR: &str = "AI_TOKEN";

/// Microphone used when none is chosen on the command line.
pub const DEFAULT_MICROPHONE: Microphone = Microphone::Index(0);

/// Recording device selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i64")]
pub enum Microphone {
    /// Platform default recording device (index `-1`).
    Default,
    /// Device by platform-assigned ordinal.
    Index(u32),
}

impl Microphone {
    /// Build from a raw device index. `-1` means the default device.
    ///
    /// # Errors
    /// Returns an error for negative indices other than `-1`.
    pub fn from_index(index: i64) -> Result<Self, ConfigError> {
        match index {
            -1 => Ok(Microphone::Default),
            0.. => u32::try_from(index).map(Microphone::Index).map_err(|_| ConfigError::InvalidMicrophoneIndex(index.to_string())),
            _ => Err(ConfigError::InvalidMicrophoneIndex(index.to_string())),
        }
    }

    /// Raw device index, `-1` for the default device.
    pub fn index(&self) -> i64 {
        match self {
            Microphone::Default => -1,
            Microphone::Index(n) => i64::from(*n),
        }
    }
}

impl From<Microphone> for i64 {
    fn from(mic: Microphone) -> Self {
        mic.index()
    }
}

impl FromStr for Microphone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index: i64 = s.trim().parse().map_err(|_| ConfigError::InvalidMicrophoneIndex(s.to_string()))?;
        Self::from_index(index)
    }
}

impl fmt::Display for Microphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Microphone::Default => write!(f, "default device (-1)"),
            Microphone::Index(n) => write!(f, "device #{}", n),
        }
    }
}

/// Opaque credential. Never printed or serialized in clear text.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw value. Empty or whitespace-only values are treated as absent.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() { None } else { Some(Self(value)) }
    }

    /// Raw token value, for handing to the service client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

/// Service tokens sourced from the environment. Both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tokens {
    pub picovoice: Option<Secret>,
    pub ai: Option<Secret>,
}

/// Complete assistant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    assistant: Assistant,
    microphone: Microphone,
    tokens: Tokens,
    env_file: EnvFile,
}

impl Settings {
    /// Build settings from the process environment.
    ///
    /// # Arguments
    /// * `microphone` - Microphone chosen on the command line, if any
    /// * `env_file` - Outcome of loading the env file
    pub fn from_env(microphone: Option<Microphone>, env_file: EnvFile) -> Self {
        Self::from_lookup(microphone, env_file, |key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// Only the two tokens come from `lookup`; the microphone falls back to
    /// [`DEFAULT_MICROPHONE`]. Nothing is validated here.
    pub fn from_lookup<F>(microphone: Option<Microphone>, env_file: EnvFile, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let microphone = microphone.unwrap_or(DEFAULT_MICROPHONE);

        let tokens = Tokens {
            picovoice: lookup(PICOVOICE_TOKEN_VAR).and_then(Secret::new),
            ai: lookup(AI_TOKEN_VAR).and_then(Secret::new),
        };

        Self { assistant: JARVIS, microphone, tokens, env_file }
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn microphone(&self) -> Microphone {
        self.microphone
    }

    pub fn picovoice_token(&self) -> Option<&Secret> {
        self.tokens.picovoice.as_ref()
    }

    pub fn ai_token(&self) -> Option<&Secret> {
        self.tokens.ai.as_ref()
    }

    pub fn env_file(&self) -> &EnvFile {
        &self.env_file
    }

    /// Names of token variables that are not configured.
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tokens.picovoice.is_none() {
            missing.push(PICOVOICE_TOKEN_VAR);
        }
        if self.tokens.ai.is_none() {
            missing.push(AI_TOKEN_VAR);
        }
        missing
    }

    /// Validate the settings.
    ///
    /// Token presence is only checked when `require_tokens` is set; otherwise
    /// the decision is left to whichever component uses the token.
    pub fn validate(&self, require_tokens: bool) -> Result<(), ConfigError> {
        let missing = self.missing_tokens();
        if require_tokens && !missing.is_empty() {
            return Err(ConfigError::MissingTokens(missing));
        }
        Ok(())
    }

    /// Log the current configuration. Token values are never logged.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Assistant: {} v{}", self.assistant.name, self.assistant.version);
        info!("  Wake-word aliases: {}", self.assistant.aliases.join(", "));
        info!("  Trigger-words: {}", self.assistant.trigger_words.join(", "));
        info!("  Microphone: {}", self.microphone);
        info!("  Env file: {}", self.env_file);
        info!("  {}: {}", PICOVOICE_TOKEN_VAR, token_state(&self.tokens.picovoice));
        info!("  {}: {}", AI_TOKEN_VAR, token_state(&self.tokens.ai));
    }
}

fn token_state(token: &Option<Secret>) -> &'static str {
    if token.is_some() { "set" } else { "not set" }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;
    use crate::config::env::read_env_file;

    fn missing_file() -> EnvFile {
        EnvFile::Missing { path: PathBuf::from("dev.env") }
    }

    fn from_map(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(None, missing_file(), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_no_env_file_leaves_tokens_absent() {
        let settings = from_map(&[]);

        assert!(settings.picovoice_token().is_none());
        assert!(settings.ai_token().is_none());
        assert_eq!(settings.missing_tokens(), vec![PICOVOICE_TOKEN_VAR, AI_TOKEN_VAR]);
        assert_eq!(settings.microphone(), DEFAULT_MICROPHONE);
        assert!(settings.validate(false).is_ok());
    }

    #[test]
    fn test_env_file_tokens_are_exposed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PICOVOICE_TOKEN=pv-secret").unwrap();
        writeln!(file, "AI_TOKEN=ai-secret").unwrap();

        let entries = read_env_file(file.path()).unwrap().unwrap();
        let env_file = EnvFile::Loaded { path: file.path().to_path_buf(), keys: entries.values.len(), skipped: entries.skipped };
        let settings = Settings::from_lookup(None, env_file, |key| entries.values.get(key).cloned());

        assert_eq!(settings.picovoice_token().map(Secret::expose), Some("pv-secret"));
        assert_eq!(settings.ai_token().map(Secret::expose), Some("ai-secret"));
        assert!(settings.missing_tokens().is_empty());
        assert!(settings.validate(true).is_ok());
    }

    #[test]
    fn test_empty_tokens_are_absent() {
        let settings = from_map(&[(PICOVOICE_TOKEN_VAR, ""), (AI_TOKEN_VAR, "   ")]);

        assert!(settings.picovoice_token().is_none());
        assert!(settings.ai_token().is_none());
    }

    #[test]
    fn test_require_tokens_reports_missing_names() {
        let settings = from_map(&[(AI_TOKEN_VAR, "ai")]);

        let err = settings.validate(true).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTokens(ref names) if names == &vec![PICOVOICE_TOKEN_VAR]));
        assert_eq!(err.to_string(), "missing required tokens: PICOVOICE_TOKEN");
    }

    #[test]
    fn test_constants_independent_of_environment() {
        let empty = from_map(&[]);
        let full = from_map(&[(PICOVOICE_TOKEN_VAR, "a"), (AI_TOKEN_VAR, "b")]);

        assert_eq!(empty.assistant(), &JARVIS);
        assert_eq!(full.assistant(), &JARVIS);
        assert!(full.assistant().aliases.contains(&"джарвис"));
    }

    #[test]
    fn test_building_twice_is_identical() {
        let vars = [(PICOVOICE_TOKEN_VAR, "pv"), (AI_TOKEN_VAR, "ai")];
        assert_eq!(from_map(&vars), from_map(&vars));
    }

    #[test]
    fn test_microphone_ignores_environment() {
        let settings = from_map(&[("MICROPHONE_INDEX", "hw:1")]);
        assert_eq!(settings.microphone(), DEFAULT_MICROPHONE);

        let from_cli = Settings::from_lookup(Some(Microphone::Default), missing_file(), |_| Some("hw:1".to_string()));
        assert_eq!(from_cli.microphone(), Microphone::Default);
    }

    #[test]
    fn test_microphone_index_parsing() {
        assert_eq!("-1".parse::<Microphone>().unwrap(), Microphone::Default);
        assert_eq!(" 3 ".parse::<Microphone>().unwrap(), Microphone::Index(3));
        assert!("-2".parse::<Microphone>().is_err());
        assert!("5000000000".parse::<Microphone>().is_err());
        assert_eq!(Microphone::Default.index(), -1);
        assert_eq!(Microphone::Index(7).to_string(), "device #7");
    }

    #[test]
    fn test_secrets_are_redacted() {
        let settings = from_map(&[(PICOVOICE_TOKEN_VAR, "pv-secret"), (AI_TOKEN_VAR, "ai-secret")]);

        let debug = format!("{:?}", settings);
        let json = serde_json::to_string(&settings).unwrap();
        for rendered in [&debug, &json] {
            assert!(!rendered.contains("pv-secret"));
            assert!(!rendered.contains("ai-secret"));
        }

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tokens"]["picovoice"], "***");
        assert_eq!(value["microphone"], 0);
        assert_eq!(value["env_file"]["status"], "missing");
        assert_eq!(value["assistant"]["name"], "Jarvis");
    }
}
