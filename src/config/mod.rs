//! Configuration module for the voice assistant.
//!
//! Loads the env file, reads service tokens and exposes the fixed assistant
//! vocabulary as one immutable `Settings` value.

pub mod assistant;
#[allow(clippy::module_inception)]
mod config;
pub mod env;
mod error;
mod settings;

pub use config::AppConfig;
pub use env::EnvFile;
pub use error::ConfigError;
pub use settings::{Microphone, Secret, Settings, Tokens};
