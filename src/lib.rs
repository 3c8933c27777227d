//! Jarvis voice assistant configuration.
//!
//! Build a [`config::Settings`] once at startup and hand it to the components
//! that need it (wake-word detection, command dispatch, AI client).

pub mod config;
