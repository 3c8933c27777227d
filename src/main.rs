//! Jarvis - startup configuration for the voice assistant.
//!
//! Loads the env file, resolves the assistant settings and reports them,
//! either as log lines or as JSON for other tools to consume.

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use jarvis::config::assistant::JARVIS;
use jarvis::config::{AppConfig, EnvFile, Settings, env};

/// Initialize logging with a time-only format.
/// Respects RUST_LOG, falls back to the verbose flag, defaults to info.
/// Logs go to stderr so `--json` output stays clean.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = AppConfig::from_args();

    init_logging(args.verbose)?;

    info!("🎤 {} v{}", JARVIS.name, JARVIS.version);

    // Env file is best-effort: missing is fine, bad lines are skipped, an unreadable file is ignored
    let env_file = match env::load_env_file(&args.env_file) {
        Ok(env_file) => env_file,
        Err(e) => {
            warn!("⚠️  {}", e);
            EnvFile::Invalid { path: args.env_file.clone() }
        }
    };

    let settings = Settings::from_env(args.microphone_index, env_file);

    settings.log_config();

    if let Err(e) = settings.validate(args.require_tokens) {
        error!("❌ Configuration error: {}", e);
        error!("Set the variables in the environment or in {}.", settings.env_file().path().display());
        std::process::exit(1);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&settings).context("Failed to serialize configuration")?;
        println!("{}", json);
    }

    info!("✅ Configuration ready");
    Ok(())
}
