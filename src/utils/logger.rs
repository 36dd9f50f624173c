/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Reads the log level from the `LOGLEVEL` environment variable
///
/// Unknown or missing values map to `INFO`.
#[must_use]
pub fn level_from_env() -> Level {
    match env::var("LOGLEVEL")
        .unwrap_or_else(|_| "INFO".to_string())
        .to_uppercase()
        .as_str()
    {
        "ERROR" => Level::ERROR,
        "WARN" => Level::WARN,
        "DEBUG" => Level::DEBUG,
        "TRACE" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Installs the global tracing subscriber with the level from `LOGLEVEL`
///
/// Safe to call more than once; only the first call has an effect.
pub fn setup_logger() {
    setup_logger_with_level(level_from_env());
}

/// Installs the global tracing subscriber with an explicit level
///
/// Output goes to stderr so that data printed on stdout stays machine
/// readable.
pub fn setup_logger_with_level(level: Level) {
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();

        // A host application may already own the global subscriber
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set default subscriber: {e}");
            return;
        }

        tracing::debug!("Log level set to: {}", level);
    });
}
