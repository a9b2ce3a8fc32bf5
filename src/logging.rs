//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Library code only emits events; the binary decides where they go by
//! calling [`init_logging`] once at startup. Output goes to stderr so it never
//! mixes with documents printed on stdout.
//!
//! # Levels
//!
//! - `warn`: store failures, ignored config files (shown by default)
//! - `info`: document loads and imports (`-v`)
//! - `debug`: every committed edit (`-vv`)
//! - `trace`: everything (`-vvv`)

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps a `-v` count to a level.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG`, when set, overrides the level.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbosity: u8) {
    let filter = build_env_filter(level_from_verbosity(verbosity));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        // Other crates stay at warn
        EnvFilter::new(format!("warn,treequill={}", level))
    })
}
