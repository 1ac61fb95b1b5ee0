//! Logger initialization.
//!
//! Logs go to stderr so that stdout carries only the report.

use std::io::Write;

use log::LevelFilter;
use owo_colors::OwoColorize;

/// Initializes `env_logger`.
///
/// `RUST_LOG` is read first; `verbose` then raises the metalens crates to
/// `debug`. Without either, only warnings are shown.
///
/// ```bash
/// RUST_LOG=metalens_core=trace metalens page.html
/// ```
pub fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.parse_default_env();

    if verbose {
        builder.filter_module("metalens", LevelFilter::Debug);
        builder.filter_module("metalens_core", LevelFilter::Debug);
    }
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);

    builder.format(|buf, record| {
        let level = record.level();
        let label = match level {
            log::Level::Error => level.red().to_string(),
            log::Level::Warn => level.yellow().to_string(),
            log::Level::Info => level.green().to_string(),
            log::Level::Debug => level.blue().to_string(),
            log::Level::Trace => level.purple().to_string(),
        };

        writeln!(buf, "{} [{}] {}", record.target().cyan(), label, record.args())
    });

    // try_init so repeated initialization in tests does not panic
    builder.try_init()
}
