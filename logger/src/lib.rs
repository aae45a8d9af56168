use std::str::FromStr;

use colored::Colorize;
use common::env_config::Config;

fn level_color(level: log::Level) -> &'static str {
    match level {
        log::Level::Info => "green",
        log::Level::Warn => "yellow",
        log::Level::Error => "red",
        log::Level::Debug => "magenta",
        log::Level::Trace => "bright black",
    }
}

/// Parses the configured level, falling back to `info`.
pub fn level_filter(level: &str) -> log::LevelFilter {
    log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info)
}

/// Installs the global logger: stdout when console logging is enabled,
/// plus the configured log file.
pub fn setup(config: &Config) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level().to_string().color(level_color(record.level())),
                message
            ))
        })
        .level(level_filter(&config.log_level))
        .level_for("hyper", log::LevelFilter::Off)
        .level_for("hyper_util", log::LevelFilter::Off);

    if config.console_logging_enabled {
        dispatch = dispatch.chain(std::io::stdout());
    }
    if let Some(path) = &config.log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
