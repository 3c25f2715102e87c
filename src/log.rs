//! Logging for AgriSim, built on `fern`.
//!
//! Routine messages go to stdout and warnings and errors to stderr, with coloured level names when
//! writing to a terminal. When a run saves results, the same messages are also written to plain
//! log files in the output folder.
use anyhow::{Context, Result};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Level, LevelFilter, Metadata, Record};
use std::env;
use std::fmt::Arguments;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::OnceLock;

/// Set once the global logger has been installed
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The log level used when neither `AGRISIM_LOG_LEVEL` nor the settings file gives one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The environment variable which overrides the log level in the settings file
const LOG_LEVEL_ENV_VAR: &str = "AGRISIM_LOG_LEVEL";

/// Log file for info, debug and trace messages
const LOG_INFO_FILE_NAME: &str = "agrisim_info.log";

/// Log file for warnings and errors
const LOG_ERROR_FILE_NAME: &str = "agrisim_error.log";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Convert a log level name (in any case) to a [`LevelFilter`]
pub fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    log_level
        .parse::<LevelFilter>()
        .ok()
        .with_context(|| format!("Unknown log level: {log_level}"))
}

/// The log level to use, with `AGRISIM_LOG_LEVEL` taking precedence over the settings file
fn choose_log_level(from_settings: &str) -> Result<LevelFilter> {
    match env::var(LOG_LEVEL_ENV_VAR) {
        Ok(from_env) => parse_log_level(&from_env)
            .with_context(|| format!("Invalid value for {LOG_LEVEL_ENV_VAR} environment variable")),
        Err(_) => parse_log_level(from_settings),
    }
}

/// Install the program logger.
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level given in `settings.toml`
/// * `log_dir`: Folder in which to create log files, if any
pub fn init(log_level_from_settings: &str, log_dir: Option<&Path>) -> Result<()> {
    let level = choose_log_level(log_level_from_settings)?;

    let mut dispatch = console_dispatch(level);
    if let Some(log_dir) = log_dir {
        dispatch = dispatch.chain(log_file_dispatch(level, log_dir)?);
    }
    dispatch.apply().context("A logger has already been installed")?;

    LOGGER_INIT.get_or_init(|| ());

    Ok(())
}

/// Whether a message is below warning level
fn is_routine(metadata: &Metadata) -> bool {
    metadata.level() > Level::Warn
}

fn level_colours() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta)
}

/// Send routine messages to stdout and warnings and errors to stderr
fn console_dispatch(level: LevelFilter) -> Dispatch {
    let stdout_colours = io::stdout().is_terminal().then(level_colours);
    let stderr_colours = io::stderr().is_terminal().then(level_colours);

    Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(is_routine)
                .level(level)
                .format(move |out, message, record| {
                    format_record(out, message, record, stdout_colours.as_ref());
                })
                .chain(io::stdout()),
        )
        .chain(
            Dispatch::new()
                .level(level.min(LevelFilter::Warn))
                .format(move |out, message, record| {
                    format_record(out, message, record, stderr_colours.as_ref());
                })
                .chain(io::stderr()),
        )
}

/// Write messages to log files in `log_dir`, replacing any from a previous run.
///
/// The info file records at least info-level messages and the error file always records warnings
/// and errors, whatever the console level.
fn log_file_dispatch(level: LevelFilter, log_dir: &Path) -> Result<Dispatch> {
    let create = |file_name: &str| {
        let path = log_dir.join(file_name);
        File::create(&path).with_context(|| format!("Could not create {}", path.display()))
    };

    Ok(Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(is_routine)
                .level(level.max(LevelFilter::Info))
                .format(format_plain)
                .chain(create(LOG_INFO_FILE_NAME)?),
        )
        .chain(
            Dispatch::new()
                .level(LevelFilter::Warn)
                .format(format_plain)
                .chain(create(LOG_ERROR_FILE_NAME)?),
        ))
}

fn format_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    format_record(out, message, record, None);
}

/// Format a message as `[time level target] message`, colouring the level if `colours` is given
fn format_record(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    colours: Option<&ColoredLevelConfig>,
) {
    let timestamp = Local::now().format("%H:%M:%S");
    let target = record.target();
    match colours {
        Some(colours) => out.finish(format_args!(
            "[{timestamp} {} {target}] {message}",
            colours.color(record.level())
        )),
        None => out.finish(format_args!(
            "[{timestamp} {} {target}] {message}",
            record.level()
        )),
    }
}
