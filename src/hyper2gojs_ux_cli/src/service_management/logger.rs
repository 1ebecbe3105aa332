use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[derive(Debug, PartialEq)]
pub enum Verbosity {
    Info,
    Debug,
    Trace,
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Info,
            1 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

impl From<Verbosity> for Level {
    fn from(v: Verbosity) -> Self {
        match v {
            Verbosity::Info => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

pub enum LoggingMode {
    Full,
    Json,
    Compact,
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flag.
/// Logs go to stderr unless a file is given, keeping stdout for command output.
pub fn log(
    debug_level: Verbosity,
    mode: LoggingMode,
    log_file: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let level: Level = debug_level.into();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("[logger] unable to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    let ansi = log_file.is_none();

    let registry = Registry::default().with(env_filter);
    let installed = match mode {
        LoggingMode::Full => registry
            .with(
                fmt::layer()
                    .with_ansi(ansi)
                    .with_line_number(true)
                    .with_writer(writer),
            )
            .try_init(),
        LoggingMode::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LoggingMode::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(ansi)
                    .with_target(false)
                    .with_writer(writer),
            )
            .try_init(),
    };
    installed.context("[logger] a global subscriber is already installed")?;

    Ok(())
}
