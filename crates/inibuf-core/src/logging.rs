//! Logging collaborator injected into the store.
//!
//! The store never reaches for a global logger.  It holds a `Box<dyn Logger>`
//! chosen at construction time: [`TracingLogger`] by default, [`NullLogger`]
//! to silence it, or any other implementation (tests use a mock).

use std::fmt;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Receives the store's log records.
#[cfg_attr(test, mockall::automock)]
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards records to the `tracing` macros.
///
/// Whatever subscriber the host application installed decides where they end
/// up and which levels are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(target: "inibuf_core", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "inibuf_core", "{message}"),
            LogLevel::Info => tracing::info!(target: "inibuf_core", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "inibuf_core", "{message}"),
            LogLevel::Trace => tracing::trace!(target: "inibuf_core", "{message}"),
        }
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
