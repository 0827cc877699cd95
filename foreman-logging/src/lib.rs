//! Tracing setup for the Foreman setting tool.
//!
//! Stdout carries the JSON result payload, so console logs always go to stderr.

use std::{env, path::Path};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, registry, EnvFilter};

const DEFAULT_LOG_FILE: &str = "/tmp/foreman-setting.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

impl LogOutput {
    fn parse(raw: &str) -> Self {
        match raw {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            "none" | "off" => LogOutput::None,
            _ => LogOutput::Console,
        }
    }

    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

/// Logging options read from `FOREMAN_LOG_*` variables.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub json: bool,
    pub file_path: String,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self {
            level: env::var("FOREMAN_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            output: LogOutput::parse(
                &env::var("FOREMAN_LOG_OUTPUT").unwrap_or_else(|_| "console".to_string()),
            ),
            json: env::var("FOREMAN_LOG_FORMAT").is_ok_and(|f| f == "json"),
            file_path: env::var("FOREMAN_LOG_FILE_PATH")
                .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
        }
    }

    /// `-v` raises the level without touching an explicit `RUST_LOG`
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.level = match verbose {
            0 => self.level,
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        };
        self
    }

    fn env_filter(&self) -> EnvFilter {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        ["hyper=warn", "reqwest=warn", "rustls=warn"]
            .iter()
            .filter_map(|d| d.parse().ok())
            .fold(filter, |f, d| f.add_directive(d))
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init_subscriber(settings: &LogSettings) -> Option<WorkerGuard> {
    let subscriber = registry().with(settings.env_filter());

    let mut guard = None;
    let file_writer = if settings.output.file() {
        let log_path = Path::new(&settings.file_path);
        let log_dir = log_path.parent().unwrap_or_else(|| Path::new("/tmp"));
        let log_filename = log_path
            .file_name()
            .unwrap_or("foreman-setting.log".as_ref());
        let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);
        Some(non_blocking)
    } else {
        None
    };

    let console_layer = settings.output.console().then(|| {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        if settings.json {
            layer.json().boxed()
        } else {
            layer.with_target(false).boxed()
        }
    });

    let file_layer = file_writer.map(|writer| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        if settings.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    });

    // A second init (tests, embedding) is not an error worth failing over.
    let _ = subscriber.with(console_layer).with(file_layer).try_init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_output_parse() {
        assert_eq!(LogOutput::parse("file"), LogOutput::File);
        assert_eq!(LogOutput::parse("both"), LogOutput::Both);
        assert_eq!(LogOutput::parse("off"), LogOutput::None);
        assert_eq!(LogOutput::parse("anything"), LogOutput::Console);
        assert!(LogOutput::Both.console() && LogOutput::Both.file());
        assert!(!LogOutput::None.console() && !LogOutput::None.file());
    }

    #[test]
    fn test_verbosity_overrides_level() {
        let settings = LogSettings {
            level: "warn".to_string(),
            output: LogOutput::Console,
            json: false,
            file_path: DEFAULT_LOG_FILE.to_string(),
        };
        assert_eq!(settings.clone().with_verbosity(0).level, "warn");
        assert_eq!(settings.clone().with_verbosity(1).level, "info");
        assert_eq!(settings.clone().with_verbosity(2).level, "debug");
        assert_eq!(settings.with_verbosity(5).level, "trace");
    }
}
