//! Diagnostic logging setup.
//!
//! The browser owns the terminal, so its diagnostics can only go to a file.
//! The one-shot `list` command writes them to stderr instead.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "multiverse=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Disabled,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Target for the interactive browser: a file if one was configured,
    /// otherwise nothing.
    pub fn for_browser(log_file: Option<PathBuf>) -> Self {
        match log_file {
            Some(path) if !path.as_os_str().is_empty() => LogTarget::File(path),
            _ => LogTarget::Disabled,
        }
    }

    /// Target for one-shot commands: a file if one was configured, otherwise stderr.
    pub fn for_command(log_file: Option<PathBuf>) -> Self {
        match Self::for_browser(log_file) {
            LogTarget::Disabled => LogTarget::Stderr,
            target => target,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(target: &LogTarget) -> Result<(), Box<dyn Error>> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
            Ok(())
        }
    }
}
