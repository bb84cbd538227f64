//! Log output setup.
//!
//! Diagnostics go to an append-mode log file so restarts never truncate
//! previous runs.

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target, WriteStyle};

/// Log file used when `LOG_FILE` is not set.
pub const DEFAULT_LOG_FILE: &str = "discord.log";

const DEFAULT_FILTER: &str = "bobby=debug,serenity=info,poise=info";

/// Resolve the log file path from `LOG_FILE`, falling back to [`DEFAULT_LOG_FILE`].
#[must_use]
pub fn log_file_from_env() -> PathBuf {
    log_file_path(env::var("LOG_FILE").ok())
}

fn log_file_path(raw: Option<String>) -> PathBuf {
    raw.filter(|value| !value.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from)
}

/// Install the global logger, writing to `path` in append mode.
///
/// Falls back to stderr when the file cannot be opened.
pub fn init(path: &Path) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            builder
                .target(Target::Pipe(Box::new(file)))
                .write_style(WriteStyle::Never)
                .init();
            log::debug!("Logging to {}", path.display());
        }
        Err(e) => {
            builder.init();
            log::warn!(
                "Failed to open log file {}, logging to stderr: {e}",
                path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_log_file_uses_default() {
        assert_eq!(log_file_path(None), PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn blank_log_file_uses_default() {
        assert_eq!(
            log_file_path(Some("   ".to_string())),
            PathBuf::from(DEFAULT_LOG_FILE)
        );
    }

    #[test]
    fn log_file_override_is_used() {
        assert_eq!(
            log_file_path(Some("/var/log/bobby.log".to_string())),
            PathBuf::from("/var/log/bobby.log")
        );
    }
}
