//! Logging Infrastructure
//!
//! Console logging in development, daily rolling files when a log directory
//! is available. `RUST_LOG` overrides the configured level.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "wermi_server={level},shared={level},tower_http={level},security={level},warn"
        ))
    })
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "wermi-server");
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
    }

    let _ = subscriber.try_init();
}
