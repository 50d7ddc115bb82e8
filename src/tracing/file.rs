use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

use super::filter::CRATE_TARGET;
use super::filter::DebugOnlyFilter;
use super::filter::ErrorWarnFilter;
use super::filter::InfoAndAboveFilter;
use super::format::MuhasibFormat;
use crate::Result;
use crate::config::LoggingConfig;
use crate::err_with_loc;
use crate::error::EngineError;

// Dropping a guard stops its writer thread, keep them for the whole process
static GUARDS: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

/// Terminal directive used when `RUST_LOG` is not set.
pub fn terminal_directive(
    engine_name: &str,
    level: &str,
) -> String {
    format!("warn,{}={},{}={}", CRATE_TARGET, level, engine_name, level)
}

/// Terminal output plus daily rolling files under `{dir}`, `{dir}/debug` and `{dir}/error`.
pub fn setup_tracing(
    engine_name: &str,
    logging_config: &LoggingConfig,
) -> Result<()> {
    let base_logs_dir = Path::new(logging_config.directory.as_deref().unwrap_or(".logs"));
    let debug_dir = base_logs_dir.join("debug");
    let error_dir = base_logs_dir.join("error");

    for dir in [base_logs_dir, debug_dir.as_path(), error_dir.as_path()] {
        std::fs::create_dir_all(dir).map_err(|e| {
            err_with_loc!(EngineError::SetupTracingError(format!(
                "failed to create logs directory {}: {}",
                dir.display(),
                e
            )))
        })?;
    }

    let file_name = format!("{}.log", engine_name);
    let info_appender = RollingFileAppender::new(Rotation::DAILY, base_logs_dir, &file_name);
    let debug_appender = RollingFileAppender::new(Rotation::DAILY, &debug_dir, &file_name);
    let error_appender = RollingFileAppender::new(Rotation::DAILY, &error_dir, &file_name);

    let (non_blocking_info, info_guard) = tracing_appender::non_blocking(info_appender);
    let (non_blocking_debug, debug_guard) = tracing_appender::non_blocking(debug_appender);
    let (non_blocking_error, error_guard) = tracing_appender::non_blocking(error_appender);

    let format = MuhasibFormat {
        engine_name: engine_name.to_string(),
    };

    let terminal_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(terminal_directive(engine_name, &logging_config.level)));

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(true)
                .event_format(format.clone())
                .with_filter(terminal_filter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_info)
                .with_filter(InfoAndAboveFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_debug)
                .with_filter(DebugOnlyFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format)
                .with_writer(non_blocking_error)
                .with_filter(ErrorWarnFilter),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| err_with_loc!(EngineError::SetupTracingError(e.to_string())))?;

    let _ = GUARDS.set(vec![info_guard, debug_guard, error_guard]);

    tracing::info!("{}_logging_started::logs_dir::{}", engine_name, base_logs_dir.display());
    Ok(())
}
