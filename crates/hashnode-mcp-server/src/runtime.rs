//! Runtime utilites
//!
//! This module is only used by the main binary and provides helper code
//! related to runtime configuration.

mod config;
mod endpoint;
mod logging;
mod schemas;

use std::path::{Path, PathBuf};

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use logging::LogRotationKind;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix of the environment variables that mirror the config file
const ENV_PREFIX: &str = "HASHNODE_MCP_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(hashnode_common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(hashnode_common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Sets up either file logging or stderr logging depending on provided configuration options
///
/// Stdout is reserved for the stdio transport, so logs never go there.
pub fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let env_filter = config.logging.env_filter()?;

    if let Some(path) = &config.logging.path {
        setup_file_logging(path, env_filter, &config.logging.rotation)
    } else {
        setup_stderr_logging(env_filter)
    }
}

/// Sets up rolling file appender logging but falls back to stderr logging on failure
fn setup_file_logging(
    log_path: &PathBuf,
    env_filter: EnvFilter,
    rotation: &LogRotationKind,
) -> Result<Option<WorkerGuard>, anyhow::Error> {
    if let Err(error) = std::fs::create_dir_all(log_path) {
        eprintln!("Failed to build log path ({error}) - falling back to stderr");
        return setup_stderr_logging(env_filter);
    }

    let (non_blocking_writer, guard) = match RollingFileAppender::builder()
        .rotation((*rotation).into())
        .filename_prefix("hashnode_mcp_server")
        .filename_suffix("log")
        .build(log_path)
    {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(error) => {
            eprintln!("Failed to build log file ({error}) - falling back to stderr");
            return setup_stderr_logging(env_filter);
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(Some(guard))
}

/// Sets up stderr logging
fn setup_stderr_logging(env_filter: EnvFilter) -> Result<Option<WorkerGuard>, anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false),
        )
        .init();

    Ok(None)
}

/// Figment provider that maps the variables every Hashnode integration understands
/// onto the config
fn hashnode_common_env() -> Env {
    Env::prefixed("HASHNODE_")
        .only(&["api_url", "personal_access_token"])
        .map(|key| match key.to_string().to_lowercase().as_str() {
            "api_url" => "endpoint".into(),
            "personal_access_token" => "token".into(),

            // Filtered out by `only` above
            other => other.to_string().into(),
        })
}
