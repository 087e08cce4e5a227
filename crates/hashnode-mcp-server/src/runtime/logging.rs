//! Logging config
//!
//! This module is only used by the main binary

mod defaults;
mod log_rotation_kind;
mod parsers;

pub use log_rotation_kind::LogRotationKind;
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "super::schemas::level")]
    pub level: Level,

    /// Directory to write log files to, instead of stderr
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Log file rotation period to use when log file path provided
    /// [default: Hourly]
    #[serde(default = "defaults::default_rotation")]
    pub rotation: LogRotationKind,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::default_rotation(),
        }
    }
}

impl Logging {
    /// The filter for the configured level, with `RUST_LOG` directives on top
    pub fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        // The MCP SDK is chatty about every message at info
        if self.level == Level::INFO {
            env_filter = env_filter.add_directive("rmcp=warn".parse()?);
        }
        Ok(env_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{}"#, Level::INFO)]
    #[case(r#"{ "level": "trace" }"#, Level::TRACE)]
    #[case(r#"{ "level": "WARN" }"#, Level::WARN)]
    fn it_parses_levels(#[case] json: &str, #[case] expected: Level) {
        let logging: Logging = serde_json::from_str(json).unwrap();
        assert_eq!(logging.level, expected);
    }

    #[test]
    fn it_rejects_unknown_levels() {
        assert!(serde_json::from_str::<Logging>(r#"{ "level": "loud" }"#).is_err());
    }

    #[test]
    fn it_quiets_the_sdk_at_info() {
        let filter = Logging::default().env_filter().unwrap();
        assert!(filter.to_string().contains("rmcp=warn"));
    }
}
