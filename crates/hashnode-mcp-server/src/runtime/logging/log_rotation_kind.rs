use schemars::JsonSchema;
use serde::Deserialize;
use tracing_appender::rolling::Rotation;

/// How often a new log file is started
#[derive(Debug, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotationKind {
    #[serde(alias = "Minutely", alias = "MINUTELY")]
    Minutely,
    #[serde(alias = "Hourly", alias = "HOURLY")]
    Hourly,
    #[serde(alias = "Daily", alias = "DAILY")]
    Daily,
    #[serde(alias = "Never", alias = "NEVER")]
    Never,
}

impl From<LogRotationKind> for Rotation {
    fn from(value: LogRotationKind) -> Self {
        match value {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogRotationKind;
    use rstest::rstest;
    use tracing_appender::rolling::Rotation;

    #[rstest]
    #[case("\"daily\"", LogRotationKind::Daily, Rotation::DAILY)]
    #[case("\"Hourly\"", LogRotationKind::Hourly, Rotation::HOURLY)]
    #[case("\"NEVER\"", LogRotationKind::Never, Rotation::NEVER)]
    #[case("\"minutely\"", LogRotationKind::Minutely, Rotation::MINUTELY)]
    fn it_parses_and_maps_rotations(
        #[case] json: &str,
        #[case] kind: LogRotationKind,
        #[case] rotation: Rotation,
    ) {
        let parsed: LogRotationKind = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, kind);
        assert_eq!(Rotation::from(parsed), rotation);
    }
}
