use std::time::Duration;

use hashnode_mcp_server::graphql::DEFAULT_TIMEOUT;
use hashnode_mcp_server::server::Transport;
use reqwest::header::HeaderMap;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use super::{endpoint::Endpoint, logging::Logging};

/// Configuration for the MCP server
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The Hashnode GraphQL endpoint
    #[schemars(schema_with = "Url::json_schema")]
    pub endpoint: Endpoint,

    /// Hashnode personal access token, required by the tools that write articles
    #[schemars(with = "Option<String>")]
    pub token: Option<SecretString>,

    /// How long a single API request may take, e.g. "30s" or "1m 30s"
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,

    /// List of hard-coded headers to include in all GraphQL requests
    #[serde(deserialize_with = "parsers::map_from_str")]
    #[schemars(schema_with = "super::schemas::header_map")]
    pub headers: HeaderMap,

    /// Logging configuration
    pub logging: Logging,

    /// The type of server transport to use
    pub transport: Transport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            headers: HeaderMap::new(),
            logging: Logging::default(),
            transport: Transport::default(),
        }
    }
}

mod parsers {
    use std::str::FromStr;

    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use serde::Deserializer;

    pub(super) fn map_from_str<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapFromStrVisitor;
        impl<'de> serde::de::Visitor<'de> for MapFromStrVisitor {
            type Value = HeaderMap;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of header string keys and values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut parsed = HeaderMap::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    let key = HeaderName::from_str(&key)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;
                    let value = HeaderValue::from_str(&value)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;

                    parsed.insert(key, value);
                }

                Ok(parsed)
            }
        }

        deserializer.deserialize_map(MapFromStrVisitor)
    }
}
