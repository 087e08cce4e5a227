//! Execute GraphQL documents against the Hashnode API

use std::time::Duration;

use bon::bon;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{ServerError, TransportError};
use crate::model::ApiResponse;
use crate::queries::Document;

/// The public Hashnode GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://gql.hashnode.com";

/// How long a single request may take before it is abandoned
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The JSON body POSTed to the endpoint
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub query: &'a str,
    pub variables: Option<Value>,
}

/// A handle to the GraphQL endpoint, shared by every tool
///
/// Cloning is cheap: the underlying connection pool is reference counted.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
    timeout: Duration,
}

#[bon]
impl Client {
    #[builder]
    pub fn new(
        endpoint: Url,
        token: Option<SecretString>,
        #[builder(default)] headers: HeaderMap,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self, ServerError> {
        let mut headers = headers;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("hashnode-mcp-server/", env!("CARGO_PKG_VERSION"))),
        );

        // Hashnode expects the personal access token as-is, without a scheme
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token.expose_secret())?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServerError::HttpClient)?;

        Ok(Self {
            http,
            endpoint,
            headers,
            timeout,
        })
    }
}

impl Client {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one document with its variables and decode the response envelope.
    ///
    /// Exactly one HTTP request is made; failures are never retried.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &Document,
        variables: Option<Value>,
    ) -> Result<ApiResponse<T>, TransportError> {
        debug!(
            operation = document.name,
            variables = %variables
                .as_ref()
                .map(|variables| variables.to_string())
                .unwrap_or_default(),
            endpoint = %self.endpoint,
            "Sending GraphQL request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&Request {
                query: document.source,
                variables,
            })
            .send()
            .await
            .map_err(|error| self.classify(error, TransportError::Send))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| self.classify(error, TransportError::Body))?;

        if !status.is_success() {
            warn!(operation = document.name, %status, "GraphQL endpoint returned an error status");
            return Err(TransportError::Status { status, body });
        }

        debug!(operation = document.name, %status, "Received GraphQL response");
        serde_json::from_str(&body).map_err(|source| TransportError::Decode { source, body })
    }

    fn classify(
        &self,
        error: reqwest::Error,
        otherwise: fn(reqwest::Error) -> TransportError,
    ) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            otherwise(error)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Client;
    use url::Url;

    /// A client pointed at a mock server, authenticated with `test-token`
    pub(crate) fn client_for(server: &mockito::ServerGuard) -> Client {
        Client::builder()
            .endpoint(Url::parse(&server.url()).unwrap())
            .token("test-token".to_string().into())
            .build()
            .unwrap()
    }
}
