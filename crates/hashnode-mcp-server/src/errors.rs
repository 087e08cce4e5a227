use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use rmcp::service::ServerInitializeError;
use tokio::task::JoinError;

/// An error talking to the GraphQL endpoint
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to send GraphQL request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read GraphQL response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("HTTP status {status}\nResponse content: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode GraphQL response body: {source}\nResponse content: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Could not bind listener: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize MCP server")]
    McpInitializeError(#[from] Box<ServerInitializeError<std::io::Error>>),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;
