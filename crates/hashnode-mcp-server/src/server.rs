use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bon::bon;
use rmcp::ServiceExt as _;
use rmcp::transport::sse_server::SseServerConfig;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::{SseServer, StreamableHttpService, stdio};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument as _, error, info};

use crate::errors::ServerError;
use crate::graphql::Client;
use crate::server_handler::HashnodeMcpServerHandler;

/// How the server talks to the MCP client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Use standard IO for server <> client communication
    #[default]
    Stdio,

    /// Host the MCP server on the supplied configuration, using SSE for communication
    #[serde(rename = "sse")]
    SSE {
        /// The IP address to bind to
        #[serde(default = "Transport::default_address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "Transport::default_port")]
        port: u16,
    },

    /// Host the MCP server on the configuration, using streamable HTTP messages.
    StreamableHttp {
        /// The IP address to bind to
        #[serde(default = "Transport::default_address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "Transport::default_port")]
        port: u16,
    },
}

impl Transport {
    fn default_address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn default_port() -> u16 {
        5000
    }
}

/// A Hashnode MCP Server
pub struct Server {
    transport: Transport,
    client: Client,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(transport: Transport, client: Client) -> Self {
        Self { transport, client }
    }

    /// Serve until the client disconnects (stdio) or the process is signalled to stop
    pub async fn start(self) -> Result<(), ServerError> {
        info!(endpoint = %self.client.endpoint(), "Using Hashnode GraphQL endpoint");
        let handler = HashnodeMcpServerHandler::new(self.client);

        match self.transport {
            Transport::StreamableHttp { address, port } => {
                info!(port = ?port, address = ?address, "Starting MCP server in Streamable HTTP mode");
                let listen_address = SocketAddr::new(address, port);
                let service = StreamableHttpService::new(
                    move || Ok(handler.clone()),
                    LocalSessionManager::default().into(),
                    Default::default(),
                );
                let router = axum::Router::new().nest_service("/mcp", service);

                let tcp_listener = tokio::net::TcpListener::bind(listen_address).await?;
                axum::serve(tcp_listener, router)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
            Transport::SSE { address, port } => {
                info!(port = ?port, address = ?address, "Starting MCP server in SSE mode");
                let cancellation_token = CancellationToken::new();
                let listen_address = SocketAddr::new(address, port);

                let (server, router) = SseServer::new(SseServerConfig {
                    bind: listen_address,
                    sse_path: "/sse".to_string(),
                    post_path: "/message".to_string(),
                    ct: cancellation_token.clone(),
                    sse_keep_alive: None,
                });

                // Serve the router ourselves so that the listener is bound before any
                // service is attached
                let listener = tokio::net::TcpListener::bind(server.config.bind).await?;
                let ct = server.config.ct.child_token();
                let axum_server =
                    axum::serve(listener, router).with_graceful_shutdown(async move {
                        ct.cancelled().await;
                        info!("MCP server cancelled");
                    });

                let serving = tokio::spawn(
                    async move {
                        if let Err(e) = axum_server.await {
                            error!(error = %e, "MCP server shut down with error");
                        }
                    }
                    .instrument(tracing::info_span!("mcp-server", bind_address = %server.config.bind)),
                );

                server.with_service(move || handler.clone());
                shutdown_signal().await;
                cancellation_token.cancel();
                serving.await?;
            }
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = handler
                    .serve(stdio())
                    .await
                    .inspect_err(|e| {
                        error!("serving error: {:?}", e);
                    })
                    .map_err(Box::new)?;
                service.waiting().await?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C or SIGTERM
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({ "type": "stdio" }), Transport::Stdio)]
    #[case(
        json!({ "type": "sse", "port": 8000 }),
        Transport::SSE { address: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 8000 }
    )]
    #[case(
        json!({ "type": "streamable_http", "address": "0.0.0.0" }),
        Transport::StreamableHttp { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 5000 }
    )]
    fn it_parses_transports(#[case] value: serde_json::Value, #[case] expected: Transport) {
        assert_eq!(serde_json::from_value::<Transport>(value).unwrap(), expected);
    }

    #[test]
    fn unknown_transports_are_rejected() {
        assert!(serde_json::from_value::<Transport>(json!({ "type": "carrier_pigeon" })).is_err());
    }
}
