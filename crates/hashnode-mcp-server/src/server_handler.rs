use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::serde_json::Value;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use tracing::{debug, info};

use crate::errors::McpError;
use crate::graphql::Client;
use crate::tools::Tools;

const INSTRUCTIONS: &str = "\
# Hashnode API Server

This server gives access to Hashnode content: publications, articles, users, \
the global feed and tags.

## When to use what
- Check the API is reachable: `test_api_connection`
- Posts of a publication by hostname: `get_publication_posts`
- Newest articles of a publication: `get_latest_articles`
- Find a publication's ID: `get_publication_id`
- Search a publication: `search_posts_by_hostname`, or `search_posts_of_publication` with an ID
- Read one article: `get_article_details`
- A user's profile: `get_user_info`
- Browse Hashnode: `get_feed_articles`, `get_tag_articles`
- Write: `create_article` and `update_article` (requires a personal access token)

Paginated tools return an end cursor; pass it as `after` to fetch the next page.";

/// Serves the Hashnode tools over MCP
#[derive(Clone)]
pub struct HashnodeMcpServerHandler {
    tools: Tools,
}

impl HashnodeMcpServerHandler {
    pub fn new(client: Client) -> Self {
        Self {
            tools: Tools::new(client),
        }
    }
}

impl ServerHandler for HashnodeMcpServerHandler {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = %request.name, "Calling tool");
        let result = self
            .tools
            .call(&request.name, Value::from(request.arguments.clone()))
            .await
            .ok_or_else(|| tool_not_found(&request.name))?;
        debug!(tool = %request.name, is_error = ?result.is_error, "Tool call finished");
        Ok(result)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools.list(),
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "Hashnode MCP Server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::test_support::client_for;

    #[tokio::test]
    async fn it_advertises_tools_and_instructions() {
        let server = mockito::Server::new_async().await;
        let info = HashnodeMcpServerHandler::new(client_for(&server)).get_info();

        assert_eq!(info.server_info.name, "Hashnode MCP Server");
        assert!(info.capabilities.tools.is_some());
        let instructions = info.instructions.unwrap();
        for tool in Tools::new(client_for(&server)).list() {
            assert!(
                instructions.contains(tool.name.as_ref()),
                "{} is missing from the instructions",
                tool.name
            );
        }
    }

    #[test]
    fn unknown_tools_are_method_not_found() {
        let error = tool_not_found("nope");
        assert_eq!(error.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Tool nope not found");
    }
}
