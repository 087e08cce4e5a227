use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::Value;
use rmcp::schemars;
use serde::Deserialize;

use super::{failure, parse_input, respond};
use crate::format;
use crate::graphql::Client;
use crate::queries::TEST_CONNECTION;
use crate::schema_from_type;

/// The name of the tool to check the API is reachable
pub const TEST_CONNECTION_TOOL_NAME: &str = "test_api_connection";

#[derive(Clone)]
pub struct TestConnection {
    pub tool: Tool,
    client: Client,
}

/// Input for the connection test, which takes no arguments
#[derive(JsonSchema, Deserialize)]
pub struct Input {}

impl TestConnection {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                TEST_CONNECTION_TOOL_NAME,
                "Test the connection to the Hashnode API",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        if let Err(result) = parse_input::<Input>(TEST_CONNECTION_TOOL_NAME, input) {
            return result;
        }

        let context = "API connection failed";
        match self.client.execute::<Value>(&TEST_CONNECTION, None).await {
            Ok(response) => respond(&response, context, format::connection_test(&response)),
            Err(error) => failure(context, &error),
        }
    }
}
