use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::{Value, json};
use serde::Deserialize;

use super::{failure, parse_input, required, respond};
use crate::format;
use crate::graphql::Client;
use crate::model::UserData;
use crate::queries::GET_USER;
use crate::schema_from_type;

/// The name of the tool to look up a user profile
pub const USER_INFO_TOOL_NAME: &str = "get_user_info";

#[derive(Clone)]
pub struct GetUserInfo {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The Hashnode username, without the @
    username: String,
}

impl GetUserInfo {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                USER_INFO_TOOL_NAME,
                "Get the profile of a Hashnode user: bio, social links, followers and publications",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: Input = match parse_input(USER_INFO_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let username = match required(
            USER_INFO_TOOL_NAME,
            "username",
            input.username.trim_start_matches('@'),
        ) {
            Ok(username) => username,
            Err(result) => return result,
        };

        let context = format!("Error fetching user '{username}'");
        match self
            .client
            .execute::<UserData>(&GET_USER, Some(json!({ "username": username })))
            .await
        {
            Ok(response) => respond(&response, &context, format::user_info(&response, username)),
            Err(error) => failure(&context, &error),
        }
    }
}
