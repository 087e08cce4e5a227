use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::{Value, json};
use serde::Deserialize;

use super::{failure, page_size, parse_input, respond};
use crate::format;
use crate::graphql::Client;
use crate::model::FeedData;
use crate::queries::GET_FEED;
use crate::schema_from_type;

/// The name of the tool to read the global Hashnode feed
pub const FEED_ARTICLES_TOOL_NAME: &str = "get_feed_articles";

/// Which global feed to read
#[derive(JsonSchema, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    #[default]
    Relevant,
    Recent,
    Featured,
}

impl FeedType {
    fn as_str(self) -> &'static str {
        match self {
            FeedType::Relevant => "relevant",
            FeedType::Recent => "recent",
            FeedType::Featured => "featured",
        }
    }

    /// The `FeedType` enum value of the API
    fn as_graphql(self) -> &'static str {
        match self {
            FeedType::Relevant => "RELEVANT",
            FeedType::Recent => "RECENT",
            FeedType::Featured => "FEATURED",
        }
    }
}

fn default_first() -> i64 {
    10
}

#[derive(Clone)]
pub struct GetFeedArticles {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The feed to read. Defaults to "relevant".
    #[serde(default)]
    feed_type: FeedType,

    /// Number of articles to fetch, at most 50. Defaults to 10.
    #[serde(default = "default_first")]
    first: i64,

    /// Cursor for the next page, as returned in a previous page's pagination details
    after: Option<String>,
}

impl GetFeedArticles {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                FEED_ARTICLES_TOOL_NAME,
                "Get articles from the global Hashnode feed: relevant, recent or featured",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: Input = match parse_input(FEED_ARTICLES_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };

        let feed_type = input.feed_type.as_str();
        let variables = json!({
            "first": page_size(input.first),
            "after": input.after,
            "filter": { "type": input.feed_type.as_graphql() },
        });
        let context = format!("Error fetching the {feed_type} feed");
        match self
            .client
            .execute::<FeedData>(&GET_FEED, Some(variables))
            .await
        {
            Ok(response) => respond(
                &response,
                &context,
                format::feed_articles(&response, feed_type),
            ),
            Err(error) => failure(&context, &error),
        }
    }
}
