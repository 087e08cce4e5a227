use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::{Value, json};
use serde::Deserialize;
use tracing::debug;

use super::{failure, page_size, parse_input, required, respond, text};
use crate::format::{self, render_errors};
use crate::graphql::Client;
use crate::model::PublicationData;
use crate::queries::{GET_PUBLICATION_ID, GET_PUBLICATION_POSTS};
use crate::schema_from_type;

/// The name of the tool to list the posts of a publication
pub const PUBLICATION_POSTS_TOOL_NAME: &str = "get_publication_posts";

/// The name of the tool to resolve a hostname to a publication id
pub const PUBLICATION_ID_TOOL_NAME: &str = "get_publication_id";

fn default_posts() -> i64 {
    5
}

#[derive(Clone)]
pub struct GetPublicationPosts {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct PostsInput {
    /// The hostname of the publication, e.g. "blog.example.com"
    host: String,

    /// Number of posts to fetch, at most 50. Defaults to 5.
    #[serde(default = "default_posts")]
    first: i64,
}

impl GetPublicationPosts {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                PUBLICATION_POSTS_TOOL_NAME,
                "Fetch posts from a specific publication on Hashnode, by hostname",
                schema_from_type!(PostsInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: PostsInput = match parse_input(PUBLICATION_POSTS_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let host = match required(PUBLICATION_POSTS_TOOL_NAME, "host", &input.host) {
            Ok(host) => host,
            Err(result) => return result,
        };

        let context = format!("Error fetching posts from publication '{host}'");
        let variables = json!({ "host": host, "first": page_size(input.first) });
        match self
            .client
            .execute::<PublicationData>(&GET_PUBLICATION_POSTS, Some(variables))
            .await
        {
            Ok(response) => respond(
                &response,
                &context,
                format::publication_posts(&response, host),
            ),
            Err(error) => failure(&context, &error),
        }
    }
}

#[derive(Clone)]
pub struct GetPublicationId {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct IdInput {
    /// The hostname of the publication, e.g. "blog.example.com"
    host: String,
}

impl GetPublicationId {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                PUBLICATION_ID_TOOL_NAME,
                "Get the ID of a Hashnode publication from its hostname",
                schema_from_type!(IdInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: IdInput = match parse_input(PUBLICATION_ID_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let host = match required(PUBLICATION_ID_TOOL_NAME, "host", &input.host) {
            Ok(host) => host,
            Err(result) => return result,
        };

        let context = format!("Error getting publication ID for '{host}'");
        match self
            .client
            .execute::<PublicationData>(&GET_PUBLICATION_ID, Some(json!({ "host": host })))
            .await
        {
            Ok(response) => respond(&response, &context, format::publication_id(&response, host)),
            Err(error) => failure(&context, &error),
        }
    }
}

/// A publication resolved from its hostname
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolved {
    pub(crate) id: String,
    pub(crate) title: String,
}

/// Look up the publication behind `host`.
///
/// Any outcome other than a publication with an id is returned as the
/// finished tool result, so the caller never makes its dependent call.
pub(crate) async fn resolve(
    client: &Client,
    host: &str,
    failure_context: impl std::fmt::Display,
) -> Result<Resolved, CallToolResult> {
    let response = client
        .execute::<PublicationData>(&GET_PUBLICATION_ID, Some(json!({ "host": host })))
        .await
        .map_err(|error| failure(&failure_context, &error))?;

    if let Some(errors) = response.errors() {
        return Err(respond(&response, &failure_context, render_errors(errors)));
    }

    let Some(publication) = response.data.and_then(|data| data.publication) else {
        return Err(text(format!("No publication found for hostname '{host}'.")));
    };
    let title = publication
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_string());
    let Some(id) = publication.id.filter(|id| !id.trim().is_empty()) else {
        return Err(text(format!(
            "Could not find ID for publication '{title}' with hostname '{host}'."
        )));
    };

    debug!(%host, publication_id = %id, "Resolved publication");
    Ok(Resolved { id, title })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::test_support::client_for;
    use crate::tools::test_support::text_of;
    use insta::assert_snapshot;
    use mockito::Matcher;

    #[tokio::test]
    async fn it_resolves_a_publication_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(
                json!({ "variables": { "host": "blog.example.com" } }),
            ))
            .with_status(200)
            .with_body(
                json!({
                    "data": {
                        "publication": { "id": "test-publication-id", "title": "Test Publication" }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = GetPublicationId::new(client_for(&server))
            .execute(json!({ "host": "blog.example.com" }))
            .await;

        mock.assert_async().await;
        assert_eq!(result.is_error, None);
        assert_eq!(
            text_of(&result),
            "Publication: Test Publication\nID: test-publication-id"
        );
    }

    #[tokio::test]
    async fn unknown_hosts_are_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"data":{"publication":null}}"#)
            .create_async()
            .await;

        let result = GetPublicationId::new(client_for(&server))
            .execute(json!({ "host": "nowhere.example.com" }))
            .await;

        assert_eq!(result.is_error, None);
        assert_eq!(
            text_of(&result),
            "No publication found for hostname 'nowhere.example.com'."
        );
    }

    #[tokio::test]
    async fn it_fetches_publication_posts_with_a_clamped_page_size() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "query": GET_PUBLICATION_POSTS.source,
                "variables": { "host": "blog.example.com", "first": 50 }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "data": {
                        "publication": {
                            "id": "pub-1",
                            "title": "Test Publication",
                            "isTeam": false,
                            "posts": {
                                "edges": [{
                                    "node": {
                                        "id": "post-1",
                                        "title": "Test Post 1",
                                        "brief": "This is a test post",
                                        "url": "https://blog.example.com/test-post-1",
                                        "publishedAt": "2023-01-01T00:00:00Z",
                                        "author": { "name": "Test Author" }
                                    },
                                    "cursor": "c1"
                                }],
                                "pageInfo": { "hasNextPage": false, "endCursor": "c1" }
                            }
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = GetPublicationPosts::new(client_for(&server))
            .execute(json!({ "host": "blog.example.com", "first": 200 }))
            .await;

        mock.assert_async().await;
        assert_snapshot!(text_of(&result), @r"
        # Publication: Test Publication

        ID: pub-1
        Team Publication: No

        ## Posts

        ### Test Post 1
        ID: post-1
        URL: https://blog.example.com/test-post-1
        Date: Jan 01, 2023
        Author: Test Author
        Brief: This is a test post

        ## Pagination
        Has Next Page: false
        ");
    }

    #[tokio::test]
    async fn transport_failures_name_the_host() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let result = GetPublicationPosts::new(client_for(&server))
            .execute(json!({ "host": "blog.example.com" }))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Error fetching posts from publication 'blog.example.com': HTTP status 500 Internal Server Error\nResponse content: boom"
        );
    }

    #[tokio::test]
    async fn missing_host_is_rejected_without_a_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let result = GetPublicationId::new(client_for(&server))
            .execute(json!({}))
            .await;

        mock.assert_async().await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Invalid arguments for get_publication_id: missing field `host`"));
    }
}
