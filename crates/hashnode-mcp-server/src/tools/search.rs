use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::{Value, json};
use serde::Deserialize;

use super::publication::resolve;
use super::{failure, page_size, parse_input, required, respond};
use crate::format;
use crate::graphql::Client;
use crate::model::SearchData;
use crate::queries::SEARCH_POSTS_OF_PUBLICATION;
use crate::schema_from_type;

/// The name of the tool to search within a publication by id
pub const SEARCH_OF_PUBLICATION_TOOL_NAME: &str = "search_posts_of_publication";

/// The name of the tool to search within a publication by hostname
pub const SEARCH_BY_HOSTNAME_TOOL_NAME: &str = "search_posts_by_hostname";

/// Search results are always newest first
pub(crate) const SORT_BY: &str = "DATE_PUBLISHED_DESC";

fn default_first() -> i64 {
    10
}

/// Run the search and format its results
pub(crate) async fn search(
    client: &Client,
    publication_id: &str,
    query: &str,
    first: i64,
    after: Option<&str>,
    failure_context: impl std::fmt::Display,
) -> CallToolResult {
    let variables = json!({
        "first": page_size(first),
        "after": after,
        "sortBy": SORT_BY,
        "filter": { "publicationId": publication_id, "query": query },
    });
    match client
        .execute::<SearchData>(&SEARCH_POSTS_OF_PUBLICATION, Some(variables))
        .await
    {
        Ok(response) => respond(
            &response,
            failure_context,
            format::search_results(&response, query),
        ),
        Err(error) => failure(failure_context, &error),
    }
}

#[derive(Clone)]
pub struct SearchPostsOfPublication {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct ByIdInput {
    /// The ID of the publication to search within
    publication_id: String,

    /// The search query
    query: String,

    /// Number of posts to fetch, at most 50. Defaults to 10.
    #[serde(default = "default_first")]
    first: i64,

    /// Cursor for the next page, as returned in a previous page's pagination details
    after: Option<String>,
}

impl SearchPostsOfPublication {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                SEARCH_OF_PUBLICATION_TOOL_NAME,
                "Search for posts within a specific Hashnode publication, by publication ID. \
                Use `get_publication_id` to find the ID of a publication.",
                schema_from_type!(ByIdInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: ByIdInput = match parse_input(SEARCH_OF_PUBLICATION_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let (publication_id, query) = match (
            required(
                SEARCH_OF_PUBLICATION_TOOL_NAME,
                "publication_id",
                &input.publication_id,
            ),
            required(SEARCH_OF_PUBLICATION_TOOL_NAME, "query", &input.query),
        ) {
            (Ok(publication_id), Ok(query)) => (publication_id, query),
            (Err(result), _) | (_, Err(result)) => return result,
        };

        search(
            &self.client,
            publication_id,
            query,
            input.first,
            input.after.as_deref(),
            format!("Error searching for '{query}' in publication '{publication_id}'"),
        )
        .await
    }
}

#[derive(Clone)]
pub struct SearchPostsByHostname {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct ByHostnameInput {
    /// The hostname of the publication, e.g. "blog.example.com"
    host: String,

    /// The search query
    query: String,

    /// Number of posts to fetch, at most 50. Defaults to 10.
    #[serde(default = "default_first")]
    first: i64,

    /// Cursor for the next page, as returned in a previous page's pagination details
    after: Option<String>,
}

impl SearchPostsByHostname {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                SEARCH_BY_HOSTNAME_TOOL_NAME,
                "Search for posts within a Hashnode publication, by hostname",
                schema_from_type!(ByHostnameInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: ByHostnameInput = match parse_input(SEARCH_BY_HOSTNAME_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let (host, query) = match (
            required(SEARCH_BY_HOSTNAME_TOOL_NAME, "host", &input.host),
            required(SEARCH_BY_HOSTNAME_TOOL_NAME, "query", &input.query),
        ) {
            (Ok(host), Ok(query)) => (host, query),
            (Err(result), _) | (_, Err(result)) => return result,
        };

        let failure_context =
            format!("Error searching for '{query}' in publication with hostname '{host}'");
        let publication = match resolve(&self.client, host, &failure_context).await {
            Ok(publication) => publication,
            Err(result) => return result,
        };

        search(
            &self.client,
            &publication.id,
            query,
            input.first,
            input.after.as_deref(),
            failure_context,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::test_support::client_for;
    use crate::queries::GET_PUBLICATION_ID;
    use crate::tools::test_support::text_of;
    use insta::assert_snapshot;
    use mockito::Matcher;

    fn search_response() -> String {
        json!({
            "data": {
                "searchPostsOfPublication": {
                    "edges": [{
                        "node": {
                            "id": "post-1",
                            "title": "Async Rust",
                            "brief": "Futures all the way down",
                            "url": "https://blog.example.com/async-rust",
                            "author": { "name": "Ada", "username": "ada" }
                        },
                        "cursor": "c1"
                    }],
                    "pageInfo": { "hasNextPage": true, "endCursor": "c1" }
                }
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn it_searches_a_publication_by_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Json(json!({
                "query": SEARCH_POSTS_OF_PUBLICATION.source,
                "variables": {
                    "first": 3,
                    "after": "c0",
                    "sortBy": "DATE_PUBLISHED_DESC",
                    "filter": { "publicationId": "pub-1", "query": "async" }
                }
            })))
            .with_status(200)
            .with_body(search_response())
            .create_async()
            .await;

        let result = SearchPostsOfPublication::new(client_for(&server))
            .execute(json!({ "publication_id": "pub-1", "query": "async", "first": 3, "after": "c0" }))
            .await;

        mock.assert_async().await;
        assert_snapshot!(text_of(&result), @r"
        # Search Results for 'async'

        ## Async Rust
        ID: post-1
        URL: https://blog.example.com/async-rust
        Author: Ada
        Author Username: ada
        Brief: Futures all the way down

        ## Pagination
        Has Next Page: true
        End Cursor: c1
        ");
    }

    #[tokio::test]
    async fn hostname_search_resolves_then_searches() {
        let mut server = mockito::Server::new_async().await;
        let lookup = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "query": GET_PUBLICATION_ID.source })))
            .with_status(200)
            .with_body(r#"{"data":{"publication":{"id":"pub-1","title":"Test Publication"}}}"#)
            .create_async()
            .await;
        let search = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "first": 10, "filter": { "publicationId": "pub-1", "query": "async" } }
            })))
            .with_status(200)
            .with_body(search_response())
            .create_async()
            .await;

        let result = SearchPostsByHostname::new(client_for(&server))
            .execute(json!({ "host": "blog.example.com", "query": "async" }))
            .await;

        lookup.assert_async().await;
        search.assert_async().await;
        assert!(text_of(&result).starts_with("# Search Results for 'async'\n\n## Async Rust\n"));
    }

    #[tokio::test]
    async fn hostname_search_never_searches_an_unknown_publication() {
        let mut server = mockito::Server::new_async().await;
        let lookup = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "query": GET_PUBLICATION_ID.source })))
            .with_status(200)
            .with_body(r#"{"data":{"publication":null}}"#)
            .create_async()
            .await;
        let search = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(
                json!({ "query": SEARCH_POSTS_OF_PUBLICATION.source }),
            ))
            .expect(0)
            .create_async()
            .await;

        let result = SearchPostsByHostname::new(client_for(&server))
            .execute(json!({ "host": "missing.example.com", "query": "async" }))
            .await;

        lookup.assert_async().await;
        search.assert_async().await;
        assert_eq!(result.is_error, None);
        assert_eq!(
            text_of(&result),
            "No publication found for hostname 'missing.example.com'."
        );
    }

    #[tokio::test]
    async fn failed_lookups_name_the_query_and_host() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let result = SearchPostsByHostname::new(client_for(&server))
            .execute(json!({ "host": "blog.example.com", "query": "async" }))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Error searching for 'async' in publication with hostname 'blog.example.com': HTTP status 401 Unauthorized\nResponse content: Unauthorized"
        );
    }

    #[tokio::test]
    async fn lookup_errors_name_the_query_and_host() {
        let mut server = mockito::Server::new_async().await;
        let lookup = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "query": GET_PUBLICATION_ID.source })))
            .with_status(200)
            .with_body(r#"{"data":null,"errors":[{"message":"Rate limited"}]}"#)
            .create_async()
            .await;
        let search = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(
                json!({ "query": SEARCH_POSTS_OF_PUBLICATION.source }),
            ))
            .expect(0)
            .create_async()
            .await;

        let result = SearchPostsByHostname::new(client_for(&server))
            .execute(json!({ "host": "blog.example.com", "query": "async" }))
            .await;

        lookup.assert_async().await;
        search.assert_async().await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            r#"Error searching for 'async' in publication with hostname 'blog.example.com': API returned errors: [{"message":"Rate limited"}]"#
        );
    }

    #[tokio::test]
    async fn empty_queries_are_rejected() {
        let server = mockito::Server::new_async().await;
        let result = SearchPostsOfPublication::new(client_for(&server))
            .execute(json!({ "publication_id": "pub-1", "query": "" }))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Invalid arguments for search_posts_of_publication: `query` must not be empty"
        );
    }
}
