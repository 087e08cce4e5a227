//! The tools exposed to the calling agent
//!
//! Every tool follows the same pipeline: validate the arguments, resolve any
//! prerequisite, build the variables, execute, then format. Failures never
//! escape as MCP errors. They become text results, flagged as errors when the
//! upstream call failed.

pub(crate) mod articles;
pub(crate) mod connection;
pub(crate) mod feed;
pub(crate) mod publication;
pub(crate) mod search;
pub(crate) mod tag;
pub(crate) mod user;

use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::serde_json::{self, Value};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::TransportError;
use crate::graphql::Client;
use crate::model::ApiResponse;

use articles::{CreateArticle, GetArticleDetails, GetLatestArticles, UpdateArticle};
use connection::TestConnection;
use feed::GetFeedArticles;
use publication::{GetPublicationId, GetPublicationPosts};
use search::{SearchPostsByHostname, SearchPostsOfPublication};
use tag::GetTagArticles;
use user::GetUserInfo;

/// The largest page Hashnode will return
pub const MAX_PAGE_SIZE: i64 = 50;

/// Clamp a requested page size to what the API accepts
pub fn page_size(requested: i64) -> i64 {
    requested.clamp(1, MAX_PAGE_SIZE)
}

/// Deserialize tool arguments, treating absent arguments as an empty object
pub(crate) fn parse_input<T: DeserializeOwned>(
    tool: &str,
    input: Value,
) -> Result<T, CallToolResult> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|error| invalid_arguments(tool, error))
}

/// Reject a required string argument that is empty or blank
pub(crate) fn required<'a>(
    tool: &str,
    field: &str,
    value: &'a str,
) -> Result<&'a str, CallToolResult> {
    let value = value.trim();
    if value.is_empty() {
        Err(invalid_arguments(tool, format!("`{field}` must not be empty")))
    } else {
        Ok(value)
    }
}

pub(crate) fn invalid_arguments(tool: &str, reason: impl std::fmt::Display) -> CallToolResult {
    warn!(tool, %reason, "Rejected tool arguments");
    CallToolResult {
        content: vec![Content::text(format!(
            "Invalid arguments for {tool}: {reason}"
        ))],
        is_error: Some(true),
    }
}

/// A plain text result
pub(crate) fn text(text: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(text.into())],
        is_error: None,
    }
}

/// A formatted response.
///
/// When the API reported errors, `text` is the rendered error payload: it is
/// prefixed with `context` and flagged as an error.
pub(crate) fn respond<T>(
    response: &ApiResponse<T>,
    context: impl std::fmt::Display,
    text: String,
) -> CallToolResult {
    if response.errors().is_none() {
        return CallToolResult {
            content: vec![Content::text(text)],
            is_error: None,
        };
    }
    warn!(%context, "GraphQL response carried errors");
    CallToolResult {
        content: vec![Content::text(format!("{context}: {text}"))],
        is_error: Some(true),
    }
}

/// A failed upstream call, described with the input that was being acted on
pub(crate) fn failure(context: impl std::fmt::Display, error: &TransportError) -> CallToolResult {
    warn!(%error, "GraphQL request failed");
    CallToolResult {
        content: vec![Content::text(format!("{context}: {error}"))],
        is_error: Some(true),
    }
}

/// Every tool, built once at startup
#[derive(Clone)]
pub struct Tools {
    pub(crate) test_connection: TestConnection,
    pub(crate) publication_posts: GetPublicationPosts,
    pub(crate) publication_id: GetPublicationId,
    pub(crate) search_of_publication: SearchPostsOfPublication,
    pub(crate) search_by_hostname: SearchPostsByHostname,
    pub(crate) latest_articles: GetLatestArticles,
    pub(crate) create_article: CreateArticle,
    pub(crate) update_article: UpdateArticle,
    pub(crate) article_details: GetArticleDetails,
    pub(crate) user_info: GetUserInfo,
    pub(crate) feed_articles: GetFeedArticles,
    pub(crate) tag_articles: GetTagArticles,
}

impl Tools {
    pub fn new(client: Client) -> Self {
        Self {
            test_connection: TestConnection::new(client.clone()),
            publication_posts: GetPublicationPosts::new(client.clone()),
            publication_id: GetPublicationId::new(client.clone()),
            search_of_publication: SearchPostsOfPublication::new(client.clone()),
            search_by_hostname: SearchPostsByHostname::new(client.clone()),
            latest_articles: GetLatestArticles::new(client.clone()),
            create_article: CreateArticle::new(client.clone()),
            update_article: UpdateArticle::new(client.clone()),
            article_details: GetArticleDetails::new(client.clone()),
            user_info: GetUserInfo::new(client.clone()),
            feed_articles: GetFeedArticles::new(client.clone()),
            tag_articles: GetTagArticles::new(client),
        }
    }

    /// The descriptors of every tool, in a stable order
    pub fn list(&self) -> Vec<Tool> {
        vec![
            self.test_connection.tool.clone(),
            self.publication_posts.tool.clone(),
            self.publication_id.tool.clone(),
            self.search_of_publication.tool.clone(),
            self.search_by_hostname.tool.clone(),
            self.latest_articles.tool.clone(),
            self.create_article.tool.clone(),
            self.update_article.tool.clone(),
            self.article_details.tool.clone(),
            self.user_info.tool.clone(),
            self.feed_articles.tool.clone(),
            self.tag_articles.tool.clone(),
        ]
    }

    /// Run the named tool, or `None` if there is no such tool
    pub async fn call(&self, name: &str, input: Value) -> Option<CallToolResult> {
        let result = match name {
            connection::TEST_CONNECTION_TOOL_NAME => self.test_connection.execute(input).await,
            publication::PUBLICATION_POSTS_TOOL_NAME => {
                self.publication_posts.execute(input).await
            }
            publication::PUBLICATION_ID_TOOL_NAME => self.publication_id.execute(input).await,
            search::SEARCH_OF_PUBLICATION_TOOL_NAME => {
                self.search_of_publication.execute(input).await
            }
            search::SEARCH_BY_HOSTNAME_TOOL_NAME => self.search_by_hostname.execute(input).await,
            articles::LATEST_ARTICLES_TOOL_NAME => self.latest_articles.execute(input).await,
            articles::CREATE_ARTICLE_TOOL_NAME => self.create_article.execute(input).await,
            articles::UPDATE_ARTICLE_TOOL_NAME => self.update_article.execute(input).await,
            articles::ARTICLE_DETAILS_TOOL_NAME => self.article_details.execute(input).await,
            user::USER_INFO_TOOL_NAME => self.user_info.execute(input).await,
            feed::FEED_ARTICLES_TOOL_NAME => self.feed_articles.execute(input).await,
            tag::TAG_ARTICLES_TOOL_NAME => self.tag_articles.execute(input).await,
            _ => return None,
        };
        Some(result)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::text_of;
    use super::*;
    use crate::graphql::test_support::client_for;
    use rmcp::serde_json::json;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(-3, 1)]
    #[case(1, 1)]
    #[case(10, 10)]
    #[case(50, 50)]
    #[case(500, 50)]
    fn page_sizes_are_clamped(#[case] requested: i64, #[case] expected: i64) {
        assert_eq!(page_size(requested), expected);
    }

    #[test]
    fn blank_required_strings_are_rejected() {
        let result = required("get_user_info", "username", "   ").unwrap_err();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Invalid arguments for get_user_info: `username` must not be empty"
        );
        assert_eq!(required("get_user_info", "username", " ada ").unwrap(), "ada");
    }

    #[tokio::test]
    async fn it_lists_every_tool_with_an_object_schema() {
        let server = mockito::Server::new_async().await;
        let tools = Tools::new(client_for(&server));

        let names: Vec<_> = tools.list().iter().map(|tool| tool.name.to_string()).collect();
        insta::assert_debug_snapshot!(names, @r#"
        [
            "test_api_connection",
            "get_publication_posts",
            "get_publication_id",
            "search_posts_of_publication",
            "search_posts_by_hostname",
            "get_latest_articles",
            "create_article",
            "update_article",
            "get_article_details",
            "get_user_info",
            "get_feed_articles",
            "get_tag_articles",
        ]
        "#);
        for tool in tools.list() {
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "{} has no object schema",
                tool.name
            );
        }
    }

    #[tokio::test]
    async fn unknown_tools_are_not_dispatched() {
        let server = mockito::Server::new_async().await;
        let tools = Tools::new(client_for(&server));
        assert!(tools.call("delete_everything", json!({})).await.is_none());
    }

    #[tokio::test]
    async fn ill_typed_arguments_are_reported_as_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;
        let tools = Tools::new(client_for(&server));

        let result = tools
            .call("get_publication_posts", json!({ "host": "blog.example.com", "first": "five" }))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Invalid arguments for get_publication_posts: "));
    }
}
