use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::{Value, json};
use serde::{Deserialize, Serialize};

use super::{failure, page_size, parse_input, required, respond};
use crate::format;
use crate::graphql::Client;
use crate::model::TagData;
use crate::queries::GET_TAG_POSTS;
use crate::schema_from_type;

/// The name of the tool to list articles with a tag
pub const TAG_ARTICLES_TOOL_NAME: &str = "get_tag_articles";

/// How a tag's articles are ordered. Serializes as the API's `TagPostsSort`.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Recent,
    Popular,
    Trending,
}

/// The slug for a tag given by name, slug or `#hashtag`
fn slug_of(tag: &str) -> String {
    tag.trim()
        .trim_start_matches('#')
        .trim()
        .to_lowercase()
        .replace(' ', "-")
}

fn default_first() -> i64 {
    10
}

#[derive(Clone)]
pub struct GetTagArticles {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The tag, by name or slug, e.g. "rust" or "Web Development"
    tag: String,

    /// How to order the articles. Defaults to "recent".
    #[serde(default)]
    sort_by: SortBy,

    /// Number of articles to fetch, at most 50. Defaults to 10.
    #[serde(default = "default_first")]
    first: i64,

    /// Cursor for the next page, as returned in a previous page's pagination details
    after: Option<String>,
}

impl GetTagArticles {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                TAG_ARTICLES_TOOL_NAME,
                "Get Hashnode articles with a given tag, ordered by recency, popularity or trend",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: Input = match parse_input(TAG_ARTICLES_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let slug = match required(TAG_ARTICLES_TOOL_NAME, "tag", &slug_of(&input.tag)) {
            Ok(slug) => slug.to_string(),
            Err(result) => return result,
        };

        let variables = json!({
            "slug": slug,
            "first": page_size(input.first),
            "after": input.after,
            "filter": { "sortBy": input.sort_by },
        });
        let context = format!("Error fetching articles tagged '{slug}'");
        match self
            .client
            .execute::<TagData>(&GET_TAG_POSTS, Some(variables))
            .await
        {
            Ok(response) => respond(&response, &context, format::tag_articles(&response, &slug)),
            Err(error) => failure(&context, &error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::test_support::client_for;
    use crate::tools::test_support::text_of;
    use mockito::Matcher;
    use rstest::rstest;

    #[rstest]
    #[case("rust", "rust")]
    #[case("#Rust", "rust")]
    #[case("Web Development", "web-development")]
    #[case(" #rust", "rust")]
    #[case(" # ", "")]
    fn it_derives_slugs(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(slug_of(tag), expected);
    }

    #[tokio::test]
    async fn it_lists_popular_articles_for_a_tag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Json(json!({
                "query": GET_TAG_POSTS.source,
                "variables": {
                    "slug": "web-development",
                    "first": 2,
                    "after": null,
                    "filter": { "sortBy": "popular" }
                }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "data": {
                        "tag": {
                            "name": "Web Development",
                            "slug": "web-development",
                            "postsCount": 1200,
                            "posts": { "edges": [{ "node": { "id": "p1", "title": "CSS Grid" } }] }
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = GetTagArticles::new(client_for(&server))
            .execute(json!({ "tag": "Web Development", "sort_by": "popular", "first": 2 }))
            .await;

        mock.assert_async().await;
        assert!(text_of(&result).starts_with(
            "# Articles tagged #Web Development\n\nTotal Posts: 1200\n\n## CSS Grid\nID: p1\n"
        ));
    }

    #[tokio::test]
    async fn unknown_tags_are_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"data":{"tag":null}}"#)
            .create_async()
            .await;

        let result = GetTagArticles::new(client_for(&server))
            .execute(json!({ "tag": "nope" }))
            .await;

        assert_eq!(result.is_error, None);
        assert_eq!(text_of(&result), "No tag found with slug 'nope'.");
    }

    #[tokio::test]
    async fn blank_tags_are_rejected() {
        let server = mockito::Server::new_async().await;
        let result = GetTagArticles::new(client_for(&server))
            .execute(json!({ "tag": "#" }))
            .await;

        assert_eq!(
            text_of(&result),
            "Invalid arguments for get_tag_articles: `tag` must not be empty"
        );
    }
}
