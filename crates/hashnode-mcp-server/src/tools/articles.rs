use chrono::{SecondsFormat, Utc};
use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::{Value, json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::publication::resolve;
use super::search::SORT_BY;
use super::{failure, page_size, parse_input, required, respond, text};
use crate::format::{self, render_errors};
use crate::graphql::Client;
use crate::model::{MeData, PostData, PublishPostData, SearchData, UpdatePostData};
use crate::queries::{
    GET_MY_PUBLICATIONS, GET_POST, PUBLISH_POST, SEARCH_POSTS_OF_PUBLICATION, UPDATE_POST,
};
use crate::schema_from_type;

/// The name of the tool to create an article
pub const CREATE_ARTICLE_TOOL_NAME: &str = "create_article";

/// The name of the tool to update an article
pub const UPDATE_ARTICLE_TOOL_NAME: &str = "update_article";

/// The name of the tool to fetch one article in full
pub const ARTICLE_DETAILS_TOOL_NAME: &str = "get_article_details";

/// The name of the tool to list the newest articles of a publication
pub const LATEST_ARTICLES_TOOL_NAME: &str = "get_latest_articles";

const NO_PUBLICATIONS: &str = "Could not find user's publications. \
    Please make sure you have a publication set up on Hashnode.";

/// A tag as accepted by the post mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInput {
    pub name: String,
    pub slug: String,
}

/// Split a comma separated tag list into mutation tags.
///
/// Names are trimmed and blank entries dropped. The slug is the lowercased
/// name with spaces replaced by hyphens; tag ids are never looked up.
pub fn parse_tags(tags: &str) -> Vec<TagInput> {
    tags.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| TagInput {
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
        })
        .collect()
}

/// The current UTC time, as stamped into `publishedAt`
fn publish_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The `input` of `publishPost` and `updatePost`
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    content_markdown: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    publication_id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<TagInput>,
}

/// The id of the acting user's first publication.
///
/// Anything else is returned as the finished tool result.
async fn my_publication(
    client: &Client,
    failure_context: &str,
) -> Result<String, CallToolResult> {
    let response = client
        .execute::<MeData>(&GET_MY_PUBLICATIONS, None)
        .await
        .map_err(|error| failure(failure_context, &error))?;

    if let Some(errors) = response.errors() {
        return Err(respond(&response, failure_context, render_errors(errors)));
    }

    let publication_id = response
        .data
        .and_then(|data| data.me)
        .and_then(|me| me.publications)
        .and_then(|publications| {
            publications
                .nodes()
                .find_map(|publication| publication.id.clone())
        })
        .filter(|id| !id.trim().is_empty());

    match publication_id {
        Some(id) => {
            debug!(publication_id = %id, "Found the acting user's publication");
            Ok(id)
        }
        None => Err(text(NO_PUBLICATIONS)),
    }
}

#[derive(Clone)]
pub struct CreateArticle {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct CreateInput {
    /// The title of the article
    title: String,

    /// The content of the article, in markdown
    body_markdown: String,

    /// Comma separated list of tags, e.g. "python,tutorial,webdev"
    #[serde(default)]
    tags: String,

    /// Publish immediately (true) or save as a draft (false)
    #[serde(default)]
    published: bool,
}

impl CreateArticle {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                CREATE_ARTICLE_TOOL_NAME,
                "Create a new article in your first Hashnode publication, \
                either published immediately or saved as a draft",
                schema_from_type!(CreateInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: CreateInput = match parse_input(CREATE_ARTICLE_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let (title, body) = match (
            required(CREATE_ARTICLE_TOOL_NAME, "title", &input.title),
            required(CREATE_ARTICLE_TOOL_NAME, "body_markdown", &input.body_markdown),
        ) {
            (Ok(title), Ok(body)) => (title, body),
            (Err(result), _) | (_, Err(result)) => return result,
        };

        let failure_context = format!("Error creating article '{title}'");
        let publication_id = match my_publication(&self.client, &failure_context).await {
            Ok(id) => id,
            Err(result) => return result,
        };

        let post = PostInput {
            title: Some(title),
            content_markdown: Some(body),
            publication_id: Some(&publication_id),
            published_at: input.published.then(publish_now),
            tags: parse_tags(&input.tags),
            ..Default::default()
        };
        info!(%title, published = input.published, "Creating article");
        match self
            .client
            .execute::<PublishPostData>(&PUBLISH_POST, Some(json!({ "input": post })))
            .await
        {
            Ok(response) => respond(
                &response,
                &failure_context,
                format::article_created(&response, title),
            ),
            Err(error) => failure(&failure_context, &error),
        }
    }
}

#[derive(Clone)]
pub struct UpdateArticle {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct UpdateInput {
    /// The ID of the article to update
    article_id: String,

    /// New title for the article
    title: Option<String>,

    /// New content for the article, in markdown
    body_markdown: Option<String>,

    /// New comma separated list of tags
    tags: Option<String>,

    /// Set to true to publish the article now
    published: Option<bool>,
}

impl UpdateArticle {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                UPDATE_ARTICLE_TOOL_NAME,
                "Update an existing Hashnode article. Only the fields provided are changed.",
                schema_from_type!(UpdateInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: UpdateInput = match parse_input(UPDATE_ARTICLE_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let article_id = match required(UPDATE_ARTICLE_TOOL_NAME, "article_id", &input.article_id)
        {
            Ok(article_id) => article_id,
            Err(result) => return result,
        };

        let post = PostInput {
            id: Some(article_id),
            title: input.title.as_deref(),
            content_markdown: input.body_markdown.as_deref(),
            published_at: input.published.unwrap_or(false).then(publish_now),
            tags: input.tags.as_deref().map(parse_tags).unwrap_or_default(),
            ..Default::default()
        };
        if post.title.is_none()
            && post.content_markdown.is_none()
            && post.published_at.is_none()
            && post.tags.is_empty()
        {
            return text(format!("No changes provided for article '{article_id}'."));
        }

        let failure_context = format!("Error updating article with ID '{article_id}'");
        if let Err(result) = my_publication(&self.client, &failure_context).await {
            return result;
        }

        info!(%article_id, "Updating article");
        match self
            .client
            .execute::<UpdatePostData>(&UPDATE_POST, Some(json!({ "input": post })))
            .await
        {
            Ok(response) => respond(
                &response,
                &failure_context,
                format::article_updated(&response, article_id),
            ),
            Err(error) => failure(&failure_context, &error),
        }
    }
}

#[derive(Clone)]
pub struct GetArticleDetails {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct DetailsInput {
    /// The ID of the article
    article_id: String,
}

impl GetArticleDetails {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                ARTICLE_DETAILS_TOOL_NAME,
                "Get the details of a Hashnode article, including a preview of its content",
                schema_from_type!(DetailsInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: DetailsInput = match parse_input(ARTICLE_DETAILS_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let article_id =
            match required(ARTICLE_DETAILS_TOOL_NAME, "article_id", &input.article_id) {
                Ok(article_id) => article_id,
                Err(result) => return result,
            };

        let context = format!("Error fetching article with ID '{article_id}'");
        match self
            .client
            .execute::<PostData>(&GET_POST, Some(json!({ "id": article_id })))
            .await
        {
            Ok(response) => respond(
                &response,
                &context,
                format::article_details(&response, article_id),
            ),
            Err(error) => failure(&context, &error),
        }
    }
}

fn default_limit() -> i64 {
    10
}

#[derive(Clone)]
pub struct GetLatestArticles {
    pub tool: Tool,
    client: Client,
}

#[derive(JsonSchema, Deserialize)]
pub struct LatestInput {
    /// The hostname of the publication, e.g. "blog.example.com"
    hostname: String,

    /// Number of articles to fetch, at most 50. Defaults to 10.
    /// Fewer are returned when the publication has fewer.
    #[serde(default = "default_limit")]
    limit: i64,
}

impl GetLatestArticles {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool: Tool::new(
                LATEST_ARTICLES_TOOL_NAME,
                "Get the latest articles from a Hashnode publication, by hostname",
                schema_from_type!(LatestInput),
            ),
        }
    }

    pub async fn execute(&self, input: Value) -> CallToolResult {
        let input: LatestInput = match parse_input(LATEST_ARTICLES_TOOL_NAME, input) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let hostname = match required(LATEST_ARTICLES_TOOL_NAME, "hostname", &input.hostname) {
            Ok(hostname) => hostname,
            Err(result) => return result,
        };

        let failure_context = format!("Error getting latest articles for hostname '{hostname}'");
        let publication = match resolve(&self.client, hostname, &failure_context).await {
            Ok(publication) => publication,
            Err(result) => return result,
        };

        let variables = json!({
            "first": page_size(input.limit),
            "sortBy": SORT_BY,
            "filter": { "publicationId": publication.id, "query": "" },
        });
        match self
            .client
            .execute::<SearchData>(&SEARCH_POSTS_OF_PUBLICATION, Some(variables))
            .await
        {
            Ok(response) => respond(
                &response,
                &failure_context,
                format::latest_articles(&response, &publication.title),
            ),
            Err(error) => failure(&failure_context, &error),
        }
    }
}
