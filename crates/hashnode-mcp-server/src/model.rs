//! Response shapes returned by the Hashnode API
//!
//! Every field is optional. The API omits or nulls fields freely, so nothing
//! here may fail to deserialize because a field is missing; formatters decide
//! how each absence is rendered.

use serde::{Deserialize, Serialize};

/// A GraphQL error as returned in the `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,

    /// Everything else (`locations`, `path`, `extensions`) is kept verbatim
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// The standard GraphQL response envelope
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> ApiResponse<T> {
    /// The errors, if the array is present and non-empty
    pub fn errors(&self) -> Option<&[GraphQLError]> {
        self.errors.as_deref().filter(|errors| !errors.is_empty())
    }
}

/// A relay-style connection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Option<Vec<Edge<T>>>,

    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: None,
            page_info: None,
        }
    }
}

impl<T> Connection<T> {
    /// The nodes present in the connection, in API order
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges
            .iter()
            .flatten()
            .filter_map(|edge| edge.node.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Edge<T> {
    pub node: Option<T>,

    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: Option<bool>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Publication {
    pub id: Option<String>,
    pub title: Option<String>,
    pub is_team: Option<bool>,
    pub url: Option<String>,
    pub posts: Option<Connection<Post>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub brief: Option<String>,
    pub url: Option<String>,
    pub slug: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub read_time_in_minutes: Option<u32>,
    pub views: Option<u64>,
    pub author: Option<Author>,
    pub cover_image: Option<CoverImage>,
    pub tags: Option<Vec<Tag>>,
    pub publication: Option<Publication>,
    pub content: Option<PostContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CoverImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostContent {
    pub markdown: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub posts_count: Option<u64>,
    pub posts: Option<Connection<Post>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_picture: Option<String>,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub date_joined: Option<String>,
    pub bio: Option<Bio>,
    pub social_media_links: Option<SocialMediaLinks>,
    pub followers_count: Option<u64>,
    pub followings_count: Option<u64>,
    pub publications: Option<Connection<Publication>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Bio {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SocialMediaLinks {
    pub website: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub stackoverflow: Option<String>,
    pub youtube: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
}

impl SocialMediaLinks {
    /// Labelled links that are set and non-empty, in a fixed order
    pub fn labelled(&self) -> Vec<(&'static str, &str)> {
        [
            ("Website", &self.website),
            ("GitHub", &self.github),
            ("Twitter", &self.twitter),
            ("LinkedIn", &self.linkedin),
            ("Stack Overflow", &self.stackoverflow),
            ("YouTube", &self.youtube),
            ("Instagram", &self.instagram),
            ("Facebook", &self.facebook),
        ]
        .into_iter()
        .filter_map(|(label, link)| {
            link.as_deref()
                .filter(|link| !link.is_empty())
                .map(|link| (label, link))
        })
        .collect()
    }
}

/// The payload of `publishPost` and `updatePost`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostPayload {
    pub post: Option<Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PublicationData {
    pub publication: Option<Publication>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchData {
    pub search_posts_of_publication: Option<Connection<Post>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostData {
    pub post: Option<Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UserData {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MeData {
    pub me: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedData {
    pub feed: Option<Connection<Post>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TagData {
    pub tag: Option<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishPostData {
    pub publish_post: Option<PostPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostData {
    pub update_post: Option<PostPayload>,
}
