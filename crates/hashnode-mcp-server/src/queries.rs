//! The fixed set of GraphQL documents sent to the Hashnode API
//!
//! Inputs are only ever passed as GraphQL variables. Each document declares
//! the variable names it accepts so callers and tests can check the
//! variables they build against it.

/// A named GraphQL document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    /// The operation name, used in logs
    pub name: &'static str,

    /// The GraphQL source text
    pub source: &'static str,

    /// The variables the document declares, without the `$` prefix
    pub variables: &'static [&'static str],
}

pub const TEST_CONNECTION: Document = Document {
    name: "TestConnection",
    source: r#"query TestConnection {
  __schema {
    queryType {
      name
    }
  }
}"#,
    variables: &[],
};

pub const GET_PUBLICATION_ID: Document = Document {
    name: "GetPublicationId",
    source: r#"query GetPublicationId($host: String!) {
  publication(host: $host) {
    id
    title
  }
}"#,
    variables: &["host"],
};

pub const GET_PUBLICATION_POSTS: Document = Document {
    name: "GetPublicationPosts",
    source: r#"query GetPublicationPosts($host: String!, $first: Int!) {
  publication(host: $host) {
    id
    title
    isTeam
    url
    posts(first: $first) {
      edges {
        node {
          id
          title
          brief
          url
          slug
          publishedAt
          author {
            name
            username
            profilePicture
          }
          coverImage {
            url
          }
        }
        cursor
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}"#,
    variables: &["host", "first"],
};

pub const SEARCH_POSTS_OF_PUBLICATION: Document = Document {
    name: "SearchPostsOfPublication",
    source: r#"query SearchPostsOfPublication(
  $first: Int!,
  $after: String,
  $sortBy: PostSortBy,
  $filter: SearchPostsOfPublicationFilter!
) {
  searchPostsOfPublication(
    first: $first,
    after: $after,
    sortBy: $sortBy,
    filter: $filter
  ) {
    edges {
      node {
        id
        title
        brief
        url
        slug
        publishedAt
        author {
          name
          username
          profilePicture
        }
        coverImage {
          url
        }
      }
      cursor
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#,
    variables: &["first", "after", "sortBy", "filter"],
};

pub const GET_POST: Document = Document {
    name: "GetPost",
    source: r#"query GetPost($id: ID!) {
  post(id: $id) {
    id
    title
    subtitle
    brief
    url
    slug
    publishedAt
    updatedAt
    readTimeInMinutes
    views
    author {
      name
      username
      profilePicture
    }
    coverImage {
      url
    }
    tags {
      id
      name
      slug
    }
    publication {
      id
      title
    }
    content {
      markdown
      html
      text
    }
  }
}"#,
    variables: &["id"],
};

pub const GET_USER: Document = Document {
    name: "GetUser",
    source: r#"query GetUser($username: String!) {
  user(username: $username) {
    id
    name
    username
    profilePicture
    tagline
    location
    dateJoined
    bio {
      text
    }
    socialMediaLinks {
      website
      github
      twitter
      linkedin
      stackoverflow
      youtube
      instagram
      facebook
    }
    followersCount
    followingsCount
    publications(first: 10) {
      edges {
        node {
          id
          title
          url
        }
      }
    }
  }
}"#,
    variables: &["username"],
};

pub const GET_MY_PUBLICATIONS: Document = Document {
    name: "GetMyPublications",
    source: r#"query GetMyPublications {
  me {
    id
    username
    publications(first: 10) {
      edges {
        node {
          id
          title
        }
      }
    }
  }
}"#,
    variables: &[],
};

pub const GET_FEED: Document = Document {
    name: "GetFeed",
    source: r#"query GetFeed($first: Int!, $after: String, $filter: FeedFilter) {
  feed(first: $first, after: $after, filter: $filter) {
    edges {
      node {
        id
        title
        brief
        url
        slug
        publishedAt
        author {
          name
          username
          profilePicture
        }
        coverImage {
          url
        }
      }
      cursor
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#,
    variables: &["first", "after", "filter"],
};

pub const GET_TAG_POSTS: Document = Document {
    name: "GetTagPosts",
    source: r#"query GetTagPosts(
  $slug: String!,
  $first: Int!,
  $after: String,
  $filter: TagPostConnectionFilter!
) {
  tag(slug: $slug) {
    id
    name
    slug
    postsCount
    posts(first: $first, after: $after, filter: $filter) {
      edges {
        node {
          id
          title
          brief
          url
          slug
          publishedAt
          author {
            name
            username
            profilePicture
          }
          coverImage {
            url
          }
        }
        cursor
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}"#,
    variables: &["slug", "first", "after", "filter"],
};

pub const PUBLISH_POST: Document = Document {
    name: "PublishPost",
    source: r#"mutation PublishPost($input: PublishPostInput!) {
  publishPost(input: $input) {
    post {
      id
      title
      slug
      url
      publishedAt
      tags {
        id
        name
        slug
      }
    }
  }
}"#,
    variables: &["input"],
};

pub const UPDATE_POST: Document = Document {
    name: "UpdatePost",
    source: r#"mutation UpdatePost($input: UpdatePostInput!) {
  updatePost(input: $input) {
    post {
      id
      title
      slug
      url
      publishedAt
      updatedAt
      tags {
        id
        name
        slug
      }
    }
  }
}"#,
    variables: &["input"],
};

/// Every document in the catalog
pub const ALL: &[Document] = &[
    TEST_CONNECTION,
    GET_PUBLICATION_ID,
    GET_PUBLICATION_POSTS,
    SEARCH_POSTS_OF_PUBLICATION,
    GET_POST,
    GET_USER,
    GET_MY_PUBLICATIONS,
    GET_FEED,
    GET_TAG_POSTS,
    PUBLISH_POST,
    UPDATE_POST,
];
