//! Render API responses as text for the calling agent
//!
//! Formatters never fail. Any field may be missing, so each one either falls
//! back to a placeholder or drops its line. Every formatter makes the same
//! first decisions, in order:
//!
//! 1. `errors` present: render the raw error payload and nothing else
//! 2. `data` absent: an operation-specific "no data" message
//! 3. the named result absent: an operation-specific "not found" message
//! 4. an empty collection: an operation-specific "no results" message

mod article;
mod posts;
mod user;

use std::borrow::Cow;
use std::fmt::{Display, Write as _};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{ApiResponse, GraphQLError, Post};

pub use article::{article_created, article_details, article_updated};
pub use posts::{
    connection_test, feed_articles, latest_articles, publication_id, publication_posts,
    search_results, tag_articles,
};
pub use user::user_info;

/// Briefs longer than this are cut
pub const BRIEF_MAX_LENGTH: usize = 200;

/// How much of an article body the detail view shows
pub const CONTENT_PREVIEW_LENGTH: usize = 500;

const ELLIPSIS: &str = "...";
const DATE_FORMAT: &str = "%b %d, %Y";

/// Apply the error and no-data checks, then hand the data to `render`
fn render<T>(
    response: &ApiResponse<T>,
    action: impl Display,
    render: impl FnOnce(&T) -> String,
) -> String {
    if let Some(errors) = response.errors() {
        return render_errors(errors);
    }
    match &response.data {
        Some(data) => render(data),
        None => format!("No data returned from API while {action}."),
    }
}

/// The raw error payload, as JSON
pub fn render_errors(errors: &[GraphQLError]) -> String {
    let payload = serde_json::to_string(errors).unwrap_or_else(|_| {
        errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    });
    format!("API returned errors: {payload}")
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((index, _)) => Cow::Owned(format!("{}{ELLIPSIS}", text.get(..index).unwrap_or(text))),
        None => Cow::Borrowed(text),
    }
}

/// Render an ISO-8601 timestamp or date as e.g. `Jan 01, 2023`.
///
/// Anything that does not parse is returned unchanged.
pub fn render_date(raw: &str) -> Cow<'_, str> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Cow::Owned(timestamp.format(DATE_FORMAT).to_string());
    }
    // No offset, e.g. `2023-01-01T00:00:00`
    if let Ok(timestamp) = raw.parse::<NaiveDateTime>() {
        return Cow::Owned(timestamp.format(DATE_FORMAT).to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Cow::Owned(date.format(DATE_FORMAT).to_string());
    }
    Cow::Borrowed(raw)
}

/// A present, non-blank string
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

fn title_of(post: &Post) -> &str {
    non_empty(&post.title).unwrap_or("Untitled")
}

/// Append `label: value` when the value is present
fn line(out: &mut String, label: &str, value: Option<impl Display>) {
    if let Some(value) = value {
        let _ = writeln!(out, "{label}: {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn short_text_is_unchanged() {
        let brief = "a".repeat(BRIEF_MAX_LENGTH);
        assert!(matches!(truncate(&brief, BRIEF_MAX_LENGTH), Cow::Borrowed(b) if b == brief));
    }

    #[test]
    fn long_text_is_cut_with_an_ellipsis() {
        let brief = "b".repeat(BRIEF_MAX_LENGTH + 1);
        let truncated = truncate(&brief, BRIEF_MAX_LENGTH);
        assert_eq!(truncated, format!("{}...", "b".repeat(BRIEF_MAX_LENGTH)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let brief = "é".repeat(BRIEF_MAX_LENGTH + 5);
        let truncated = truncate(&brief, BRIEF_MAX_LENGTH);
        assert_eq!(truncated.chars().count(), BRIEF_MAX_LENGTH + ELLIPSIS.len());
    }

    #[rstest]
    #[case("2023-01-01T00:00:00Z", "Jan 01, 2023")]
    #[case("2024-03-15T10:30:00.000Z", "Mar 15, 2024")]
    #[case("2024-12-31T23:00:00-05:00", "Dec 31, 2024")]
    #[case("2023-01-01T00:00:00", "Jan 01, 2023")]
    #[case("2023-06-30T12:45:10.250", "Jun 30, 2023")]
    #[case("2023-01-01", "Jan 01, 2023")]
    #[case("yesterday", "yesterday")]
    #[case("2023-13-45T99:00:00Z", "2023-13-45T99:00:00Z")]
    #[case("", "")]
    fn it_renders_dates(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(render_date(raw), expected);
    }

    fn no_data<T: serde::de::DeserializeOwned>() -> ApiResponse<T> {
        serde_json::from_str(r#"{"data":null}"#).unwrap()
    }

    #[rstest]
    #[case(
        publication_posts(&no_data(), "blog.example.com"),
        "fetching posts from publication 'blog.example.com'"
    )]
    #[case(
        publication_id(&no_data(), "blog.example.com"),
        "looking up publication 'blog.example.com'"
    )]
    #[case(search_results(&no_data(), "docker"), "searching for 'docker'")]
    #[case(
        latest_articles(&no_data(), "Test Publication"),
        "listing articles of 'Test Publication'"
    )]
    #[case(article_details(&no_data(), "abc123"), "fetching article 'abc123'")]
    #[case(article_created(&no_data(), "Hello"), "creating article 'Hello'")]
    #[case(article_updated(&no_data(), "post-1"), "updating article 'post-1'")]
    #[case(user_info(&no_data(), "ada"), "fetching user 'ada'")]
    #[case(feed_articles(&no_data(), "recent"), "fetching the recent feed")]
    #[case(tag_articles(&no_data(), "rust"), "fetching articles tagged 'rust'")]
    fn null_data_names_the_operation(#[case] rendered: String, #[case] action: &str) {
        assert_eq!(rendered, format!("No data returned from API while {action}."));
    }

    #[test]
    fn errors_are_rendered_verbatim() {
        let response: ApiResponse<()> = serde_json::from_str(
            r#"{"data":null,"errors":[{"message":"Unauthorized","extensions":{"code":"UNAUTHENTICATED"}}]}"#,
        )
        .unwrap();
        let text = render(&response, "testing", |_| unreachable!());
        assert_eq!(
            text,
            r#"API returned errors: [{"message":"Unauthorized","extensions":{"code":"UNAUTHENTICATED"}}]"#
        );
    }
}
