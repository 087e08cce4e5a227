use std::fmt::Write as _;

use serde_json::Value;

use super::{BRIEF_MAX_LENGTH, line, non_empty, render, render_date, title_of, truncate};
use crate::model::{
    ApiResponse, Connection, FeedData, PageInfo, Post, PublicationData, SearchData, TagData,
};

/// Summary of one post, as used by every post listing
fn post_summary(out: &mut String, heading: &str, post: &Post) {
    let _ = writeln!(out, "{heading} {}", title_of(post));
    line(out, "ID", non_empty(&post.id));
    line(out, "URL", non_empty(&post.url));
    line(out, "Slug", non_empty(&post.slug));
    line(out, "Date", non_empty(&post.published_at).map(render_date));

    if let Some(author) = &post.author {
        let _ = writeln!(out, "Author: {}", non_empty(&author.name).unwrap_or("Unknown"));
        line(out, "Author Username", non_empty(&author.username));
        line(out, "Author Profile Picture", non_empty(&author.profile_picture));
    }

    line(
        out,
        "Cover Image",
        post.cover_image
            .as_ref()
            .and_then(|cover| non_empty(&cover.url)),
    );

    let brief = non_empty(&post.brief)
        .map(|brief| truncate(brief, BRIEF_MAX_LENGTH))
        .unwrap_or("No description available.".into());
    let _ = writeln!(out, "Brief: {brief}\n");
}

fn pagination(out: &mut String, page_info: &PageInfo) {
    let has_next_page = page_info.has_next_page.unwrap_or(false);
    let _ = writeln!(out, "## Pagination\nHas Next Page: {has_next_page}");
    if has_next_page {
        line(out, "End Cursor", non_empty(&page_info.end_cursor));
    }
    out.push('\n');
}

/// A list of posts followed by pagination details
fn post_listing(out: &mut String, heading: &str, connection: &Connection<Post>) {
    for post in connection.nodes() {
        post_summary(out, heading, post);
    }
    if let Some(page_info) = &connection.page_info {
        pagination(out, page_info);
    }
}

/// The raw response of the connection test query
pub fn connection_test(response: &ApiResponse<Value>) -> String {
    if let Some(errors) = response.errors() {
        return super::render_errors(errors);
    }
    let payload = serde_json::to_string(response).unwrap_or_default();
    format!("API connection successful! Response: {payload}")
}

pub fn publication_posts(response: &ApiResponse<PublicationData>, host: &str) -> String {
    render(
        response,
        format_args!("fetching posts from publication '{host}'"),
        |data| {
            let Some(publication) = &data.publication else {
                return format!("No publication found for hostname '{host}'.");
            };
            let title = non_empty(&publication.title).unwrap_or("Untitled");
            let is_team = if publication.is_team.unwrap_or(false) {
                "Yes"
            } else {
                "No"
            };

            let mut out = format!("# Publication: {title}\n\n");
            line(&mut out, "ID", non_empty(&publication.id));
            line(&mut out, "URL", non_empty(&publication.url));
            let _ = writeln!(out, "Team Publication: {is_team}\n");

            match &publication.posts {
                None => {
                    let _ = writeln!(out, "No post listing returned for publication '{title}'.");
                }
                Some(posts) if posts.is_empty() => {
                    let _ = writeln!(out, "No posts found for publication '{title}'.");
                }
                Some(posts) => {
                    out.push_str("## Posts\n\n");
                    post_listing(&mut out, "###", posts);
                }
            }
            out
        },
    )
}

pub fn publication_id(response: &ApiResponse<PublicationData>, host: &str) -> String {
    render(
        response,
        format_args!("looking up publication '{host}'"),
        |data| {
            let Some(publication) = &data.publication else {
                return format!("No publication found for hostname '{host}'.");
            };
            let title = non_empty(&publication.title).unwrap_or("Untitled");
            match non_empty(&publication.id) {
                Some(id) => format!("Publication: {title}\nID: {id}"),
                None => format!("Could not find ID for publication '{title}' with hostname '{host}'."),
            }
        },
    )
}

pub fn search_results(response: &ApiResponse<SearchData>, query: &str) -> String {
    render(
        response,
        format_args!("searching for '{query}'"),
        |data| match &data.search_posts_of_publication {
            None => format!("No search results found for '{query}'."),
            Some(results) if results.is_empty() => {
                format!("No matching posts found for '{query}'.")
            }
            Some(results) => {
                let mut out = format!("# Search Results for '{query}'\n\n");
                post_listing(&mut out, "##", results);
                out
            }
        },
    )
}

/// The newest posts of a publication, as returned by a date-sorted search
pub fn latest_articles(response: &ApiResponse<SearchData>, publication_title: &str) -> String {
    render(
        response,
        format_args!("listing articles of '{publication_title}'"),
        |data| {
            let Some(results) = &data.search_posts_of_publication else {
                return format!("No article listing returned for publication '{publication_title}'.");
            };
            if results.is_empty() {
                return format!("No articles found for publication '{publication_title}'.");
            }

            let mut out = format!("# Latest Articles from {publication_title}\n\n");
            for post in results.nodes() {
                let _ = writeln!(out, "## {}", title_of(post));
                line(&mut out, "ID", non_empty(&post.id));
                line(
                    &mut out,
                    "Author",
                    post.author.as_ref().and_then(|author| non_empty(&author.name)),
                );
                line(
                    &mut out,
                    "Published",
                    non_empty(&post.published_at).map(render_date),
                );
                line(&mut out, "URL", non_empty(&post.url));
                line(
                    &mut out,
                    "Description",
                    non_empty(&post.brief).map(|brief| truncate(brief, BRIEF_MAX_LENGTH)),
                );
                out.push('\n');
            }
            out
        },
    )
}

pub fn feed_articles(response: &ApiResponse<FeedData>, feed_type: &str) -> String {
    render(
        response,
        format_args!("fetching the {feed_type} feed"),
        |data| match &data.feed {
            None => format!("No {feed_type} feed available."),
            Some(feed) if feed.is_empty() => format!("No articles found in the {feed_type} feed."),
            Some(feed) => {
                let mut out = format!("# {} Feed\n\n", capitalize(feed_type));
                post_listing(&mut out, "##", feed);
                out
            }
        },
    )
}

pub fn tag_articles(response: &ApiResponse<TagData>, slug: &str) -> String {
    render(
        response,
        format_args!("fetching articles tagged '{slug}'"),
        |data| {
            let Some(tag) = &data.tag else {
                return format!("No tag found with slug '{slug}'.");
            };
            let name = non_empty(&tag.name).unwrap_or(slug);
            match &tag.posts {
                None => format!("No article listing returned for tag '{name}'."),
                Some(posts) if posts.is_empty() => format!("No articles found for tag '{name}'."),
                Some(posts) => {
                    let mut out = format!("# Articles tagged #{name}\n\n");
                    line(&mut out, "Total Posts", tag.posts_count);
                    if tag.posts_count.is_some() {
                        out.push('\n');
                    }
                    post_listing(&mut out, "##", posts);
                    out
                }
            }
        },
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
