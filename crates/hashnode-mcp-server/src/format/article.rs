use std::fmt::Write as _;

use super::{
    BRIEF_MAX_LENGTH, CONTENT_PREVIEW_LENGTH, line, non_empty, render, render_date, title_of,
    truncate,
};
use crate::model::{ApiResponse, Post, PostData, PublishPostData, Tag, UpdatePostData};

fn tag_names(tags: &[Tag]) -> Option<String> {
    let names: Vec<_> = tags
        .iter()
        .filter_map(|tag| non_empty(&tag.name).or(non_empty(&tag.slug)))
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}

/// The common lines of a created or updated article
fn mutation_summary(out: &mut String, post: &Post) {
    let _ = writeln!(out, "Title: {}", title_of(post));
    line(out, "ID", non_empty(&post.id));
    line(out, "URL", non_empty(&post.url));
    line(out, "Slug", non_empty(&post.slug));
    match non_empty(&post.published_at) {
        Some(published_at) => {
            let _ = writeln!(out, "Status: Published on {}", render_date(published_at));
        }
        None => out.push_str("Status: Draft\n"),
    }
    line(out, "Tags", post.tags.as_deref().and_then(tag_names));
}

pub fn article_created(response: &ApiResponse<PublishPostData>, title: &str) -> String {
    render(
        response,
        format_args!("creating article '{title}'"),
        |data| {
            let Some(post) = data.publish_post.as_ref().and_then(|payload| payload.post.as_ref())
            else {
                return format!("Article '{title}' was not created: the API returned no post.");
            };
            let mut out = String::from("Article created successfully!\n\n");
            mutation_summary(&mut out, post);
            out
        },
    )
}

pub fn article_updated(response: &ApiResponse<UpdatePostData>, article_id: &str) -> String {
    render(
        response,
        format_args!("updating article '{article_id}'"),
        |data| {
            let Some(post) = data.update_post.as_ref().and_then(|payload| payload.post.as_ref())
            else {
                return format!("No article found with ID '{article_id}' to update.");
            };
            let mut out = String::from("Article updated successfully!\n\n");
            mutation_summary(&mut out, post);
            line(
                &mut out,
                "Last Updated",
                non_empty(&post.updated_at).map(render_date),
            );
            out
        },
    )
}

pub fn article_details(response: &ApiResponse<PostData>, article_id: &str) -> String {
    render(
        response,
        format_args!("fetching article '{article_id}'"),
        |data| {
            let Some(post) = &data.post else {
                return format!("No article found with ID '{article_id}'.");
            };

            let mut out = format!("# {}\n\n", title_of(post));
            line(&mut out, "Subtitle", non_empty(&post.subtitle));
            line(&mut out, "ID", non_empty(&post.id));
            line(&mut out, "URL", non_empty(&post.url));
            line(&mut out, "Slug", non_empty(&post.slug));
            line(
                &mut out,
                "Published",
                non_empty(&post.published_at).map(render_date),
            );
            line(
                &mut out,
                "Last Updated",
                non_empty(&post.updated_at).map(render_date),
            );
            if let Some(author) = &post.author {
                let name = non_empty(&author.name).unwrap_or("Unknown");
                match non_empty(&author.username) {
                    Some(username) => {
                        let _ = writeln!(out, "Author: {name} (@{username})");
                    }
                    None => {
                        let _ = writeln!(out, "Author: {name}");
                    }
                }
            }
            line(
                &mut out,
                "Publication",
                post.publication
                    .as_ref()
                    .and_then(|publication| non_empty(&publication.title)),
            );
            line(&mut out, "Tags", post.tags.as_deref().and_then(tag_names));
            line(
                &mut out,
                "Read Time",
                post.read_time_in_minutes.map(|minutes| format!("{minutes} min")),
            );
            line(&mut out, "Views", post.views);
            line(
                &mut out,
                "Cover Image",
                post.cover_image
                    .as_ref()
                    .and_then(|cover| non_empty(&cover.url)),
            );

            if let Some(brief) = non_empty(&post.brief) {
                let _ = writeln!(out, "\n## Brief\n{}", truncate(brief, BRIEF_MAX_LENGTH));
            }

            let body = post.content.as_ref().and_then(|content| {
                non_empty(&content.markdown)
                    .or(non_empty(&content.text))
                    .or(non_empty(&content.html))
            });
            match body {
                Some(body) => {
                    let _ = writeln!(
                        out,
                        "\n## Content Preview\n{}\n\nFull content available ({} characters), not shown here.",
                        truncate(body, CONTENT_PREVIEW_LENGTH),
                        body.chars().count()
                    );
                }
                None => out.push_str("\nNo content available.\n"),
            }
            out
        },
    )
}
