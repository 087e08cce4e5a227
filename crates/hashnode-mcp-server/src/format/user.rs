use std::fmt::Write as _;

use super::{line, non_empty, render, render_date};
use crate::model::{ApiResponse, UserData};

/// Bios are free text and occasionally very long
const BIO_MAX_LENGTH: usize = 500;

pub fn user_info(response: &ApiResponse<UserData>, username: &str) -> String {
    render(
        response,
        format_args!("fetching user '{username}'"),
        |data| {
            let Some(user) = &data.user else {
                return format!("No user found with username '{username}'.");
            };

            let name = non_empty(&user.name).unwrap_or("Unknown");
            let handle = non_empty(&user.username).unwrap_or(username);
            let mut out = format!("# {name} (@{handle})\n\n");
            line(&mut out, "ID", non_empty(&user.id));
            line(&mut out, "Tagline", non_empty(&user.tagline));
            line(&mut out, "Location", non_empty(&user.location));
            line(
                &mut out,
                "Joined",
                non_empty(&user.date_joined).map(render_date),
            );
            line(&mut out, "Followers", user.followers_count);
            line(&mut out, "Following", user.followings_count);
            line(&mut out, "Profile Picture", non_empty(&user.profile_picture));

            if let Some(bio) = user.bio.as_ref().and_then(|bio| non_empty(&bio.text)) {
                let _ = writeln!(out, "\n## Bio\n{}", super::truncate(bio, BIO_MAX_LENGTH));
            }

            let links = user
                .social_media_links
                .as_ref()
                .map(|links| links.labelled())
                .unwrap_or_default();
            if !links.is_empty() {
                out.push_str("\n## Social Links\n");
                for (label, link) in links {
                    let _ = writeln!(out, "{label}: {link}");
                }
            }

            let publications: Vec<_> = user
                .publications
                .as_ref()
                .map(|publications| publications.nodes().collect())
                .unwrap_or_default();
            if publications.is_empty() {
                out.push_str("\nNo publications.\n");
            } else {
                out.push_str("\n## Publications\n");
                for publication in publications {
                    let _ = write!(
                        out,
                        "- {}",
                        non_empty(&publication.title).unwrap_or("Untitled")
                    );
                    if let Some(url) = non_empty(&publication.url) {
                        let _ = write!(out, " ({url})");
                    }
                    if let Some(id) = non_empty(&publication.id) {
                        let _ = write!(out, " [ID: {id}]");
                    }
                    out.push('\n');
                }
            }
            out
        },
    )
}
