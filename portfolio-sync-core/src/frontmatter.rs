//! Document assembly: the front-matter block prepended to each README body,
//! plus the freshness badge derived from a repository's last update.
//!
//! The emitted block follows the site generator's collection schema — field
//! order and quoting are fixed so two documents with identical metadata are
//! byte-identical across runs.

use chrono::{DateTime, Utc};

/// Front-matter content for one output document. Built fresh every run from
/// provider data plus the resolved description; never persisted.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Repository name.
    pub title: String,
    /// Freshly generated or carried-over description.
    pub description: String,
    /// Repository creation date, preformatted.
    pub pub_date: String,
    /// Repository last-update date, preformatted.
    pub updated_date: String,
    /// Absolute URL of the first embedded image, or the placeholder path.
    pub hero_image: String,
    /// Short recency label; the line is omitted entirely when absent.
    pub badge: Option<String>,
    /// Language names in provider order.
    pub tags: Vec<String>,
}

/// Human-readable date format used for `pubDate` and `updatedDate`.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %d %Y").to_string()
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render the front-matter block and prepend it to `body`.
pub fn assemble(metadata: &DocumentMetadata, body: &str) -> String {
    let mut block = String::from("---\n");
    block.push_str(&format!("title: {}\n", quote(&metadata.title)));
    block.push_str(&format!("description: {}\n", quote(&metadata.description)));
    block.push_str(&format!("pubDate: {}\n", quote(&metadata.pub_date)));
    block.push_str(&format!("updatedDate: {}\n", quote(&metadata.updated_date)));
    block.push_str(&format!("heroImage: {}\n", quote(&metadata.hero_image)));
    if let Some(badge) = &metadata.badge {
        block.push_str(&format!("badge: {}\n", quote(badge)));
    }
    let tags = metadata
        .tags
        .iter()
        .map(|tag| quote(tag))
        .collect::<Vec<_>>()
        .join(", ");
    block.push_str(&format!("tags: [{tags}]\n"));
    block.push_str("---\n\n");
    block.push_str(body);
    block
}

/// Freshness badge from the repository's `updated_at` and "now".
///
/// The difference is whole calendar days in UTC, so a repository updated
/// just before midnight still reads "Updated yesterday" one minute later:
/// 0 days — "Updated today"; 1 — "Updated yesterday"; 2..=7 — "Updated N
/// days ago"; anything else (older, or clock skew into the future) — none.
pub fn freshness_badge(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    let days = (now.date_naive() - updated_at.date_naive()).num_days();
    match days {
        0 => Some("Updated today".to_string()),
        1 => Some("Updated yesterday".to_string()),
        2..=7 => Some(format!("Updated {days} days ago")),
        _ => None,
    }
}
