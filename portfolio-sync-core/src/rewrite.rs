//! Asset link rewriting: relative media references in a README body are
//! replaced with absolute raw-content URLs so the documents render outside
//! the repository.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

/// Parenthesised markdown reference ending in a media extension. The
/// absolute-scheme exclusion is applied in [`rewrite`] rather than in the
/// pattern: the `regex` crate has no lookahead.
const MEDIA_REF_PATTERN: &str = r"(?i)\(([^)]+\.(?:jpg|jpeg|png|webp|svg|hevc|gif))\)";

fn media_ref() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MEDIA_REF_PATTERN).expect("media reference pattern compiles"))
}

/// References already rooted at a scheme or protocol-relative prefix are
/// left untouched.
fn is_absolute_ref(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("//")
}

/// Absolute raw-content URL for a repository-relative asset path.
pub fn asset_url(
    owner_base_url: &str,
    repo_name: &str,
    default_branch: &str,
    relative_path: &str,
) -> String {
    format!("{owner_base_url}/{repo_name}/raw/{default_branch}/{relative_path}")
}

/// Rewrite every relative media reference in `body` to an absolute URL under
/// the repository's hosting location and default branch.
///
/// Returns the transformed body together with the matched relative paths in
/// discovery order, one entry per occurrence — the first entry feeds the
/// document's hero image. Each match is rewritten in place on its exact
/// captured token, so duplicate paths are all rewritten in one pass and
/// files sharing a path substring cannot corrupt each other.
pub fn rewrite(
    body: &str,
    repo_name: &str,
    default_branch: &str,
    owner_base_url: &str,
) -> (String, Vec<String>) {
    let mut found: Vec<String> = Vec::new();
    let new_body = media_ref().replace_all(body, |caps: &Captures| {
        let path = &caps[1];
        if is_absolute_ref(path) {
            return caps[0].to_string();
        }
        found.push(path.to_string());
        format!(
            "({})",
            asset_url(owner_base_url, repo_name, default_branch, path)
        )
    });
    debug!(
        repo = repo_name,
        rewritten = found.len(),
        "Rewrote relative media references"
    );
    (new_body.into_owned(), found)
}
