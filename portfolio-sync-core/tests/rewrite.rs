use portfolio_sync_core::rewrite::{asset_url, rewrite};

const OWNER_BASE: &str = "https://github.com/acme";

#[test]
fn rewrites_relative_media_reference() {
    let (body, found) = rewrite("See ![img](pic.png) here", "foo", "main", OWNER_BASE);
    assert_eq!(
        body,
        "See ![img](https://github.com/acme/foo/raw/main/pic.png) here"
    );
    assert_eq!(found, vec!["pic.png".to_string()]);
}

#[test]
fn leaves_absolute_references_untouched() {
    let input = "![a](https://example.com/a.png) ![b](http://example.com/b.jpg) ![c](//cdn.example.com/c.gif)";
    let (body, found) = rewrite(input, "foo", "main", OWNER_BASE);
    assert_eq!(body, input);
    assert!(found.is_empty());
}

#[test]
fn rewrites_every_occurrence_of_a_duplicated_path() {
    let (body, found) = rewrite(
        "![one](pic.png) and again ![two](pic.png)",
        "foo",
        "main",
        OWNER_BASE,
    );
    assert!(!body.contains("(pic.png)"));
    assert_eq!(
        body.matches("(https://github.com/acme/foo/raw/main/pic.png)")
            .count(),
        2
    );
    // One entry per occurrence, in discovery order.
    assert_eq!(found, vec!["pic.png".to_string(), "pic.png".to_string()]);
}

#[test]
fn distinct_files_sharing_a_path_substring_do_not_corrupt_each_other() {
    let (body, found) = rewrite(
        "![a](pic.png) ![b](assets/pic.png)",
        "foo",
        "main",
        OWNER_BASE,
    );
    assert!(body.contains("(https://github.com/acme/foo/raw/main/pic.png)"));
    assert!(body.contains("(https://github.com/acme/foo/raw/main/assets/pic.png)"));
    assert!(!body.contains("assets/https://"));
    assert_eq!(
        found,
        vec!["pic.png".to_string(), "assets/pic.png".to_string()]
    );
}

#[test]
fn matches_extensions_case_insensitively() {
    let (body, found) = rewrite("![img](Logo.PNG)", "foo", "main", OWNER_BASE);
    assert_eq!(
        body,
        "![img](https://github.com/acme/foo/raw/main/Logo.PNG)"
    );
    assert_eq!(found, vec!["Logo.PNG".to_string()]);
}

#[test]
fn ignores_parenthesised_text_that_is_not_a_media_reference() {
    let input = "A tool (see docs) linking [here](docs/usage.md).";
    let (body, found) = rewrite(input, "foo", "main", OWNER_BASE);
    assert_eq!(body, input);
    assert!(found.is_empty());
}

#[test]
fn first_found_file_drives_the_hero_image_url() {
    let (_, found) = rewrite(
        "![b](second.webp) after ![a](first.svg)",
        "foo",
        "main",
        OWNER_BASE,
    );
    let hero = asset_url(OWNER_BASE, "foo", "main", &found[0]);
    assert_eq!(hero, "https://github.com/acme/foo/raw/main/second.webp");
}
