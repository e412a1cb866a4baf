use chrono::{DateTime, Duration, TimeZone, Utc};
use portfolio_sync_core::frontmatter::{assemble, format_date, freshness_badge, DocumentMetadata};

fn metadata() -> DocumentMetadata {
    DocumentMetadata {
        title: "foo".to_string(),
        description: "A fine project.".to_string(),
        pub_date: "Mar 22 2001".to_string(),
        updated_date: "May 01 2024".to_string(),
        hero_image: "/post_img.webp".to_string(),
        badge: None,
        tags: vec!["Python".to_string(), "Rust".to_string()],
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

#[test]
fn assembles_fixed_schema_block_before_body() {
    let doc = assemble(&metadata(), "Body text.");
    assert_eq!(
        doc,
        "---\n\
         title: \"foo\"\n\
         description: \"A fine project.\"\n\
         pubDate: \"Mar 22 2001\"\n\
         updatedDate: \"May 01 2024\"\n\
         heroImage: \"/post_img.webp\"\n\
         tags: [\"Python\", \"Rust\"]\n\
         ---\n\
         \n\
         Body text."
    );
}

#[test]
fn badge_line_renders_only_when_present() {
    let mut meta = metadata();
    meta.badge = Some("Updated today".to_string());
    let doc = assemble(&meta, "");
    assert!(doc.contains("badge: \"Updated today\"\n"));

    meta.badge = None;
    let doc = assemble(&meta, "");
    assert!(!doc.contains("badge:"));
}

#[test]
fn identical_metadata_assembles_byte_identically() {
    let a = assemble(&metadata(), "Body.");
    let b = assemble(&metadata(), "Body.");
    assert_eq!(a, b);
}

#[test]
fn quotes_inside_values_are_escaped() {
    let mut meta = metadata();
    meta.description = "A \"quoted\" project.".to_string();
    let doc = assemble(&meta, "");
    assert!(doc.contains("description: \"A \\\"quoted\\\" project.\"\n"));
}

#[test]
fn empty_tag_list_renders_as_empty_brackets() {
    let mut meta = metadata();
    meta.tags.clear();
    let doc = assemble(&meta, "");
    assert!(doc.contains("tags: []\n"));
}

#[test]
fn badge_boundaries() {
    let now = now();
    assert_eq!(freshness_badge(now, now).as_deref(), Some("Updated today"));
    assert_eq!(
        freshness_badge(now - Duration::days(1), now).as_deref(),
        Some("Updated yesterday")
    );
    assert_eq!(
        freshness_badge(now - Duration::days(2), now).as_deref(),
        Some("Updated 2 days ago")
    );
    assert_eq!(
        freshness_badge(now - Duration::days(7), now).as_deref(),
        Some("Updated 7 days ago")
    );
    assert_eq!(freshness_badge(now - Duration::days(8), now), None);
}

#[test]
fn badge_uses_whole_calendar_days_in_utc() {
    // One minute past midnight vs one minute before: different calendar
    // days, so the elapsed wall-clock time of two minutes reads as a day.
    let updated = Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 5, 2, 0, 1, 0).unwrap();
    assert_eq!(
        freshness_badge(updated, now).as_deref(),
        Some("Updated yesterday")
    );
}

#[test]
fn future_update_timestamps_produce_no_badge() {
    let now = now();
    assert_eq!(freshness_badge(now + Duration::days(1), now), None);
}

#[test]
fn dates_format_like_the_site_expects() {
    let t = Utc.with_ymd_and_hms(2001, 3, 22, 8, 30, 0).unwrap();
    assert_eq!(format_date(t), "Mar 22 2001");
}
