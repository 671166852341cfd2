// src/catalog/extract.rs
//! Normalizes an arbitrary property schema into a `Post`.
//!
//! Workspaces name their columns however they like ("Title", "Name",
//! "title", …), so each canonical post attribute is backed by an
//! explicit alias table, tried in a fixed documented order. A property
//! only satisfies an alias when it also has the expected kind, so a
//! select named "Description" never shadows the description text. The
//! last resort for each attribute is a literal default — extraction
//! itself never fails.

use crate::model::{PageRecord, Post, PropertyValue, RichTextRun};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;

/// Accepted property names per canonical post attribute, in lookup order.
pub struct AliasTable {
    pub title: &'static [&'static str],
    pub slug: &'static [&'static str],
    pub description: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub status: &'static [&'static str],
    pub published_at: &'static [&'static str],
    pub cover: &'static [&'static str],
    pub author: &'static [&'static str],
}

pub static ALIASES: Lazy<AliasTable> = Lazy::new(|| AliasTable {
    title: &["Title", "Name", "title", "name"],
    slug: &["Slug", "slug"],
    description: &[
        "Description",
        "description",
        "Summary",
        "summary",
        "Excerpt",
        "excerpt",
    ],
    tags: &["Tags", "tags", "Categories", "categories"],
    status: &["Status", "status", "Published"],
    published_at: &["PublishedAt", "Published", "Date", "date", "CreatedAt"],
    cover: &["Cover", "cover", "Image", "image", "Thumbnail", "thumbnail"],
    author: &["Author", "author", "CreatedBy"],
});

/// Fallback status when a schema has no status-like column at all.
const DEFAULT_STATUS: &str = "Published";

/// Fallback title for pages whose schema has no usable title anywhere.
const DEFAULT_TITLE: &str = "Untitled";

/// Derives a `Post` from one page record.
pub fn extract_post(record: &PageRecord) -> Post {
    let title = extract_title(record);
    let slug = first_rich_text(record, ALIASES.slug)
        .unwrap_or_else(|| slug::slugify(&title));

    Post {
        id: record.id.clone(),
        url: record.id.to_public_url(),
        slug,
        description: first_rich_text(record, ALIASES.description).unwrap_or_default(),
        tags: first_multi_select(record, ALIASES.tags).unwrap_or_default(),
        status: first_select(record, ALIASES.status)
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        published_at: first_timestamp(record, ALIASES.published_at)
            .unwrap_or(record.created_time),
        cover: first_file_url(record, ALIASES.cover),
        author: first_rich_text(record, ALIASES.author),
        title,
    }
}

/// Title lookup: aliases first, then any title-typed property in source
/// order, then the literal default.
fn extract_title(record: &PageRecord) -> String {
    for alias in ALIASES.title {
        if let Some(PropertyValue::Title(runs)) = record.properties.get(*alias) {
            if let Some(text) = non_empty(RichTextRun::plain_text_of(runs)) {
                return text;
            }
        }
    }

    record
        .properties
        .values()
        .find_map(|value| match value {
            PropertyValue::Title(runs) => non_empty(RichTextRun::plain_text_of(runs)),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn first_rich_text(record: &PageRecord, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        match record.properties.get(*alias)? {
            // First run only — the editor splits styled text into runs
            // and the leading run carries the value for short fields.
            PropertyValue::RichText(runs) => non_empty(runs.first()?.text.clone()),
            _ => None,
        }
    })
}

fn first_select(record: &PageRecord, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        match record.properties.get(*alias)? {
            PropertyValue::Select(option) => option.as_ref().map(|o| o.name.clone()),
            _ => None,
        }
    })
}

fn first_multi_select(record: &PageRecord, aliases: &[&str]) -> Option<Vec<String>> {
    aliases.iter().find_map(|alias| {
        match record.properties.get(*alias)? {
            PropertyValue::MultiSelect(options) => {
                Some(options.iter().map(|o| o.name.clone()).collect())
            }
            _ => None,
        }
    })
}

fn first_timestamp(record: &PageRecord, aliases: &[&str]) -> Option<DateTime<Utc>> {
    aliases.iter().find_map(|alias| {
        match record.properties.get(*alias)? {
            PropertyValue::Date(Some(stamp)) => parse_timestamp(&stamp.start),
            PropertyValue::CreatedTime(dt) => Some(*dt),
            _ => None,
        }
    })
}

fn first_file_url(record: &PageRecord, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        match record.properties.get(*alias)? {
            PropertyValue::Files(files) => files.first().map(|f| f.url.clone()),
            _ => None,
        }
    })
}

/// Parses the API's two date spellings: full RFC 3339, or a bare date
/// which is pinned to midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(date.and_time(NaiveTime::MIN).and_utc())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateStamp, FileRef, SelectOption};
    use crate::types::NotionId;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn record(properties: Vec<(&str, PropertyValue)>) -> PageRecord {
        PageRecord {
            id: NotionId::parse("550e8400e29b41d4a716446655440000").unwrap(),
            created_time: "2024-01-05T09:00:00Z".parse().unwrap(),
            properties: properties
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn title_value(text: &str) -> PropertyValue {
        PropertyValue::Title(vec![RichTextRun::plain(text)])
    }

    #[test]
    fn every_title_alias_yields_the_same_title() {
        for &alias in ALIASES.title {
            let post = extract_post(&record(vec![(alias, title_value("Hello World"))]));
            assert_eq!(post.title, "Hello World", "alias {:?}", alias);
        }
    }

    #[test]
    fn every_description_alias_yields_the_same_description() {
        for &alias in ALIASES.description {
            let post = extract_post(&record(vec![
                ("Name", title_value("Post")),
                (
                    alias,
                    PropertyValue::RichText(vec![RichTextRun::plain("short summary")]),
                ),
            ]));
            assert_eq!(post.description, "short summary", "alias {:?}", alias);
        }
    }

    #[test]
    fn alias_order_is_deterministic() {
        // Both "Title" and "name" are present; the earlier alias wins.
        let post = extract_post(&record(vec![
            ("name", title_value("lowercase name")),
            ("Title", title_value("Proper Title")),
        ]));
        assert_eq!(post.title, "Proper Title");
    }

    #[test]
    fn title_falls_back_to_any_title_typed_property() {
        let post = extract_post(&record(vec![(
            "Moniker",
            title_value("Schema Went Rogue"),
        )]));
        assert_eq!(post.title, "Schema Went Rogue");
    }

    #[test]
    fn untitled_when_no_title_property_exists() {
        let post = extract_post(&record(vec![(
            "Tags",
            PropertyValue::MultiSelect(vec![]),
        )]));
        assert_eq!(post.title, "Untitled");
    }

    #[test]
    fn aliases_require_the_expected_kind() {
        // A select named "Description" must not shadow description text.
        let post = extract_post(&record(vec![
            ("Name", title_value("Post")),
            (
                "Description",
                PropertyValue::Select(Some(SelectOption {
                    name: "not a description".to_string(),
                })),
            ),
            (
                "Summary",
                PropertyValue::RichText(vec![RichTextRun::plain("the real one")]),
            ),
        ]));
        assert_eq!(post.description, "the real one");
    }

    #[test]
    fn slug_defaults_to_slugified_title() {
        let post = extract_post(&record(vec![("Title", title_value("Hello, World! 2024"))]));
        assert_eq!(post.slug, "hello-world-2024");
    }

    #[test]
    fn explicit_slug_wins_over_slugified_title() {
        let post = extract_post(&record(vec![
            ("Title", title_value("Some Title")),
            (
                "Slug",
                PropertyValue::RichText(vec![RichTextRun::plain("custom-slug")]),
            ),
        ]));
        assert_eq!(post.slug, "custom-slug");
    }

    #[test]
    fn published_at_prefers_date_property_over_created_time() {
        let post = extract_post(&record(vec![
            ("Title", title_value("Post")),
            (
                "Date",
                PropertyValue::Date(Some(DateStamp {
                    start: "2023-06-15".to_string(),
                })),
            ),
        ]));
        assert_eq!(post.published_at, "2023-06-15T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn published_at_falls_back_to_page_created_time() {
        let post = extract_post(&record(vec![("Title", title_value("Post"))]));
        assert_eq!(
            post.published_at,
            "2024-01-05T09:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn cover_resolves_first_file_url() {
        let post = extract_post(&record(vec![
            ("Title", title_value("Post")),
            (
                "Cover",
                PropertyValue::Files(vec![
                    FileRef {
                        url: "https://files.example/cover.png".to_string(),
                    },
                    FileRef {
                        url: "https://files.example/second.png".to_string(),
                    },
                ]),
            ),
        ]));
        assert_eq!(
            post.cover.as_deref(),
            Some("https://files.example/cover.png")
        );
    }

    #[test]
    fn status_defaults_to_published() {
        let post = extract_post(&record(vec![("Title", title_value("Post"))]));
        assert_eq!(post.status, "Published");
    }

    #[test]
    fn timestamps_parse_both_spellings() {
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some("2024-03-01T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-03-01T12:30:00.000Z"),
            Some("2024-03-01T12:30:00Z".parse().unwrap())
        );
        assert_eq!(parse_timestamp("not a date"), None);
    }
}
