//! Catalog behavior against an in-memory repository: discovery union,
//! de-duplication, ordering, slug lookup, degrade-on-failure, and
//! level-by-level child resolution.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use notionpress::{
    AppError, Block, BlockCommon, ContentCatalog, ContentRepository, DatabaseSummary, NotionId,
    PageRecord, PropertyValue, RichTextRun, TextBlock,
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct FakeRepository {
    databases: Vec<DatabaseSummary>,
    rows: HashMap<String, Vec<PageRecord>>,
    pages: Vec<PageRecord>,
    children: HashMap<String, Vec<Block>>,
    database_search_down: bool,
    page_search_down: bool,
}

fn unavailable() -> AppError {
    AppError::MalformedResponse("service unavailable".to_string())
}

#[async_trait]
impl ContentRepository for FakeRepository {
    async fn search_databases(&self) -> Result<Vec<DatabaseSummary>, AppError> {
        if self.database_search_down {
            return Err(unavailable());
        }
        Ok(self.databases.clone())
    }

    async fn search_pages(&self) -> Result<Vec<PageRecord>, AppError> {
        if self.page_search_down {
            return Err(unavailable());
        }
        Ok(self.pages.clone())
    }

    async fn query_database(&self, database: &NotionId) -> Result<Vec<PageRecord>, AppError> {
        self.rows
            .get(database.as_str())
            .cloned()
            .ok_or_else(unavailable)
    }

    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        Ok(self.children.get(parent.as_str()).cloned().unwrap_or_default())
    }
}

fn id(n: u8) -> NotionId {
    NotionId::parse(&format!("{:032x}", n as u128)).unwrap()
}

fn record(n: u8, title: &str, day: u32) -> PageRecord {
    let mut properties = IndexMap::new();
    properties.insert(
        "Title".to_string(),
        PropertyValue::Title(vec![RichTextRun::plain(title)]),
    );
    PageRecord {
        id: id(n),
        created_time: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        properties,
    }
}

fn database(n: u8, title: &str) -> DatabaseSummary {
    DatabaseSummary {
        id: id(n),
        title: title.to_string(),
    }
}

fn paragraph(n: u8, text: &str, has_children: bool) -> Block {
    Block::Paragraph(TextBlock {
        common: BlockCommon::new(id(n), has_children),
        rich_text: vec![RichTextRun::plain(text)],
    })
}

fn catalog(repo: FakeRepository) -> ContentCatalog {
    ContentCatalog::new(Arc::new(repo), 10)
}

#[tokio::test]
async fn all_content_unions_and_dedupes_by_id() {
    let repo = FakeRepository {
        databases: vec![database(100, "Blog")],
        rows: HashMap::from([(
            id(100).as_str().to_string(),
            vec![record(1, "From Database", 10), record(2, "Shared Post", 12)],
        )]),
        // The same page also shows up in the page search; the first
        // occurrence must win.
        pages: vec![record(2, "Shared Post", 12), record(3, "Standalone", 11)],
        ..Default::default()
    };

    let content = catalog(repo).all_content().await;
    let ids: Vec<&str> = content.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(content.len(), 3);
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "no repeated identifiers");
}

#[tokio::test]
async fn all_content_sorts_newest_first() {
    let repo = FakeRepository {
        databases: vec![database(100, "Blog")],
        rows: HashMap::from([(
            id(100).as_str().to_string(),
            vec![record(1, "Oldest", 1), record(2, "Newest", 20)],
        )]),
        pages: vec![record(3, "Middle", 10)],
        ..Default::default()
    };

    let content = catalog(repo).all_content().await;
    let timestamps: Vec<_> = content.iter().map(|p| p.published_at).collect();

    for pair in timestamps.windows(2) {
        assert!(pair[0] >= pair[1], "ordering must be non-increasing");
    }
    assert_eq!(content[0].title, "Newest");
}

#[tokio::test]
async fn slug_lookup_finds_first_match_and_misses_cleanly() {
    let repo = FakeRepository {
        pages: vec![record(1, "Hello World", 10)],
        ..Default::default()
    };
    let catalog = catalog(repo);

    let found = catalog.post_by_slug("hello-world").await;
    assert_eq!(found.map(|p| p.title), Some("Hello World".to_string()));

    let missing = catalog.post_by_slug("does-not-exist").await;
    assert!(missing.is_none());
}

#[tokio::test]
async fn discovery_outage_degrades_to_the_other_path() {
    // Database search is down; standalone pages still render.
    let repo = FakeRepository {
        database_search_down: true,
        pages: vec![record(1, "Still Here", 10)],
        ..Default::default()
    };

    let content = catalog(repo).all_content().await;
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].title, "Still Here");
}

#[tokio::test]
async fn total_outage_degrades_to_empty_not_error() {
    let repo = FakeRepository {
        database_search_down: true,
        page_search_down: true,
        ..Default::default()
    };

    let content = catalog(repo).all_content().await;
    assert!(content.is_empty());
}

#[tokio::test]
async fn failing_database_is_skipped_but_others_contribute() {
    let repo = FakeRepository {
        databases: vec![database(100, "Broken"), database(101, "Healthy")],
        // No rows registered for database 100 — its query errors.
        rows: HashMap::from([(
            id(101).as_str().to_string(),
            vec![record(1, "Survivor", 10)],
        )]),
        ..Default::default()
    };

    let posts = catalog(repo).all_posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Survivor");
}

#[tokio::test]
async fn child_blocks_resolve_level_by_level_in_order() {
    let mut children = HashMap::new();
    // Page 50 has two top-level paragraphs; the first has children,
    // one of which has a child of its own.
    children.insert(
        id(50).as_str().to_string(),
        vec![paragraph(10, "first", true), paragraph(11, "second", false)],
    );
    children.insert(
        id(10).as_str().to_string(),
        vec![paragraph(20, "first child", false), paragraph(21, "second child", true)],
    );
    children.insert(
        id(21).as_str().to_string(),
        vec![paragraph(30, "grandchild", false)],
    );

    let repo = FakeRepository {
        children,
        ..Default::default()
    };

    let blocks = catalog(repo).page_blocks(&id(50)).await;
    assert_eq!(blocks.len(), 2);

    let first_children = blocks[0].children();
    assert_eq!(first_children.len(), 2);
    assert_eq!(
        first_children[0].children().len(),
        0,
        "sibling order preserved: first child has no children"
    );
    assert_eq!(first_children[1].children().len(), 1);
    assert!(blocks[1].children().is_empty());
}

#[tokio::test]
async fn depth_ceiling_stops_resolution() {
    let mut children = HashMap::new();
    children.insert(
        id(50).as_str().to_string(),
        vec![paragraph(10, "level 0", true)],
    );
    children.insert(
        id(10).as_str().to_string(),
        vec![paragraph(11, "level 1", true)],
    );
    children.insert(
        id(11).as_str().to_string(),
        vec![paragraph(12, "level 2", false)],
    );

    let repo = FakeRepository {
        children,
        ..Default::default()
    };

    // Depth 1: only the first level of children is resolved.
    let catalog = ContentCatalog::new(Arc::new(repo), 1);
    let blocks = catalog.page_blocks(&id(50)).await;
    assert_eq!(blocks[0].children().len(), 1);
    assert!(blocks[0].children()[0].children().is_empty());
}

#[tokio::test]
async fn site_content_pairs_every_post_with_a_body() {
    let mut children = HashMap::new();
    children.insert(
        id(1).as_str().to_string(),
        vec![paragraph(10, "body text", false)],
    );

    let repo = FakeRepository {
        pages: vec![record(1, "Hello World", 10)],
        children,
        ..Default::default()
    };

    let content = catalog(repo).site_content().await;
    assert_eq!(content.posts.len(), 1);
    let body = content.bodies.get(&content.posts[0].id).unwrap();
    assert_eq!(body.len(), 1);
}
