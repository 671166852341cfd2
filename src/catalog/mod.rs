// src/catalog/mod.rs
//! Content discovery and normalization over a [`ContentRepository`].
//!
//! The catalog is the availability boundary: repository calls return
//! typed errors, and this is the one layer that degrades a failure to
//! an empty result — always with a log line naming what was lost. The
//! generated site prefers rendering with missing content over failing
//! the whole build.

mod extract;

pub use extract::{extract_post, parse_timestamp, AliasTable, ALIASES};

use crate::api::ContentRepository;
use crate::error::AppError;
use crate::model::{Block, DatabaseSummary, Post};
use crate::types::NotionId;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Everything one build pass renders: the post list and each post's
/// resolved block tree, keyed by page id.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub posts: Vec<Post>,
    pub bodies: HashMap<NotionId, Vec<Block>>,
}

/// Discovers posts across the workspace and resolves their content.
pub struct ContentCatalog {
    repo: Arc<dyn ContentRepository>,
    /// Levels of child blocks resolved below a page's top-level blocks.
    depth: u8,
}

impl ContentCatalog {
    pub fn new(repo: Arc<dyn ContentRepository>, depth: u8) -> Self {
        Self { repo, depth }
    }

    /// Candidate databases in the workspace, newest-edited first.
    pub async fn discover_databases(&self) -> Result<Vec<DatabaseSummary>, AppError> {
        self.repo.search_databases().await
    }

    /// Posts from one database, in the service's row order. Rows whose
    /// schema yields no title are dropped.
    pub async fn posts_from_database(&self, database: &NotionId) -> Result<Vec<Post>, AppError> {
        let records = self.repo.query_database(database).await?;
        Ok(records
            .iter()
            .map(extract_post)
            .filter(|post| !post.title.is_empty())
            .collect())
    }

    /// Posts from every discovered database, newest first. A database
    /// that fails to query is skipped; the others still contribute.
    pub async fn all_posts(&self) -> Vec<Post> {
        let databases = match self.discover_databases().await {
            Ok(databases) => databases,
            Err(e) => {
                log::error!("Error discovering databases: {}", e);
                return Vec::new();
            }
        };

        let mut posts = Vec::new();
        for database in &databases {
            match self.posts_from_database(&database.id).await {
                Ok(mut found) => posts.append(&mut found),
                // A database can vanish between discovery and query;
                // that is routine, everything else is worth a warning.
                Err(AppError::NotionService { ref code, .. }) if code.is_not_found() => {
                    log::debug!("Database {} is gone, skipping", database.id);
                }
                Err(e) => {
                    log::warn!(
                        "Skipping database '{}' ({}): {}",
                        database.title,
                        database.id,
                        e
                    );
                }
            }
        }

        sort_newest_first(&mut posts);
        posts
    }

    /// Top-level pages of the workspace as posts, newest first.
    pub async fn all_pages(&self) -> Vec<Post> {
        let records = match self.repo.search_pages().await {
            Ok(records) => records,
            Err(e) => {
                if e.is_fetch_failure() {
                    log::error!("Error fetching pages: {}", e);
                } else {
                    log::warn!("Page discovery returned nothing usable: {}", e);
                }
                return Vec::new();
            }
        };

        let mut posts: Vec<Post> = records
            .iter()
            .map(extract_post)
            .filter(|post| !post.title.is_empty())
            .collect();
        sort_newest_first(&mut posts);
        posts
    }

    /// Everything the workspace offers: database posts and standalone
    /// pages, fetched concurrently, de-duplicated by id (first
    /// occurrence wins), newest first.
    pub async fn all_content(&self) -> Vec<Post> {
        let (database_posts, individual_pages) = tokio::join!(self.all_posts(), self.all_pages());

        let mut content: Vec<Post> = database_posts;
        content.extend(individual_pages);

        let mut seen = HashSet::new();
        content.retain(|post| seen.insert(post.id.clone()));

        sort_newest_first(&mut content);
        log::info!("Found {} pieces of content", content.len());
        content
    }

    /// First post whose slug matches. Slugs are not guaranteed unique;
    /// an unknown slug is `None`, never an error.
    #[allow(dead_code)] // Library surface; the full build renders every slug
    pub async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        self.all_content()
            .await
            .into_iter()
            .find(|post| post.slug == slug)
    }

    /// The full build input: every discovered post plus its resolved
    /// block tree. Body fetches fan out concurrently across posts.
    pub async fn site_content(&self) -> SiteContent {
        let posts = self.all_content().await;
        let bodies = join_all(
            posts
                .iter()
                .map(|post| async move { (post.id.clone(), self.page_blocks(&post.id).await) }),
        )
        .await
        .into_iter()
        .collect();

        SiteContent { posts, bodies }
    }

    /// The block tree of one page, with descendants resolved.
    pub async fn page_blocks(&self, page: &NotionId) -> Vec<Block> {
        let mut blocks = match self.repo.list_children(page).await {
            Ok(blocks) => blocks,
            Err(e) => {
                log::error!("Error fetching content for page {}: {}", page, e);
                return Vec::new();
            }
        };

        self.resolve_children(&mut blocks).await;
        blocks
    }

    /// Resolves child blocks level by level with an explicit frontier
    /// queue: each round clones the pending ids, fans the fetches out
    /// concurrently across siblings, and attaches results in array
    /// order. Depth is bounded by the configured ceiling; a block whose
    /// fetch fails keeps an empty child list.
    async fn resolve_children(&self, roots: &mut [Block]) {
        let mut frontier: Vec<&mut Block> = roots.iter_mut().collect();
        let mut level = 0u8;

        while level < self.depth {
            let pending: Vec<&mut Block> = frontier
                .into_iter()
                .filter(|block| block.has_children())
                .collect();
            if pending.is_empty() {
                return;
            }

            let ids: Vec<NotionId> = pending.iter().map(|block| block.id().clone()).collect();
            let fetched = join_all(ids.iter().map(|id| self.repo.list_children(id))).await;

            let mut next: Vec<&mut Block> = Vec::new();
            for (block, result) in pending.into_iter().zip(fetched) {
                match result {
                    Ok(children) => {
                        block.set_children(children);
                        next.extend(block.children_mut().iter_mut());
                    }
                    Err(e) => {
                        log::warn!(
                            "Error fetching children for {} block {}: {}",
                            block.block_type(),
                            block.id(),
                            e
                        );
                    }
                }
            }

            frontier = next;
            level += 1;
        }

        let unresolved = frontier.iter().filter(|b| b.has_children()).count();
        if unresolved > 0 {
            log::warn!(
                "Depth ceiling ({}) reached with {} block(s) still carrying children",
                self.depth,
                unresolved
            );
        }
    }
}

/// Sorts by publication timestamp, strictly non-increasing. The sort is
/// stable, so posts sharing a timestamp keep their source order.
fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
