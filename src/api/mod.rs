// src/api/mod.rs
//! Notion API interaction — the ability to retrieve content from a workspace.
//!
//! This module provides a data-oriented interface to the Notion API,
//! with clear separation between I/O operations, parsing, and business logic.

pub mod client;
mod memo;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::model::{Block, DatabaseSummary, PageRecord};
use crate::types::NotionId;
use client::extract_response_text;

/// The ability to retrieve content from a Notion workspace.
///
/// This is the fundamental algebra for API interaction. The catalog
/// depends on this trait, never on HTTP details — tests swap in an
/// in-memory implementation.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Workspace search filtered to databases, newest-edited first.
    async fn search_databases(&self) -> Result<Vec<DatabaseSummary>, AppError>;

    /// Workspace search filtered to pages, newest-edited first.
    async fn search_pages(&self) -> Result<Vec<PageRecord>, AppError>;

    /// Rows of one database as page records.
    async fn query_database(&self, database: &NotionId) -> Result<Vec<PageRecord>, AppError>;

    /// Direct children of one block or page, children unresolved.
    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;
}

#[async_trait::async_trait]
impl ContentRepository for client::NotionHttpClient {
    async fn search_databases(&self) -> Result<Vec<DatabaseSummary>, AppError> {
        let response = self.post("search", &client::search_body("database")).await?;
        let result = extract_response_text(response).await?;
        parser::parse_database_search(result)
    }

    async fn search_pages(&self) -> Result<Vec<PageRecord>, AppError> {
        let response = self.post("search", &client::search_body("page")).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_search(result)
    }

    async fn query_database(&self, database: &NotionId) -> Result<Vec<PageRecord>, AppError> {
        let endpoint = client::query_endpoint(database);
        let response = self.post(&endpoint, &client::query_body()).await?;
        let result = extract_response_text(response).await?;
        parser::parse_database_query(result)
    }

    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = client::children_endpoint(parent);
        let response = self.get(&endpoint).await?;
        let result = extract_response_text(response).await?;
        parser::parse_block_children(result)
    }
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use memo::MemoizedClient;
