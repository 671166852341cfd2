// src/api/memo.rs
//! Per-build request memoization.
//!
//! Wraps the HTTP client and remembers raw response text keyed by
//! request, so the same endpoint is fetched at most once per build
//! pass. Memo hits re-parse through the same parsers used for live
//! responses — the domain model itself is never stored. The map lives
//! only as long as the client, so nothing survives across builds and
//! there is no invalidation to get wrong.

use super::client::{extract_response_text, ApiResponse, NotionHttpClient};
use super::parser;
use super::ContentRepository;
use crate::error::AppError;
use crate::model::{Block, DatabaseSummary, PageRecord};
use crate::types::NotionId;
use dashmap::DashMap;

/// A [`ContentRepository`] that memoizes raw response bodies for the
/// duration of one build pass.
pub struct MemoizedClient {
    inner: NotionHttpClient,
    memo: DashMap<String, String>,
}

impl MemoizedClient {
    pub fn new(inner: NotionHttpClient) -> Self {
        Self {
            inner,
            memo: DashMap::new(),
        }
    }

    /// Number of memoized responses — exposed for build reporting.
    pub fn memoized_requests(&self) -> usize {
        self.memo.len()
    }

    fn hit(&self, key: &str) -> Option<ApiResponse<String>> {
        let cached = self.memo.get(key)?;
        log::debug!("Memo hit: {}", key);
        Some(ApiResponse {
            data: cached.value().clone(),
            status: reqwest::StatusCode::OK,
            url: format!("memo://{}", key),
        })
    }

    /// Only successful bodies are remembered; a failed call is retried
    /// the next time the same request is made.
    fn remember(&self, key: &str, response: &ApiResponse<String>) {
        if response.status.is_success() {
            self.memo.insert(key.to_string(), response.data.clone());
        }
    }

    async fn memoized_get(&self, key: &str, endpoint: &str) -> Result<ApiResponse<String>, AppError> {
        if let Some(cached) = self.hit(key) {
            return Ok(cached);
        }
        let response = self.inner.get(endpoint).await?;
        let api_response = extract_response_text(response).await?;
        self.remember(key, &api_response);
        Ok(api_response)
    }

    async fn memoized_post(
        &self,
        key: &str,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse<String>, AppError> {
        if let Some(cached) = self.hit(key) {
            return Ok(cached);
        }
        let response = self.inner.post(endpoint, body).await?;
        let api_response = extract_response_text(response).await?;
        self.remember(key, &api_response);
        Ok(api_response)
    }
}

#[async_trait::async_trait]
impl ContentRepository for MemoizedClient {
    async fn search_databases(&self) -> Result<Vec<DatabaseSummary>, AppError> {
        let result = self
            .memoized_post(
                "search_databases",
                "search",
                &super::client::search_body("database"),
            )
            .await?;
        parser::parse_database_search(result)
    }

    async fn search_pages(&self) -> Result<Vec<PageRecord>, AppError> {
        let result = self
            .memoized_post("search_pages", "search", &super::client::search_body("page"))
            .await?;
        parser::parse_page_search(result)
    }

    async fn query_database(&self, database: &NotionId) -> Result<Vec<PageRecord>, AppError> {
        let key = format!("query_{}", database.as_str());
        let endpoint = super::client::query_endpoint(database);
        let result = self
            .memoized_post(&key, &endpoint, &super::client::query_body())
            .await?;
        parser::parse_database_query(result)
    }

    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let key = format!("children_{}", parent.as_str());
        let endpoint = super::client::children_endpoint(parent);
        let result = self.memoized_get(&key, &endpoint).await?;
        parser::parse_block_children(result)
    }
}
