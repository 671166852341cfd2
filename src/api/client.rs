// src/api/client.rs
//! Pure HTTP client wrapper for the Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations without parsing or business logic.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::json;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(response)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        Ok(response)
    }
}

/// Endpoint path for one database's row query.
pub fn query_endpoint(database: &NotionId) -> String {
    format!("databases/{}/query", database.to_hyphenated())
}

/// Endpoint path for one block's (or page's) children listing.
///
/// A single page of `NOTION_API_PAGE_SIZE` results; the cursor is not
/// followed.
pub fn children_endpoint(parent: &NotionId) -> String {
    format!(
        "blocks/{}/children?page_size={}",
        parent.to_hyphenated(),
        NOTION_API_PAGE_SIZE
    )
}

/// Request body for a workspace search scoped to one object kind,
/// newest-edited first.
pub fn search_body(object_kind: &str) -> serde_json::Value {
    json!({
        "filter": { "value": object_kind, "property": "object" },
        "sort": { "direction": "descending", "timestamp": "last_edited_time" },
        "page_size": NOTION_API_PAGE_SIZE,
    })
}

/// Request body for a database row query.
pub fn query_body() -> serde_json::Value {
    json!({ "page_size": NOTION_API_PAGE_SIZE })
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_body_pins_page_size_and_sort() {
        let body = search_body("database");
        assert_eq!(body["page_size"], 100);
        assert_eq!(body["filter"]["value"], "database");
        assert_eq!(body["sort"]["timestamp"], "last_edited_time");
    }

    #[test]
    fn children_endpoint_carries_page_size() {
        let id = NotionId::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(
            children_endpoint(&id),
            "blocks/550e8400-e29b-41d4-a716-446655440000/children?page_size=100"
        );
    }
}
