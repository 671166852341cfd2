// src/api/responses.rs
//! Wire types for Notion API responses.
//!
//! Only the fields this tool reads are modeled; property and block
//! payloads stay as raw JSON values until the parser converts them to
//! the domain model.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic paginated response wrapper.
///
/// `next_cursor` and `has_more` are carried but never followed — every
/// call in this tool requests a single fixed-size page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Notion API error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionErrorBody {
    pub status: u16,
    pub code: String,
    pub message: String,
}

/// One page object as the API returns it. `properties` is absent on
/// partial objects the search endpoint sometimes returns; the parser
/// treats that as a schema mismatch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, Value>>,
}

/// One block object as the API returns it. The type-specific payload
/// lives in the flattened map under the key named by `block_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

/// One rich-text run on the wire. `plain_text` is populated for every
/// run kind (text, mention, equation), which is all the converter needs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: RawAnnotations,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub code: bool,
}
