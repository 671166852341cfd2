// src/model/mod.rs
//! Domain model: the post record the site renders, the block tree it is
//! rendered from, and the raw page record the catalog normalizes.

mod block;
mod rich_text;

pub use block::{
    Block, BlockCommon, CodeBlock, DividerBlock, ImageBlock, ImageSource, TextBlock,
    UnsupportedBlock,
};
pub use rich_text::{Annotations, RichTextRun};

use crate::types::NotionId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A blog post, derived from a page record. Never stored; rebuilt from
/// the content service on every build pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// The source service's immutable page identifier.
    pub id: NotionId,
    pub title: String,
    /// Derived from an explicit property or the slugified title.
    /// Not guaranteed unique across the data set; first match wins.
    pub slug: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: String,
    pub published_at: DateTime<Utc>,
    pub cover: Option<String>,
    pub author: Option<String>,
    /// Canonical source URL on notion.so.
    pub url: String,
}

/// One page as the API returns it: identity, timestamps, and the raw
/// property map in source order. Source order matters — the generic
/// title fallback picks the first title-typed property it sees.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: NotionId,
    pub created_time: DateTime<Utc>,
    pub properties: IndexMap<String, PropertyValue>,
}

/// A typed property value from a page record.
///
/// Only the kinds the post extractor consumes get a dedicated variant;
/// everything else is carried as `Unsupported` with its tag so schema
/// logging can name what it skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Vec<RichTextRun>),
    RichText(Vec<RichTextRun>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Date(Option<DateStamp>),
    Files(Vec<FileRef>),
    Checkbox(bool),
    Url(Option<String>),
    CreatedTime(DateTime<Utc>),
    Unsupported { property_type: String },
}

impl PropertyValue {
    /// The property kind as the API spells it.
    #[allow(dead_code)]
    pub fn property_type(&self) -> &str {
        match self {
            PropertyValue::Title(_) => "title",
            PropertyValue::RichText(_) => "rich_text",
            PropertyValue::Select(_) => "select",
            PropertyValue::MultiSelect(_) => "multi_select",
            PropertyValue::Date(_) => "date",
            PropertyValue::Files(_) => "files",
            PropertyValue::Checkbox(_) => "checkbox",
            PropertyValue::Url(_) => "url",
            PropertyValue::CreatedTime(_) => "created_time",
            PropertyValue::Unsupported { property_type } => property_type,
        }
    }
}

/// A select / multi-select / status option. Only the name matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A date property value. `start` is kept as the API's string form
/// ("2024-03-01" or full RFC 3339); the extractor parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStamp {
    pub start: String,
}

/// A file attached to a files property, already resolved to its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub url: String,
}

/// A discovered database: just enough identity to query it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSummary {
    pub id: NotionId,
    pub title: String,
}
