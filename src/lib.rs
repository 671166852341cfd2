// src/lib.rs
//! notionpress library — builds a static blog site from a Notion workspace.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration** — `SiteConfig`, `Profile`
//! - **Domain model** — `Post`, `Block`, `RichTextRun`, `PageRecord`
//! - **API client** — `ContentRepository`, `NotionHttpClient`, `MemoizedClient`
//! - **Catalog** — `ContentCatalog`, the alias-table extractor
//! - **Rendering** — `blocks_to_markdown`, `SiteRenderer`
//! - **Search** — `filter_posts`, `SearchState`

// Internal modules — must match what's in main.rs
mod api;
mod catalog;
mod config;
mod constants;
mod error;
mod model;
mod output;
mod pipeline;
mod render;
mod search;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, Profile, SiteConfig};

// --- Domain Model ---
pub use crate::model::{
    Annotations, Block, BlockCommon, CodeBlock, DatabaseSummary, DateStamp, DividerBlock, FileRef,
    ImageBlock, ImageSource, PageRecord, Post, PropertyValue, RichTextRun, SelectOption, TextBlock,
    UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    client::{extract_response_text, ApiResponse},
    parser::{
        parse_block_children, parse_database_query, parse_database_search, parse_page_search,
        page_from_value,
    },
    ContentRepository, MemoizedClient, NotionHttpClient,
};

// --- Catalog ---
pub use crate::catalog::{extract_post, parse_timestamp, ContentCatalog, SiteContent, ALIASES};

// --- Rendering ---
pub use crate::render::{
    block_to_markdown, blocks_to_markdown, rich_text_to_markdown, SiteBundle, SiteDocument,
    SiteRenderer,
};

// --- Search ---
pub use crate::search::{filter_posts, SearchState, SearchView};

// --- Output ---
pub use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};

// --- Pipeline Traits ---
pub use crate::pipeline::{ContentSource, SiteComposer, SitePublisher};
