// src/api/parser.rs
//! Parses raw API response bodies into the domain model.
//!
//! Success bodies go through serde into the wire types and from there
//! into domain records; error bodies become typed `AppError`s. Records
//! that individually fail to convert are logged and skipped, so one
//! odd row never empties a whole listing.

use super::client::ApiResponse;
use super::responses::{NotionErrorBody, PaginatedResponse, RawBlock, RawPage, RawRichText};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{
    Annotations, Block, BlockCommon, CodeBlock, DatabaseSummary, DateStamp, DividerBlock, FileRef,
    ImageBlock, ImageSource, PageRecord, PropertyValue, RichTextRun, SelectOption, TextBlock,
    UnsupportedBlock,
};
use crate::types::NotionId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use reqwest::StatusCode;
use serde_json::Value;

/// Parse any Notion API response body, dispatching on HTTP status.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        parse_error_body(&result.data, result.status, &result.url)
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        let preview = if body.len() > ERROR_BODY_PREVIEW_LENGTH {
            format!("{}...", &body[..ERROR_BODY_PREVIEW_LENGTH])
        } else {
            body.to_string()
        };

        AppError::MalformedResponse(format!("{} (body: {})", e, preview))
    })
}

fn parse_error_body<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(error) = serde_json::from_str::<NotionErrorBody>(body) {
        return Err(AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status,
        });
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

// ---------------------------------------------------------------------------
// Listing parsers
// ---------------------------------------------------------------------------

/// Parse a workspace search response into database summaries.
pub fn parse_database_search(result: ApiResponse<String>) -> Result<Vec<DatabaseSummary>, AppError> {
    let response: PaginatedResponse<Value> = parse_api_response(result)?;
    let databases = response
        .results
        .iter()
        .filter(|v| v.get("object").and_then(Value::as_str) == Some("database"))
        .filter_map(|v| match database_from_value(v) {
            Ok(db) => Some(db),
            Err(e) => {
                log::warn!("Skipping unparseable database result: {}", e);
                None
            }
        })
        .collect();
    Ok(databases)
}

/// Parse a workspace search response into page records.
pub fn parse_page_search(result: ApiResponse<String>) -> Result<Vec<PageRecord>, AppError> {
    let response: PaginatedResponse<Value> = parse_api_response(result)?;
    Ok(collect_page_records(
        response
            .results
            .iter()
            .filter(|v| v.get("object").and_then(Value::as_str) == Some("page")),
    ))
}

/// Parse a database query response into page records.
pub fn parse_database_query(result: ApiResponse<String>) -> Result<Vec<PageRecord>, AppError> {
    let response: PaginatedResponse<Value> = parse_api_response(result)?;
    Ok(collect_page_records(response.results.iter()))
}

/// Parse a block-children response into domain blocks.
pub fn parse_block_children(result: ApiResponse<String>) -> Result<Vec<Block>, AppError> {
    let response: PaginatedResponse<RawBlock> = parse_api_response(result)?;
    response.results.into_iter().map(convert_block).collect()
}

fn collect_page_records<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<PageRecord> {
    values
        .filter_map(|v| match page_from_value(v) {
            Ok(record) => Some(record),
            Err(e @ AppError::SchemaMismatch { .. }) => {
                log::debug!("Skipping partial page result: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Skipping unparseable page result: {}", e);
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Record conversion
// ---------------------------------------------------------------------------

fn database_from_value(value: &Value) -> Result<DatabaseSummary, AppError> {
    let raw_id = value
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("database result without id".to_string()))?;
    let title = rich_text_from(value.get("title"));
    Ok(DatabaseSummary {
        id: NotionId::parse(raw_id)?,
        title: RichTextRun::plain_text_of(&title),
    })
}

/// Convert one page object into a record. A page without a property map
/// (the search endpoint returns such partial objects) is a schema
/// mismatch, not a parse failure.
pub fn page_from_value(value: &Value) -> Result<PageRecord, AppError> {
    let raw: RawPage = serde_json::from_value(value.clone())?;
    let id = NotionId::parse(&raw.id)?;

    let Some(raw_properties) = raw.properties else {
        return Err(AppError::SchemaMismatch {
            record_id: id.as_str().to_string(),
            attribute: "properties",
        });
    };

    let mut properties = IndexMap::with_capacity(raw_properties.len());
    for (name, value) in raw_properties {
        properties.insert(name, convert_property(&value));
    }

    Ok(PageRecord {
        id,
        created_time: raw.created_time,
        properties,
    })
}

fn convert_property(value: &Value) -> PropertyValue {
    let property_type = value.get("type").and_then(Value::as_str).unwrap_or("");
    match property_type {
        "title" => PropertyValue::Title(rich_text_from(value.get("title"))),
        "rich_text" => PropertyValue::RichText(rich_text_from(value.get("rich_text"))),
        // A "status" property is shaped like a select for our purposes:
        // one named option.
        "select" | "status" => PropertyValue::Select(select_option(value.get(property_type))),
        "multi_select" => PropertyValue::MultiSelect(
            value
                .get("multi_select")
                .and_then(Value::as_array)
                .map(|options| options.iter().filter_map(|o| select_option(Some(o))).collect())
                .unwrap_or_default(),
        ),
        "date" => PropertyValue::Date(
            value
                .get("date")
                .and_then(|d| d.get("start"))
                .and_then(Value::as_str)
                .map(|start| DateStamp {
                    start: start.to_string(),
                }),
        ),
        "files" => PropertyValue::Files(
            value
                .get("files")
                .and_then(Value::as_array)
                .map(|files| files.iter().filter_map(file_url).collect())
                .unwrap_or_default(),
        ),
        "checkbox" => {
            PropertyValue::Checkbox(value.get("checkbox").and_then(Value::as_bool).unwrap_or(false))
        }
        "url" => PropertyValue::Url(
            value
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        "created_time" => match value
            .get("created_time")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        {
            Some(dt) => PropertyValue::CreatedTime(dt.with_timezone(&Utc)),
            None => PropertyValue::Unsupported {
                property_type: "created_time".to_string(),
            },
        },
        other => PropertyValue::Unsupported {
            property_type: other.to_string(),
        },
    }
}

fn select_option(value: Option<&Value>) -> Option<SelectOption> {
    value
        .and_then(|v| v.get("name"))
        .and_then(Value::as_str)
        .map(|name| SelectOption {
            name: name.to_string(),
        })
}

fn file_url(value: &Value) -> Option<FileRef> {
    let url = value
        .get("file")
        .and_then(|f| f.get("url"))
        .or_else(|| value.get("external").and_then(|e| e.get("url")))
        .and_then(Value::as_str)?;
    Some(FileRef {
        url: url.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Block conversion
// ---------------------------------------------------------------------------

/// Convert one wire block into the domain vocabulary. Unknown tags are
/// carried as `Unsupported` rather than dropped, so the converter's
/// "unknown renders empty" rule stays observable.
pub fn convert_block(raw: RawBlock) -> Result<Block, AppError> {
    let common = BlockCommon::new(NotionId::parse(&raw.id)?, raw.has_children);
    let data = raw.payload.get(&raw.block_type).cloned().unwrap_or(Value::Null);

    let block = match raw.block_type.as_str() {
        "paragraph" => Block::Paragraph(text_block(common, &data)),
        "heading_1" => Block::Heading1(text_block(common, &data)),
        "heading_2" => Block::Heading2(text_block(common, &data)),
        "heading_3" => Block::Heading3(text_block(common, &data)),
        "bulleted_list_item" => Block::BulletedListItem(text_block(common, &data)),
        "numbered_list_item" => Block::NumberedListItem(text_block(common, &data)),
        "quote" => Block::Quote(text_block(common, &data)),
        "code" => Block::Code(CodeBlock {
            common,
            language: data
                .get("language")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            rich_text: rich_text_from(data.get("rich_text")),
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        "image" => Block::Image(ImageBlock {
            common,
            source: image_source(&data),
            caption: rich_text_from(data.get("caption")),
        }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
        }),
    };

    Ok(block)
}

fn text_block(common: BlockCommon, data: &Value) -> TextBlock {
    TextBlock {
        common,
        rich_text: rich_text_from(data.get("rich_text")),
    }
}

fn image_source(data: &Value) -> ImageSource {
    if let Some(url) = data
        .get("file")
        .and_then(|f| f.get("url"))
        .and_then(Value::as_str)
    {
        return ImageSource::File {
            url: url.to_string(),
        };
    }
    ImageSource::External {
        url: data
            .get("external")
            .and_then(|e| e.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn rich_text_from(value: Option<&Value>) -> Vec<RichTextRun> {
    let Some(value) = value else {
        return Vec::new();
    };
    let raw: Vec<RawRichText> = serde_json::from_value(value.clone()).unwrap_or_default();
    raw.into_iter()
        .map(|item| RichTextRun {
            text: item.plain_text,
            annotations: Annotations {
                bold: item.annotations.bold,
                italic: item.annotations.italic,
                code: item.annotations.code,
                strikethrough: item.annotations.strikethrough,
            },
            href: item.href,
        })
        .collect()
}
