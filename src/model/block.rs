// src/model/block.rs

use super::rich_text::RichTextRun;
use crate::types::NotionId;
use serde::{Deserialize, Serialize};

/// Data shared by every block: identity, the service's children flag,
/// and the resolved child blocks (empty until resolution runs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: NotionId,
    pub has_children: bool,
    pub children: Vec<Block>,
}

impl BlockCommon {
    pub fn new(id: NotionId, has_children: bool) -> Self {
        Self {
            id,
            has_children,
            children: Vec::new(),
        }
    }
}

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// A tagged node in the source document's content tree.
///
/// The vocabulary is the set of tags the markup converter knows how to
/// render; anything else lands in `Unsupported`, which carries the raw
/// tag string and renders to an empty fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    Code(CodeBlock),
    Quote(TextBlock),
    Divider(DividerBlock),
    Image(ImageBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &NotionId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get the block's resolved children
    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    /// Get mutable reference to children
    pub fn children_mut(&mut self) -> &mut Vec<Block> {
        match_all_blocks!(self, b => &mut b.common.children)
    }

    /// Whether the service reported unresolved children for this block
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Set resolved children
    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    /// The block's tag as the API spells it
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::Code(_) => "code",
            Block::Quote(_) => "quote",
            Block::Divider(_) => "divider",
            Block::Image(_) => "image",
            Block::Unsupported(b) => &b.block_type,
        }
    }
}

/// A block whose payload is a run of rich text: paragraphs, headings,
/// list items, quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub rich_text: Vec<RichTextRun>,
}

/// Code block with a fence language tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub rich_text: Vec<RichTextRun>,
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Image block with a resolved source URL and caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub source: ImageSource,
    pub caption: Vec<RichTextRun>,
}

/// Where an image lives: uploaded to the service or hosted externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ImageSource {
    #[serde(rename = "file")]
    File { url: String },
    #[serde(rename = "external")]
    External { url: String },
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            ImageSource::File { url } => url,
            ImageSource::External { url } => url,
        }
    }
}

/// A block whose tag the converter has no template for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
