// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how the system operates: how much it fetches per call, how deep
//! it resolves, where the output lands.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects each Notion API call asks for.
///
/// The Notion API maximum is 100. Discovery and query calls request a
/// single page of this size and do not follow cursors.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Default nesting depth when resolving a page's block tree.
///
/// Blocks can nest (list items inside list items, quoted lists). Real
/// blog posts rarely go past three or four levels; 10 leaves generous
/// headroom while keeping the frontier walk bounded.
pub const DEFAULT_FETCH_DEPTH: u8 = 10;

// ---------------------------------------------------------------------------
// Site output
// ---------------------------------------------------------------------------

/// Default directory the generated site is written into.
pub const DEFAULT_OUT_DIR: &str = "public";

/// Directory of post pages relative to the output directory.
///
/// Matches the original route layout: `/blog/<slug>/`.
pub const POST_DIR: &str = "blog";

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
