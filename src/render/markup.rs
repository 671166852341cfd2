// src/render/markup.rs
//! Converts a block tree into a Markdown string.
//!
//! Each tag has a fixed template; unknown tags produce an empty
//! fragment. Style markers nest in a fixed precedence — bold innermost,
//! then italic, then code, then strikethrough, with the link wrap
//! outermost. That order is the output-compatibility contract: a run
//! with every flag set on `x` renders as `` [~~`***x***`~~](href) ``.

use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::{Block, RichTextRun};

/// Flattens a block list to Markdown, fragments joined by blank lines.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
        }
        output.push_str(&block_to_markdown(block));
    }
    output
}

/// Converts one block (and its resolved children) to a fragment.
pub fn block_to_markdown(block: &Block) -> String {
    let own = own_fragment(block);
    let children = block.children();
    if children.is_empty() {
        return own;
    }

    let rendered_children = blocks_to_markdown(children);
    if rendered_children.is_empty() {
        return own;
    }

    // Nested list items indent under their parent marker; children of
    // any other block follow it as sibling-level fragments.
    match block {
        Block::BulletedListItem(_) | Block::NumberedListItem(_) => {
            format!("{}\n{}", own, indent(&rendered_children))
        }
        _ => format!("{}\n\n{}", own, rendered_children),
    }
}

fn own_fragment(block: &Block) -> String {
    match block {
        Block::Paragraph(b) => rich_text_to_markdown(&b.rich_text),
        Block::Heading1(b) => format!("# {}", rich_text_to_markdown(&b.rich_text)),
        Block::Heading2(b) => format!("## {}", rich_text_to_markdown(&b.rich_text)),
        Block::Heading3(b) => format!("### {}", rich_text_to_markdown(&b.rich_text)),
        Block::BulletedListItem(b) => format!("- {}", rich_text_to_markdown(&b.rich_text)),
        Block::NumberedListItem(b) => format!("1. {}", rich_text_to_markdown(&b.rich_text)),
        Block::Code(b) => {
            let language = if b.language.is_empty() {
                "text"
            } else {
                &b.language
            };
            format!(
                "```{}\n{}\n```",
                language,
                rich_text_to_markdown(&b.rich_text)
            )
        }
        Block::Quote(b) => format!("> {}", rich_text_to_markdown(&b.rich_text)),
        Block::Divider(_) => "---".to_string(),
        Block::Image(b) => {
            let caption = rich_text_to_markdown(&b.caption);
            format!("![{}]({})", caption, b.source.url())
        }
        Block::Unsupported(_) => String::new(),
    }
}

/// Composes rich-text runs, applying style markers in the fixed
/// precedence order and the link wrap last.
pub fn rich_text_to_markdown(runs: &[RichTextRun]) -> String {
    runs.iter()
        .map(|run| {
            let mut content = run.text.clone();

            if run.annotations.bold {
                content = format!("**{}**", content);
            }
            if run.annotations.italic {
                content = format!("*{}*", content);
            }
            if run.annotations.code {
                content = format!("`{}`", content);
            }
            if run.annotations.strikethrough {
                content = format!("~~{}~~", content);
            }
            if let Some(href) = &run.href {
                content = format!("[{}]({})", content, href);
            }

            content
        })
        .collect()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
