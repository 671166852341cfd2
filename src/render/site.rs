// src/render/site.rs
//! Composes site pages from posts and block trees via Handlebars
//! templates embedded in the binary.
//!
//! Three templates: the listing page, the per-slug post page, and the
//! not-found page. Post bodies go block tree → Markdown → HTML; the
//! Markdown step is the converter with the output-parity contract, the
//! HTML step is plain pulldown-cmark.

use crate::catalog::SiteContent;
use crate::config::{Profile, SiteConfig};
use crate::constants::POST_DIR;
use crate::error::AppError;
use crate::model::{Block, Post};
use crate::render::markup::blocks_to_markdown;
use crate::search::{SearchState, SearchView};
use crate::types::ValidatedUrl;
use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use pulldown_cmark::{html, Options, Parser};
use serde_json::{json, Value};
use std::path::PathBuf;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.hbs");
const POST_TEMPLATE: &str = include_str!("../../templates/post.hbs");
const NOT_FOUND_TEMPLATE: &str = include_str!("../../templates/not_found.hbs");
const STYLESHEET: &str = include_str!("../../templates/style.css");

/// One rendered page and where it belongs under the output directory.
#[derive(Debug, Clone)]
pub struct SiteDocument {
    pub path: PathBuf,
    pub html: String,
}

/// The composed site, ready for publishing.
#[derive(Debug, Clone, Default)]
pub struct SiteBundle {
    pub documents: Vec<SiteDocument>,
}

/// Renders site pages from build content.
pub struct SiteRenderer {
    engine: Handlebars<'static>,
    profile: Profile,
    base_url: ValidatedUrl,
}

impl SiteRenderer {
    pub fn new(config: &SiteConfig) -> Result<Self, AppError> {
        let mut engine = Handlebars::new();
        for (name, template) in [
            ("index", INDEX_TEMPLATE),
            ("post", POST_TEMPLATE),
            ("not_found", NOT_FOUND_TEMPLATE),
        ] {
            engine
                .register_template_string(name, template)
                .map_err(|e| AppError::TemplateRenderError {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self {
            engine,
            profile: config.profile.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Composes the full site: listing page, one page per post, and the
    /// not-found page.
    pub fn compose(&self, content: &SiteContent) -> Result<SiteBundle, AppError> {
        let mut documents = Vec::with_capacity(content.posts.len() + 3);

        documents.push(SiteDocument {
            path: PathBuf::from("index.html"),
            html: self.render_index(&content.posts)?,
        });

        for post in &content.posts {
            let blocks = content
                .bodies
                .get(&post.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            documents.push(SiteDocument {
                path: PathBuf::from(POST_DIR).join(&post.slug).join("index.html"),
                html: self.render_post(post, blocks)?,
            });
        }

        documents.push(SiteDocument {
            path: PathBuf::from("404.html"),
            html: self.render_not_found()?,
        });

        documents.push(SiteDocument {
            path: PathBuf::from("style.css"),
            html: STYLESHEET.to_string(),
        });

        log::info!("Composed {} page(s)", documents.len());
        Ok(SiteBundle { documents })
    }

    /// The listing page. The search machine's idle view decides whether
    /// the grid or the coming-soon placeholder renders; the filtering
    /// states are wired up client-side in the template with the same
    /// match rules.
    pub fn render_index(&self, posts: &[Post]) -> Result<String, AppError> {
        let state = SearchState::default();
        let placeholder = matches!(state.view(posts), SearchView::Placeholder);

        let data = json!({
            "profile": self.profile,
            "base_url": self.base_url,
            "placeholder": placeholder,
            "posts": posts.iter().map(post_card_data).collect::<Vec<_>>(),
        });
        self.render("index", &data)
    }

    /// One post page. A post whose block list came back empty renders
    /// the "content still being processed" card with a link to the
    /// Notion source instead of a body.
    pub fn render_post(&self, post: &Post, blocks: &[Block]) -> Result<String, AppError> {
        let markdown = blocks_to_markdown(blocks);
        let has_content = !blocks.is_empty();
        let author = post
            .author
            .clone()
            .unwrap_or_else(|| self.profile.name.clone());

        let data = json!({
            "profile": self.profile,
            "base_url": self.base_url,
            "post": {
                "title": post.title,
                "description": post.description,
                "tags": post.tags,
                "cover": post.cover,
                "author": author,
                "date": format_display_date(&post.published_at),
                "notion_url": post.url,
            },
            "has_content": has_content,
            "content_html": markdown_to_html(&markdown),
        });
        self.render("post", &data)
    }

    pub fn render_not_found(&self) -> Result<String, AppError> {
        let data = json!({
            "profile": self.profile,
            "base_url": self.base_url,
        });
        self.render("not_found", &data)
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, AppError> {
        self.engine
            .render(name, data)
            .map_err(|e| AppError::TemplateRenderError {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

fn post_card_data(post: &Post) -> Value {
    json!({
        "title": post.title,
        "slug": post.slug,
        "description": post.description,
        "tags": post.tags,
        "cover": post.cover,
        "date": format_display_date(&post.published_at),
    })
}

/// "June 15, 2023" — the display format post headers and cards use.
fn format_display_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockCommon, RichTextRun, TextBlock};
    use crate::types::NotionId;
    use chrono::TimeZone;

    fn renderer() -> SiteRenderer {
        SiteRenderer::new(&SiteConfig::default()).expect("embedded templates register")
    }

    fn sample_post() -> Post {
        let id = NotionId::parse("550e8400e29b41d4a716446655440000").unwrap();
        Post {
            url: id.to_public_url(),
            id,
            title: "Shipping The Blog".to_string(),
            slug: "shipping-the-blog".to_string(),
            description: "Notes from the launch".to_string(),
            tags: vec!["meta".to_string()],
            status: "Published".to_string(),
            published_at: Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap(),
            cover: None,
            author: None,
        }
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(TextBlock {
            common: BlockCommon::new(
                NotionId::parse("660e8400e29b41d4a716446655440000").unwrap(),
                false,
            ),
            rich_text: vec![RichTextRun::plain(text)],
        })
    }

    #[test]
    fn index_lists_posts_with_display_dates() {
        let html = renderer().render_index(&[sample_post()]).unwrap();
        assert!(html.contains("Shipping The Blog"));
        assert!(html.contains("June 15, 2023"));
        assert!(html.contains("/blog/shipping-the-blog/"));
        assert!(!html.contains("Coming Soon"));
    }

    #[test]
    fn index_without_posts_shows_the_placeholder() {
        let html = renderer().render_index(&[]).unwrap();
        assert!(html.contains("Coming Soon"));
    }

    #[test]
    fn post_page_renders_converted_body() {
        let html = renderer()
            .render_post(&sample_post(), &[paragraph("Hello from Notion")])
            .unwrap();
        assert!(html.contains("<p>Hello from Notion</p>"));
        assert!(html.contains("Shipping The Blog"));
        // Author falls back to the profile display name.
        assert!(html.contains("Ozzy"));
    }

    #[test]
    fn empty_body_renders_the_processing_card() {
        let html = renderer().render_post(&sample_post(), &[]).unwrap();
        assert!(html.contains("still being processed"));
        assert!(html.contains("https://notion.so/550e8400e29b41d4a716446655440000"));
    }

    #[test]
    fn site_compose_emits_index_posts_and_not_found() {
        let post = sample_post();
        let mut content = SiteContent {
            posts: vec![post.clone()],
            bodies: Default::default(),
        };
        content
            .bodies
            .insert(post.id.clone(), vec![paragraph("Body")]);

        let bundle = renderer().compose(&content).unwrap();
        let paths: Vec<_> = bundle
            .documents
            .iter()
            .map(|d| d.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "index.html".to_string(),
                "blog/shipping-the-blog/index.html".to_string(),
                "404.html".to_string(),
                "style.css".to_string(),
            ]
        );
    }
}
