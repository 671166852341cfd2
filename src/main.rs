// src/main.rs

// Modules defined in the crate
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

// Specific imports
use crate::api::MemoizedClient;
use crate::catalog::{ContentCatalog, SiteContent};
use crate::config::{CommandLineInput, SiteConfig};
use crate::error::AppError;
use crate::pipeline::{ContentSource, SiteComposer, SitePublisher};
use crate::render::{SiteBundle, SiteRenderer};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use output::{deliver, DeliveryTarget, OutputPlan, OutputReport};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notionpress.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the three-stage Notion-to-site pipeline: fetch → compose → publish.
async fn execute_pipeline(config: &SiteConfig) -> Result<(), AppError> {
    let pipeline = NotionToSite::new(config);

    let content = pipeline.fetch().await?;
    let bundle = pipeline.compose(&content)?;
    let report = pipeline.publish(bundle)?;
    pipeline.report_completion(&content, &report);

    Ok(())
}

/// Orchestrates the retrieval, rendering, and publishing of Notion
/// content as a static site.
struct NotionToSite<'a> {
    config: &'a SiteConfig,
}

impl<'a> NotionToSite<'a> {
    fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Writes the composed site under the configured output directory.
    fn publish_bundle(&self, bundle: SiteBundle) -> Result<OutputReport, AppError> {
        let mut plan = OutputPlan::new().with_operation(DeliveryTarget::CreateDirectory {
            path: self.config.out_dir.clone(),
        });

        for document in bundle.documents {
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: self.config.out_dir.join(document.path),
                content: document.html,
            });
        }

        let report = deliver(plan)?;

        if !report.is_success() {
            return Err(AppError::PublishFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }

        Ok(report)
    }

    /// Reports completion to the user with stats and confirmations.
    fn report_completion(&self, content: &SiteContent, report: &OutputReport) {
        if content.posts.is_empty() {
            println!("⚠️  No content discovered — the site was generated with the placeholder page.");
            println!("   Check that the integration is shared with your databases and pages.");
        } else {
            println!("📄 Found {} post(s) in the workspace.", content.posts.len());
        }

        let empty_bodies = content
            .posts
            .iter()
            .filter(|post| content.bodies.get(&post.id).map_or(true, Vec::is_empty))
            .count();
        if empty_bodies > 0 {
            println!(
                "⚠️  {} post(s) rendered without a body (content missing or still processing).",
                empty_bodies
            );
        }

        let files_written = report
            .completed
            .iter()
            .filter(|c| matches!(c.operation, DeliveryTarget::WriteFile { .. }))
            .count();
        println!(
            "✓ Site written to {} ({} file(s), {} bytes)",
            self.config.out_dir.display(),
            files_written,
            report.stats.bytes_written
        );
    }
}

#[async_trait::async_trait]
impl ContentSource for NotionToSite<'_> {
    async fn fetch(&self) -> Result<SiteContent, AppError> {
        log::info!("Auto-discovering content from the Notion workspace");

        let http_client = api::NotionHttpClient::new(&self.config.api_key)?;
        let client = Arc::new(MemoizedClient::new(http_client));
        let catalog = ContentCatalog::new(client.clone(), self.config.depth);

        let content = catalog.site_content().await;

        log::info!(
            "Retrieved {} post(s) via {} memoized request(s)",
            content.posts.len(),
            client.memoized_requests(),
        );

        Ok(content)
    }
}

impl SiteComposer for NotionToSite<'_> {
    fn compose(&self, content: &SiteContent) -> Result<SiteBundle, AppError> {
        let renderer = SiteRenderer::new(self.config)?;
        renderer.compose(content)
    }
}

impl SitePublisher for NotionToSite<'_> {
    fn publish(&self, bundle: SiteBundle) -> Result<OutputReport, AppError> {
        self.publish_bundle(bundle)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SiteConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
