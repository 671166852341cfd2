// src/pipeline.rs
//! Pipeline capability traits — abstract the three stages of the
//! Notion-to-site build: fetch → compose → publish.
//!
//! Each trait describes a single capability, enabling testing each
//! stage in isolation.

use crate::catalog::SiteContent;
use crate::error::AppError;
use crate::output::OutputReport;
use crate::render::SiteBundle;

/// Retrieves everything the build renders from the content service.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self) -> Result<SiteContent, AppError>;
}

/// Transforms build content into rendered site pages.
pub trait SiteComposer {
    fn compose(&self, content: &SiteContent) -> Result<SiteBundle, AppError>;
}

/// Writes a composed site to its destination.
pub trait SitePublisher {
    fn publish(&self, bundle: SiteBundle) -> Result<OutputReport, AppError>;
}
