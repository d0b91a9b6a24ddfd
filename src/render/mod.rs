//! HTML to PDF rendering.
//!
//! The conversion itself is delegated to an external engine; this module only
//! defines the contract handlers depend on and the production implementation
//! that shells out to the WeasyPrint CLI.

pub mod engine;

pub use engine::WeasyPrintEngine;

use thiserror::Error;

/// Errors that can occur while converting HTML to PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write HTML source: {0}")]
    WriteHtml(#[source] std::io::Error),
    #[error("PDF engine execution failed: {0}")]
    EngineIo(#[source] std::io::Error),
    #[error("PDF engine exited with status {0}: {1}")]
    EngineExit(i32, String),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// Contract for converting a final HTML document into PDF bytes.
///
/// Implementations must not return partial output: any failure along the way
/// is a [`RenderError`] and the caller discards the request.
pub trait PdfRenderer: Send + Sync {
    fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}
