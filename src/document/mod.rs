//! Document generation - templated legal agreements rendered to PDF.
//!
//! The pipeline is template lookup -> placeholder substitution -> PDF
//! rendering. Each stage is its own submodule:
//! - `templates` - document types, alias tables, and template loading
//! - `fill` - the placeholder substitution engine
//! - `handlers` - the HTTP surface (`/get-template/{name}`, `/generate`)

pub mod fill;
pub mod handlers;
pub mod templates;

pub use fill::fill;
pub use templates::{DocumentType, TemplateStore};

use thiserror::Error;

use crate::render::RenderError;
use templates::TemplateError;

/// Errors that can occur while generating a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Run the full generation pipeline for one request.
///
/// Unknown document types fall back to the NDA template; the requested key is
/// still used (sanitized) for the download filename. Any renderer failure is
/// terminal for the request, no partial output is produced.
pub fn generate(
    templates: &TemplateStore,
    renderer: &dyn crate::render::PdfRenderer,
    document_type: &str,
    context: &std::collections::HashMap<String, serde_json::Value>,
) -> Result<GeneratedDocument, DocumentError> {
    let doc_type = DocumentType::from_key(document_type);
    let template = templates.load(doc_type)?;
    let html = fill(&template, context, doc_type.aliases());
    let pdf = renderer.render_pdf(&html)?;

    let safe_type = sanitize_filename::sanitize(document_type);
    Ok(GeneratedDocument {
        filename: format!("{}_agreement.pdf", safe_type),
        pdf,
    })
}
