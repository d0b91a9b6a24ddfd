//! WeasyPrint rendering engine.
//!
//! Handles the low-level details of writing HTML source to a temporary file,
//! invoking the converter CLI, and reading back the output PDF.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

use super::{PdfRenderer, RenderError};

const ENGINE_BIN: &str = "weasyprint";
const SOURCE_FILE: &str = "document.html";
const OUTPUT_FILE: &str = "document.pdf";

/// Stateless engine that renders HTML to PDF through the WeasyPrint CLI.
pub struct WeasyPrintEngine;

impl PdfRenderer for WeasyPrintEngine {
    /// Render an HTML string to a PDF byte stream.
    ///
    /// The source is written into a fresh temporary directory so relative
    /// resource lookups inside the engine cannot escape the request.
    fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let html_path = temp_dir.path().join(SOURCE_FILE);
        let output_path = temp_dir.path().join(OUTPUT_FILE);

        fs::write(&html_path, html).map_err(RenderError::WriteHtml)?;

        let output = Command::new(ENGINE_BIN)
            .arg(&html_path)
            .arg(&output_path)
            .current_dir(temp_dir.path())
            .output()
            .map_err(RenderError::EngineIo)?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::EngineExit(code, stderr));
        }

        fs::read(&output_path).map_err(RenderError::ReadPdf)
    }
}
