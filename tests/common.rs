//! Shared test doubles for the API tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use docu_forge_server::document::TemplateStore;
use docu_forge_server::redraft::{DraftError, DraftGenerator};
use docu_forge_server::render::{PdfRenderer, RenderError};
use docu_forge_server::AppState;

pub const MOCK_PDF: &[u8] = b"%PDF-1.4 mock";

/// Renderer double that records every HTML input it receives, so tests can
/// assert on the substituted document without a real PDF engine.
#[derive(Clone, Default)]
pub struct MockPdfRenderer {
    rendered: Arc<Mutex<Vec<String>>>,
}

impl MockPdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_html(&self) -> Option<String> {
        self.rendered.lock().last().cloned()
    }
}

impl PdfRenderer for MockPdfRenderer {
    fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        self.rendered.lock().push(html.to_string());
        Ok(MOCK_PDF.to_vec())
    }
}

/// Renderer double that always fails, for the no-partial-output paths.
pub struct FailingPdfRenderer;

impl PdfRenderer for FailingPdfRenderer {
    fn render_pdf(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::EngineExit(1, "mock engine failure".to_string()))
    }
}

/// Draft generator double that succeeds immediately, echoing its inputs.
pub struct EchoDrafter;

#[async_trait]
impl DraftGenerator for EchoDrafter {
    async fn redraft(
        &self,
        original_html: &str,
        instructions: &str,
    ) -> Result<String, DraftError> {
        Ok(format!(
            "<html><body><p>redraft of: {}</p><p>per: {}</p></body></html>",
            original_html, instructions
        ))
    }
}

/// Draft generator double that always fails, as if the upstream were down.
pub struct FailingDrafter;

#[async_trait]
impl DraftGenerator for FailingDrafter {
    async fn redraft(
        &self,
        _original_html: &str,
        _instructions: &str,
    ) -> Result<String, DraftError> {
        Err(DraftError::Status(503, "service unavailable".to_string()))
    }
}

/// Draft generator double that blocks until the test releases its gate,
/// letting tests observe the `processing` state deterministically.
pub struct GatedDrafter {
    gate: Arc<Notify>,
}

impl GatedDrafter {
    pub fn new() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (Self { gate: gate.clone() }, gate)
    }
}

#[async_trait]
impl DraftGenerator for GatedDrafter {
    async fn redraft(
        &self,
        original_html: &str,
        _instructions: &str,
    ) -> Result<String, DraftError> {
        self.gate.notified().await;
        Ok(format!("<html><body>{}</body></html>", original_html))
    }
}

/// State over the real bundled templates with substituted collaborators.
pub fn test_state(
    renderer: Arc<dyn PdfRenderer>,
    drafter: Arc<dyn DraftGenerator>,
) -> AppState {
    AppState::with_components(TemplateStore::new(), renderer, drafter)
}
