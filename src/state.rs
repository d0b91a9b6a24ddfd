//! Application state - the injected collaborators every handler works with.

use std::sync::Arc;

use crate::document::TemplateStore;
use crate::redraft::{ChatCompletionDrafter, DraftGenerator, DrafterConfig, TaskStore};
use crate::render::{PdfRenderer, WeasyPrintEngine};

/// Shared state with a defined lifecycle: created once at process start,
/// cloned into workers, never persisted. Tests build isolated instances
/// through [`AppState::with_components`].
#[derive(Clone)]
pub struct AppState {
    pub templates: TemplateStore,
    pub renderer: Arc<dyn PdfRenderer>,
    pub drafter: Arc<dyn DraftGenerator>,
    pub tasks: TaskStore,
}

impl AppState {
    /// Build the production state from the environment.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = DrafterConfig::from_env()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("docu-forge-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_components(
            TemplateStore::new(),
            Arc::new(WeasyPrintEngine),
            Arc::new(ChatCompletionDrafter::new(http_client, config)),
        ))
    }

    /// Assemble state from explicit collaborators. This is the seam tests use
    /// to substitute mock renderers and draft generators.
    pub fn with_components(
        templates: TemplateStore,
        renderer: Arc<dyn PdfRenderer>,
        drafter: Arc<dyn DraftGenerator>,
    ) -> Self {
        Self {
            templates,
            renderer,
            drafter,
            tasks: TaskStore::new(),
        }
    }
}
