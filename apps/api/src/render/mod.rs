//! Rendering boundary — turns template markup into a paginated PDF via a
//! headless browser.
//!
//! The engine is modelled as a trait pair so the pipeline (and its tests)
//! never depend on a real browser: `RenderEngine` launches a `RenderSession`,
//! the session loads content, switches to screen media, and exports the PDF.
//! Every session is owned by exactly one request and released on every exit
//! path — sessions are never pooled.

pub mod chromium;
pub mod pipeline;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Rendering-stage failures. None of these are retried automatically; the
/// caller may retry the whole request.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("timed out while loading document content")]
    Timeout,

    #[error("document export failed: {0}")]
    Failed(String),
}

/// Fixed page geometry for the exported document. Chromium's print API takes
/// inches, the layout is specified in millimetres.
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub paper_width_in: f64,
    pub paper_height_in: f64,
    pub margin_in: f64,
    pub print_background: bool,
}

const MM_PER_INCH: f64 = 25.4;

impl PageLayout {
    /// A4 portrait with 8 mm margins on all four sides and background
    /// graphics enabled — the one fixed layout this service exports.
    pub fn a4() -> Self {
        Self {
            paper_width_in: 210.0 / MM_PER_INCH,
            paper_height_in: 297.0 / MM_PER_INCH,
            margin_in: 8.0 / MM_PER_INCH,
            print_background: true,
        }
    }
}

/// The final deliverable: document bytes plus delivery metadata. Ephemeral,
/// exists only for the duration of the response.
#[derive(Debug, Clone)]
pub struct RenderArtifact {
    pub bytes: Bytes,
    pub filename: String,
}

impl RenderArtifact {
    pub fn content_length(&self) -> usize {
        self.bytes.len()
    }
}

/// Launches rendering sessions. Carried in `AppState` as
/// `Arc<dyn RenderEngine>` so tests can substitute a fake.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError>;
}

/// One exclusive rendering session. Callers must invoke `shutdown` on every
/// path once `launch` has succeeded; `pipeline::render_document` owns that
/// guarantee.
#[async_trait]
pub trait RenderSession: Send {
    /// Loads the markup as the document content and waits until all embedded
    /// resources have settled before returning.
    async fn load_content(&mut self, html: &str) -> Result<(), RenderError>;

    /// Forces "screen" media emulation so screen-oriented styling applies to
    /// the paginated export.
    async fn emulate_screen_media(&mut self) -> Result<(), RenderError>;

    /// Exports the loaded document as PDF bytes.
    async fn export_pdf(&mut self, layout: &PageLayout) -> Result<Vec<u8>, RenderError>;

    /// Releases the underlying engine instance. Infallible by contract —
    /// release problems are logged, never surfaced over a render result.
    async fn shutdown(&mut self);
}

/// Derives the download filename from the profile's full name: whitespace
/// runs collapse to a single underscore, then the `_CV.pdf` suffix.
pub fn derive_filename(full_name: &str) -> String {
    let safe = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{safe}_CV.pdf")
}
