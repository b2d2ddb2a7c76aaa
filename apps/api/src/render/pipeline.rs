//! Rendering pipeline — drives one engine session per request.
//!
//! Flow: launch → load content (bounded by the configured timeout) →
//! screen media emulation → PDF export → shutdown. The session is released
//! on every exit path, including timeout and export failure, so no engine
//! process outlives its request.

use std::time::Duration;

use bytes::Bytes;
use tracing::info;

use crate::render::{
    derive_filename, PageLayout, RenderArtifact, RenderEngine, RenderError, RenderSession,
};

/// Renders `markup` into a PDF artifact named after `display_name`.
///
/// Launch failures surface as `EngineUnavailable` before any session exists;
/// once a session is live it is shut down before any error propagates.
pub async fn render_document(
    engine: &dyn RenderEngine,
    markup: &str,
    display_name: &str,
    timeout: Duration,
) -> Result<RenderArtifact, RenderError> {
    let mut session = engine.launch().await?;

    let result = drive(session.as_mut(), markup, timeout).await;
    session.shutdown().await;
    let pdf = result?;

    let artifact = RenderArtifact {
        bytes: Bytes::from(pdf),
        filename: derive_filename(display_name),
    };
    info!(
        "Rendered {} ({} bytes)",
        artifact.filename,
        artifact.content_length()
    );
    Ok(artifact)
}

async fn drive(
    session: &mut dyn RenderSession,
    markup: &str,
    timeout: Duration,
) -> Result<Vec<u8>, RenderError> {
    tokio::time::timeout(timeout, session.load_content(markup))
        .await
        .map_err(|_| RenderError::Timeout)??;
    session.emulate_screen_media().await?;
    session.export_pdf(&PageLayout::a4()).await
}
