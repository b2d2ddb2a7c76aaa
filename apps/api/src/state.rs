use std::sync::Arc;

use crate::config::Config;
use crate::render::RenderEngine;
use crate::store::EntityStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators sit behind trait objects: the Entity Store so the
/// aggregate logic runs against an in-memory double in tests, the render
/// engine so no test ever launches a browser.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub renderer: Arc<dyn RenderEngine>,
    pub config: Config,
}
