//! Headless Chromium implementation of the rendering boundary, via
//! `chromiumoxide` (CDP). One browser process per session; the CDP event
//! loop runs on a dedicated task for the session's lifetime.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::render::{PageLayout, RenderEngine, RenderError, RenderSession};

/// Launches one headless Chromium per render request.
pub struct ChromiumRenderer {
    executable: Option<String>,
}

impl ChromiumRenderer {
    /// `executable` overrides browser discovery (CHROME_EXECUTABLE); when
    /// `None`, chromiumoxide probes the usual install locations.
    pub fn new(executable: Option<String>) -> Self {
        Self { executable }
    }
}

#[async_trait]
impl RenderEngine for ChromiumRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(RenderError::EngineUnavailable)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::EngineUnavailable(e.to_string()))?;

        // CDP message pump; stops when the browser connection drops.
        let driver = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Box::new(ChromiumSession {
            browser,
            driver,
            page: None,
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    driver: JoinHandle<()>,
    page: Option<Page>,
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page, RenderError> {
        self.page
            .as_ref()
            .ok_or_else(|| RenderError::Failed("no document loaded".into()))
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn load_content(&mut self, html: &str) -> Result<(), RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Failed(e.to_string()))?;
        page.set_content(html)
            .await
            .map_err(|e| RenderError::Failed(e.to_string()))?;
        // Settle embedded resources before export.
        page.wait_for_navigation()
            .await
            .map_err(|e| RenderError::Failed(e.to_string()))?;
        self.page = Some(page);
        Ok(())
    }

    async fn emulate_screen_media(&mut self) -> Result<(), RenderError> {
        let params = SetEmulatedMediaParams::builder().media("screen").build();
        self.page()?
            .execute(params)
            .await
            .map_err(|e| RenderError::Failed(e.to_string()))?;
        Ok(())
    }

    async fn export_pdf(&mut self, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        let params = PrintToPdfParams {
            print_background: Some(layout.print_background),
            paper_width: Some(layout.paper_width_in),
            paper_height: Some(layout.paper_height_in),
            margin_top: Some(layout.margin_in),
            margin_bottom: Some(layout.margin_in),
            margin_left: Some(layout.margin_in),
            margin_right: Some(layout.margin_in),
            ..Default::default()
        };
        self.page()?
            .pdf(params)
            .await
            .map_err(|e| RenderError::Failed(e.to_string()))
    }

    async fn shutdown(&mut self) {
        self.page = None;
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Browser did not exit cleanly: {e}");
        }
        self.driver.abort();
    }
}
