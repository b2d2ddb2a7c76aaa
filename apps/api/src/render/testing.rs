//! Test doubles for the rendering boundary. The fake records every session
//! call so tests can assert step order and guaranteed release.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::render::{PageLayout, RenderEngine, RenderError, RenderSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCall {
    Load,
    EmulateMedia,
    Export,
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
enum FailAt {
    Never,
    Launch,
    LoadHangs,
    Export,
}

pub struct FakeEngine {
    pdf: Vec<u8>,
    fail_at: FailAt,
    calls: Arc<Mutex<Vec<SessionCall>>>,
    launches: Arc<Mutex<usize>>,
}

impl FakeEngine {
    pub fn ok(pdf: Vec<u8>) -> Self {
        Self::new(pdf, FailAt::Never)
    }

    pub fn launch_fails() -> Self {
        Self::new(Vec::new(), FailAt::Launch)
    }

    pub fn load_hangs(pdf: Vec<u8>) -> Self {
        Self::new(pdf, FailAt::LoadHangs)
    }

    pub fn export_fails() -> Self {
        Self::new(Vec::new(), FailAt::Export)
    }

    fn new(pdf: Vec<u8>, fail_at: FailAt) -> Self {
        Self {
            pdf,
            fail_at,
            calls: Arc::new(Mutex::new(Vec::new())),
            launches: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn launch_count(&self) -> usize {
        *self.launches.lock().unwrap()
    }
}

#[async_trait]
impl RenderEngine for FakeEngine {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        *self.launches.lock().unwrap() += 1;
        if matches!(self.fail_at, FailAt::Launch) {
            return Err(RenderError::EngineUnavailable("fake launch failure".into()));
        }
        Ok(Box::new(FakeSession {
            pdf: self.pdf.clone(),
            fail_at: self.fail_at,
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct FakeSession {
    pdf: Vec<u8>,
    fail_at: FailAt,
    calls: Arc<Mutex<Vec<SessionCall>>>,
}

impl FakeSession {
    fn record(&self, call: SessionCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RenderSession for FakeSession {
    async fn load_content(&mut self, _html: &str) -> Result<(), RenderError> {
        self.record(SessionCall::Load);
        if matches!(self.fail_at, FailAt::LoadHangs) {
            // Outlives any test timeout; the pipeline must cut it off.
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
        Ok(())
    }

    async fn emulate_screen_media(&mut self) -> Result<(), RenderError> {
        self.record(SessionCall::EmulateMedia);
        Ok(())
    }

    async fn export_pdf(&mut self, _layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        self.record(SessionCall::Export);
        if matches!(self.fail_at, FailAt::Export) {
            return Err(RenderError::Failed("fake export failure".into()));
        }
        Ok(self.pdf.clone())
    }

    async fn shutdown(&mut self) {
        self.record(SessionCall::Shutdown);
    }
}
