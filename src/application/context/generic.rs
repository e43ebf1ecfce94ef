//! Generic extractor - windows without a dedicated handler
//!
//! Keeps no context and cannot relaunch anything; the window can only be
//! recovered by rebinding.

use std::sync::Arc;

use super::{ContextExtractor, ExtractorEnv, LaunchPlan};
use crate::domain::entities::{AppContext, WindowSnapshot};
use crate::domain::value_objects::{AppType, WindowHandle};

pub struct GenericExtractor {
    env: Arc<ExtractorEnv>,
}

impl GenericExtractor {
    pub fn new(env: Arc<ExtractorEnv>) -> Self {
        Self { env }
    }
}

impl ContextExtractor for GenericExtractor {
    fn app_type(&self) -> AppType {
        AppType::Generic
    }

    fn process_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn env(&self) -> &ExtractorEnv {
        &self.env
    }

    fn extract_context(&self, _handle: WindowHandle, _title: &str) -> AppContext {
        AppContext::empty(AppType::Generic)
    }

    fn can_restore(&self, _context: &AppContext) -> bool {
        false
    }

    fn launch_plan(&self, _context: &AppContext) -> Option<LaunchPlan> {
        None
    }

    fn match_score(&self, _window: &WindowSnapshot, _context: &AppContext) -> f64 {
        0.0
    }
}
