//! ExtractorRegistry - process name -> context extractor
//!
//! Resolves the application kind of a window and routes capture/restore to
//! the matching extractor. Unknown processes get the generic extractor.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    ContextExtractor, ExplorerExtractor, ExtractorEnv, GenericExtractor, TerminalExtractor,
    VsCodeExtractor,
};
use crate::domain::entities::AppContext;
use crate::domain::value_objects::{AppType, Rect, WindowHandle};

pub struct ExtractorRegistry {
    extractors: HashMap<AppType, Box<dyn ContextExtractor>>,
    by_process: HashMap<String, AppType>,
    generic: GenericExtractor,
}

impl ExtractorRegistry {
    /// Registry with the built-in extractors
    pub fn new(env: Arc<ExtractorEnv>) -> Self {
        let mut registry = Self {
            extractors: HashMap::new(),
            by_process: HashMap::new(),
            generic: GenericExtractor::new(env.clone()),
        };
        registry.register(Box::new(ExplorerExtractor::new(env.clone())));
        registry.register(Box::new(TerminalExtractor::new(env.clone())));
        registry.register(Box::new(VsCodeExtractor::new(env)));
        registry
    }

    /// Add or replace the extractor for its app type
    pub fn register(&mut self, extractor: Box<dyn ContextExtractor>) {
        let app_type = extractor.app_type();
        self.by_process.retain(|_, t| *t != app_type);
        for name in extractor.process_names() {
            self.by_process.insert(name.to_lowercase(), app_type);
        }
        self.extractors.insert(app_type, extractor);
    }

    /// App type owning `process_name` (case-insensitive), generic if none
    pub fn detect_app_type(&self, process_name: &str) -> AppType {
        self.by_process
            .get(&process_name.trim().to_lowercase())
            .copied()
            .unwrap_or(AppType::Generic)
    }

    /// Extractor for `app_type`
    pub fn get(&self, app_type: AppType) -> &dyn ContextExtractor {
        match self.extractors.get(&app_type) {
            Some(extractor) => extractor.as_ref(),
            None => &self.generic,
        }
    }

    /// Capture the context of a live window, tagged with its detected type
    pub fn extract_context(
        &self,
        handle: WindowHandle,
        title: &str,
        process_name: &str,
    ) -> AppContext {
        let app_type = self.detect_app_type(process_name);
        let mut ctx = self.get(app_type).extract_context(handle, title);
        ctx.app_type = app_type;
        log_fn!("extract_context", "{} '{}' -> {:?}", handle, title, ctx);
        ctx
    }

    pub fn can_restore(&self, app_type: AppType, context: &AppContext) -> bool {
        self.get(app_type).can_restore(context)
    }

    /// Relaunch a window for `context`; None when it cannot be restored
    pub fn restore_window(
        &self,
        app_type: AppType,
        context: &AppContext,
        target_rect: Option<Rect>,
    ) -> Option<WindowHandle> {
        let extractor = self.get(app_type);
        if !extractor.can_restore(context) {
            log!("Not enough context to restore {} window", app_type);
            return None;
        }
        extractor.restore_window(context, target_rect)
    }

    /// App types with a dedicated extractor
    pub fn supported_app_types(&self) -> Vec<AppType> {
        let mut types: Vec<AppType> = self.extractors.keys().copied().collect();
        types.sort_by_key(|t| t.as_str());
        types
    }

    /// All process names with a dedicated extractor, sorted
    pub fn supported_processes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_process.keys().cloned().collect();
        names.sort();
        names
    }
}
