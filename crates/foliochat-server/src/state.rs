use std::sync::Arc;

use foliochat_provider::LlmProvider;

/// Shared application state accessible from all route handlers. Read-only
/// after startup; the server itself keeps no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn LlmProvider>,
    pub model: String,
    pub system_prompt: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            system_prompt: crate::config::SYSTEM_PROMPT.to_string(),
        }
    }
}
