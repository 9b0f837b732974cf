// Application state module
// Shared, read-only state handed to every connection task

use std::sync::Arc;

use super::types::Config;
use crate::handler::MessageRouter;

/// Application state
pub struct AppState {
    pub config: Config,
    pub router: Arc<MessageRouter>,
}

impl AppState {
    pub fn new(config: &Config, router: MessageRouter) -> Self {
        Self {
            config: config.clone(),
            router: Arc::new(router),
        }
    }
}
