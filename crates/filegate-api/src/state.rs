use filegate_core::Config;
use filegate_storage::Storage;
use std::sync::Arc;

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }
}
