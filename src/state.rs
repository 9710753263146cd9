use std::sync::Arc;

use crate::database::Store;

/// Shared handler state. Holds only the store handle; no entity data is
/// cached in process memory.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
