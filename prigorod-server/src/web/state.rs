//! Application state for the web layer.

use std::sync::Arc;

use crate::tutu::TutuClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream tutu.ru client
    pub tutu: Arc<TutuClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tutu: TutuClient) -> Self {
        Self {
            tutu: Arc::new(tutu),
        }
    }
}
