//! Application state for the web server.

use std::sync::Arc;

use curricula::Dashboard;

/// Shared application state.
///
/// The dashboard is never mutated after loading and every request carries
/// its own filter state, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}
