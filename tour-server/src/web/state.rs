//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::preferences::PreferenceStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// City and stop reference data
    pub catalog: Arc<Catalog>,

    /// Per-user preference storage
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, preferences: impl PreferenceStore + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
            preferences: Arc::new(preferences),
        }
    }

    /// Create app state around an already shared store.
    pub fn with_store(catalog: Catalog, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            preferences,
        }
    }
}
