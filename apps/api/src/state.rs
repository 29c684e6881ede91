use std::sync::Arc;

use crate::theme::analyzer::PaletteAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable palette analyzer. `None` runs the pipeline fully local.
    pub analyzer: Option<Arc<dyn PaletteAnalyzer>>,
}
