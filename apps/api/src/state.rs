use std::sync::Arc;

use crate::fixtures::DataProvider;
use crate::store::WorkerStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Worker reads and completions. Fixture-backed or PostgreSQL, chosen by `DATA_MODE`.
    pub store: Arc<dyn WorkerStore>,
    /// Company metadata, analytics and the learner document. Always fixture-backed.
    pub fixtures: Arc<dyn DataProvider>,
}
