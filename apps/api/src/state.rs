use std::sync::Arc;

use crate::config::Config;
use crate::extraction::Extractors;
use crate::optimizer::scoring::{AtsScorer, KeywordAtsScorer};
use crate::render::Writers;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request works on its own data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text extractors per upload kind. Tests swap in fakes.
    pub extractors: Extractors,
    pub writers: Writers,
    /// Pluggable ATS scorer. Default: KeywordAtsScorer.
    pub scorer: Arc<dyn AtsScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            extractors: Extractors::new(config.pdf_all_pages),
            writers: Writers::default(),
            scorer: Arc::new(KeywordAtsScorer),
            config,
        }
    }
}
