use std::sync::Arc;

use sqlx::PgPool;

use crate::clients::analysis::AnalysisService;
use crate::clients::export::ExportClient;
use crate::clients::parsing::ParsingService;
use crate::clients::profile::ProfileSource;
use crate::wizard::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Extended-profile collaborator. Best-effort: the prefill merger
    /// swallows failures from this seam.
    pub profile: Arc<dyn ProfileSource>,
    /// Parsing collaborator (upload + parsed-field retrieval).
    pub parser: Arc<dyn ParsingService>,
    /// Analysis collaborator (scoring).
    pub analyzer: Arc<dyn AnalysisService>,
    pub export: ExportClient,
    /// In-memory wizard sessions. Sessions die with the process; only
    /// explicitly saved documents persist.
    pub sessions: SessionStore,
}
