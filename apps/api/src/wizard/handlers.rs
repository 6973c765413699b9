use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{CvDocument, Strategy};
use crate::models::profile::Identity;
use crate::persistence::{resume_metadata, save_resume};
use crate::prefill;
use crate::state::AppState;
use crate::synthesis::synthesize;
use crate::wizard::controller::{
    advance, apply_patch, can_advance, on_strategy_change, retreat, AdvanceOutcome, DocumentPatch,
};
use crate::wizard::session::{PrefillState, WizardSession};
use crate::wizard::steps::StepKey;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Identity supplied by the authenticated session at wizard start.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    /// Extended-profile id for the one-shot prefill, if the user has one.
    pub profile_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub strategy: Strategy,
    pub active_step_index: usize,
    pub visible_steps: Vec<StepKey>,
    pub current_step: StepKey,
    pub can_advance: bool,
    pub prefill: PrefillState,
    pub document: CvDocument,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SessionView {
    fn from_session(session: &WizardSession) -> Self {
        SessionView {
            id: session.id,
            strategy: session.strategy(),
            active_step_index: session.active_step_index,
            visible_steps: session.visible_steps.clone(),
            current_step: session.current_step(),
            can_advance: can_advance(session),
            prefill: session.prefill,
            document: session.doc.clone(),
            created_at: session.created_at,
        }
    }
}

/// Runs `f` against the locked session, mapping a missing id to 404.
async fn with_session<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut WizardSession) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    f(session)
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> (StatusCode, Json<SessionView>) {
    let identity = Identity {
        full_name: req.full_name,
        email: req.email,
    };
    let session = WizardSession::new(Uuid::new_v4(), identity, req.profile_id);
    let view = SessionView::from_session(&session);
    state.sessions.write().await.insert(session.id, session);
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    with_session(&state, id, |s| Ok(Json(SessionView::from_session(s)))).await
}

#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub outcome: AdvanceOutcome,
    pub session: SessionView,
}

/// POST /api/v1/sessions/:id/advance
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdvanceResponse>, AppError> {
    with_session(&state, id, |s| {
        let outcome = advance(s)?;
        Ok(Json(AdvanceResponse {
            outcome,
            session: SessionView::from_session(s),
        }))
    })
    .await
}

/// POST /api/v1/sessions/:id/retreat
pub async fn handle_retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    with_session(&state, id, |s| {
        retreat(s);
        Ok(Json(SessionView::from_session(s)))
    })
    .await
}

#[derive(Debug, Deserialize)]
pub struct StrategyChange {
    pub strategy: Strategy,
}

/// PUT /api/v1/sessions/:id/strategy
pub async fn handle_set_strategy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StrategyChange>,
) -> Result<Json<SessionView>, AppError> {
    with_session(&state, id, |s| {
        on_strategy_change(s, req.strategy);
        Ok(Json(SessionView::from_session(s)))
    })
    .await
}

/// PATCH /api/v1/sessions/:id/document
pub async fn handle_patch_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DocumentPatch>,
) -> Result<Json<SessionView>, AppError> {
    with_session(&state, id, |s| {
        apply_patch(s, patch);
        Ok(Json(SessionView::from_session(s)))
    })
    .await
}

/// POST /api/v1/sessions/:id/prefill
pub async fn handle_prefill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    prefill::run(&state, id).await?;
    with_session(&state, id, |s| Ok(Json(SessionView::from_session(s)))).await
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    with_session(&state, id, |s| Ok(Html(synthesize(&s.doc)))).await
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub resume_id: Uuid,
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveResponse>, AppError> {
    let (html, title, snippet) =
        with_session(&state, id, |s| {
            let html = synthesize(&s.doc);
            let (title, snippet) = resume_metadata(&s.doc);
            Ok((html, title, snippet))
        })
        .await?;

    let resume_id = save_resume(&state.db, &title, &snippet, &html).await?;
    Ok(Json(SaveResponse { resume_id }))
}
