use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::clients::export::ExportFormat;
use crate::errors::AppError;
use crate::persistence::get_resume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: ExportFormat,
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let row = get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(row).into_response())
}

/// GET /api/v1/resumes/:id/export?format=pdf|docx
///
/// Proxies the export collaborator's binary stream. The resume must exist
/// locally first — exporting an unknown id is a 404 here, not an upstream
/// round trip.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let bytes = state
        .export
        .export(id, query.format)
        .await
        .map_err(|e| AppError::Upstream {
            stage: "export".to_string(),
            message: e.to_string(),
        })?;

    Ok((
        [(header::CONTENT_TYPE, query.format.content_type())],
        bytes,
    )
        .into_response())
}
