use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::mapping::ParsedResume;
use crate::ingest::pipeline::run_pipeline;
use crate::models::analysis::AnalysisResult;
use crate::models::cv::CvDocument;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub resume_id: String,
    pub parsed: ParsedResume,
    pub analysis: AnalysisResult,
    pub document: CvDocument,
    pub applied_to_session: bool,
}

/// POST /api/v1/analyze
///
/// Multipart fields: `file` (required), `notes` (optional free text passed
/// to the analyzer), `session_id` (optional — on success the mapped
/// document replaces that session's document).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut file: Option<(Bytes, String)> = None;
    let mut notes: Option<String> = None;
    let mut session_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file field: {e}")))?;
                file = Some((data, filename));
            }
            "notes" => {
                notes = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read notes field: {e}"))
                })?);
            }
            "session_id" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read session_id field: {e}"))
                })?;
                let id = Uuid::parse_str(text.trim())
                    .map_err(|_| AppError::Validation("session_id must be a UUID".to_string()))?;
                session_id = Some(id);
            }
            _ => {}
        }
    }

    let (data, filename) =
        file.ok_or_else(|| AppError::Validation("A resume file is required".to_string()))?;

    let outcome = run_pipeline(
        state.parser.as_ref(),
        state.analyzer.as_ref(),
        data,
        &filename,
        notes.as_deref(),
    )
    .await?;

    let mut applied = false;
    if let Some(id) = session_id {
        let mut sessions = state.sessions.write().await;
        if let Some(session) = sessions.get_mut(&id) {
            // Replace the section content but keep the session's strategy
            // and target fields — those drive the step machine and belong
            // to the wizard, not the uploaded file.
            let mut mapped = outcome.mapped.clone();
            mapped.strategy = session.doc.strategy;
            mapped.target_role = session.doc.target_role.clone();
            mapped.job_description = session.doc.job_description.clone();
            session.doc = mapped;
            // Mapped ids restart at 1; lift the watermarks over them so
            // later edits never collide with the imported entries.
            session.watermarks.absorb(&session.doc);
            applied = true;
            info!("applied parsed document to session {id}");
        }
    }

    Ok(Json(AnalyzeResponse {
        resume_id: outcome.resume_id,
        parsed: outcome.parsed,
        analysis: outcome.analysis,
        document: outcome.mapped,
        applied_to_session: applied,
    }))
}
