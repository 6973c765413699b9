//! Persistence collaborator: explicit save of a rendered document.
//!
//! Schema (`saved_resumes`):
//!   id UUID PRIMARY KEY, title TEXT, summary_snippet TEXT, html TEXT,
//!   created_at TIMESTAMPTZ DEFAULT now()

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::cv::{is_blank, CvDocument};
use crate::synthesis::{clip_summary, SUMMARY_LIMIT_SHORT};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SavedResumeRow {
    pub id: Uuid,
    pub title: String,
    pub summary_snippet: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata stored alongside the rendered document. Derived from the
/// source document, not supplied by the client.
pub fn resume_metadata(doc: &CvDocument) -> (String, String) {
    let title = if is_blank(&doc.personal.full_name) {
        "Untitled CV".to_string()
    } else {
        doc.personal.full_name.trim().to_string()
    };
    let snippet = clip_summary(&doc.personal.summary, SUMMARY_LIMIT_SHORT);
    (title, snippet)
}

/// Inserts the rendered document and returns the new resume id.
pub async fn save_resume(
    pool: &PgPool,
    title: &str,
    summary_snippet: &str,
    html: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO saved_resumes (id, title, summary_snippet, html) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(title)
    .bind(summary_snippet)
    .bind(html)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Fetches one saved document, if present.
pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<SavedResumeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM saved_resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
