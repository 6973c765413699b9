//! Upload → parse → analyze orchestration.
//!
//! The three stages are strictly sequential: stage N+1 never starts before
//! stage N resolves successfully. Any failure aborts the pipeline with a
//! stage-tagged error and commits nothing — the mapped document is produced
//! only after all three stages succeed, so a failed run leaves the caller's
//! `CvDocument` exactly as it was.

use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::clients::analysis::AnalysisService;
use crate::clients::parsing::ParsingService;
use crate::clients::ClientError;
use crate::ingest::mapping::{map_parsed_resume, ParsedResume};
use crate::models::analysis::AnalysisResult;
use crate::models::cv::CvDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Upload,
    Parse,
    Analyze,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Upload => "upload",
            PipelineStage::Parse => "parse",
            PipelineStage::Analyze => "analyze",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: ClientError,
}

/// Everything a successful run produces. `mapped` is a fresh document built
/// from the parsed fields; applying it to a session is the caller's call.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub resume_id: String,
    pub parsed: ParsedResume,
    pub analysis: AnalysisResult,
    pub mapped: CvDocument,
}

pub async fn run_pipeline(
    parser: &dyn ParsingService,
    analyzer: &dyn AnalysisService,
    file: Bytes,
    filename: &str,
    notes: Option<&str>,
) -> Result<PipelineOutcome, PipelineError> {
    let resume_id = parser.upload(file, filename).await.map_err(|source| {
        PipelineError {
            stage: PipelineStage::Upload,
            source,
        }
    })?;
    info!("upload stage complete, resume_id={resume_id}");

    let parsed = parser.parsed(&resume_id).await.map_err(|source| PipelineError {
        stage: PipelineStage::Parse,
        source,
    })?;
    info!(
        "parse stage complete: {} experience entries, {} skills",
        parsed.work_experience.len(),
        parsed.skills.len()
    );

    let analysis = analyzer
        .analyze(&resume_id, &parsed, notes)
        .await
        .map_err(|source| PipelineError {
            stage: PipelineStage::Analyze,
            source,
        })?;
    info!("analyze stage complete, score={}", analysis.score);

    // Mapping is deliberately last: nothing is committed on a failed run.
    let mapped = map_parsed_resume(&parsed);

    Ok(PipelineOutcome {
        resume_id,
        parsed,
        analysis,
        mapped,
    })
}
