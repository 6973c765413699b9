use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::clients::{build_http_client, check_status, ClientError};
use crate::ingest::mapping::ParsedResume;
use crate::models::analysis::AnalysisResult;

/// Seam for the analysis collaborator: parsed fields in, scoring report out.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        resume_id: &str,
        parsed: &ParsedResume,
        notes: Option<&str>,
    ) -> Result<AnalysisResult, ClientError>;
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    resume_id: &'a str,
    parsed: &'a ParsedResume,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

pub struct HttpAnalysisService {
    client: Client,
    base_url: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_http_client(),
            base_url,
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(
        &self,
        resume_id: &str,
        parsed: &ParsedResume,
        notes: Option<&str>,
    ) -> Result<AnalysisResult, ClientError> {
        let url = format!("{}/analyze", self.base_url);
        debug!("requesting analysis for resume {resume_id}");

        let body = AnalyzeRequest {
            resume_id,
            parsed,
            notes,
        };
        let response = self.client.post(&url).json(&body).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}
