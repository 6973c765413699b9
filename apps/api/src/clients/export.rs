use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::clients::{build_http_client, check_status, ClientError};

/// Output format accepted by the export collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Client for the export collaborator. Used directly (no trait seam) — the
/// export endpoint is a pass-through proxy with no logic worth faking.
#[derive(Clone)]
pub struct ExportClient {
    client: Client,
    base_url: String,
}

impl ExportClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_http_client(),
            base_url,
        }
    }

    /// Streams the rendered document in the requested format.
    pub async fn export(&self, resume_id: Uuid, format: ExportFormat) -> Result<Bytes, ClientError> {
        let url = format!(
            "{}/export/{resume_id}?format={}",
            self.base_url,
            format.as_str()
        );
        debug!("exporting resume {resume_id} as {}", format.as_str());
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?)
    }
}
