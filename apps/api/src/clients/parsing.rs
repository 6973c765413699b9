use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::clients::{build_http_client, check_status, ClientError};
use crate::ingest::mapping::ParsedResume;

/// Seam for the résumé parsing collaborator: file upload returning an
/// opaque resume id, then structured field retrieval for that id.
#[async_trait]
pub trait ParsingService: Send + Sync {
    async fn upload(&self, file: Bytes, filename: &str) -> Result<String, ClientError>;
    async fn parsed(&self, resume_id: &str) -> Result<ParsedResume, ClientError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    resume_id: String,
}

pub struct HttpParsingService {
    client: Client,
    base_url: String,
}

impl HttpParsingService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_http_client(),
            base_url,
        }
    }
}

#[async_trait]
impl ParsingService for HttpParsingService {
    async fn upload(&self, file: Bytes, filename: &str) -> Result<String, ClientError> {
        let url = format!("{}/upload", self.base_url);
        debug!("uploading {filename} ({} bytes) to {url}", file.len());

        let part = Part::bytes(file.to_vec()).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = check_status(response).await?;
        let body: UploadResponse = response.json().await?;
        Ok(body.resume_id)
    }

    async fn parsed(&self, resume_id: &str) -> Result<ParsedResume, ClientError> {
        let url = format!("{}/parsed/{resume_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}
