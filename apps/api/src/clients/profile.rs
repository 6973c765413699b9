use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::clients::{build_http_client, check_status, ClientError};
use crate::models::profile::ExtendedProfile;

/// Read seam for the extended profile collaborator. The prefill merger
/// treats failures here as best-effort and never surfaces them.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self, profile_id: &str) -> Result<ExtendedProfile, ClientError>;
}

pub struct HttpProfileSource {
    client: Client,
    base_url: String,
}

impl HttpProfileSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_http_client(),
            base_url,
        }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, profile_id: &str) -> Result<ExtendedProfile, ClientError> {
        let url = format!("{}/profiles/{profile_id}", self.base_url);
        debug!("fetching extended profile from {url}");
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}
