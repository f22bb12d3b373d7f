//! Cloudflare Pages API client.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use outpages_site::Page;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::info;
use ureq::Agent;

use crate::error::DeployError;

/// Cloudflare API root.
const API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Cloudflare Pages API client for one account and project.
pub struct CloudflareClient {
    agent: Agent,
    account_id: String,
    project: String,
    api_token: String,
}

/// One asset in a batched upload call.
#[derive(Serialize)]
struct AssetUpload<'a> {
    key: &'a str,
    value: String,
    base64: bool,
    metadata: AssetMetadata,
}

/// Upload metadata; the hosting layer serves assets with this content type.
#[derive(Serialize)]
struct AssetMetadata {
    #[serde(rename = "contentType")]
    content_type: &'static str,
}

/// Envelope of the upload-token endpoint.
#[derive(Deserialize)]
struct UploadTokenResponse {
    result: UploadTokenResult,
}

#[derive(Deserialize)]
struct UploadTokenResult {
    jwt: String,
}

impl CloudflareClient {
    /// Create a client for `project` under `account_id`.
    #[must_use]
    pub fn new(account_id: &str, project: &str, api_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            account_id: account_id.to_owned(),
            project: project.to_owned(),
            api_token: api_token.to_owned(),
        }
    }

    /// Public URL the deployed site is reachable at.
    #[must_use]
    pub fn site_url(&self) -> String {
        format!("https://{}.pages.dev", self.project)
    }

    fn project_url(&self) -> String {
        format!(
            "{API_URL}/accounts/{}/pages/projects/{}",
            self.account_id, self.project
        )
    }

    /// Fetch a short-lived upload token for the project.
    pub(crate) fn upload_token(&self) -> Result<String, DeployError> {
        let url = format!("{}/upload-token", self.project_url());

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(DeployError::UploadToken { status, body });
        }

        let token: UploadTokenResponse = body_reader.read_json()?;
        Ok(token.result.jwt)
    }

    /// Upload one batch of pages keyed by content hash.
    ///
    /// `hashes` runs parallel to `pages`. A non-success response aborts the
    /// deployment; nothing is retried.
    pub(crate) fn upload_assets(
        &self,
        upload_token: &str,
        pages: &[Page],
        hashes: &[String],
        batch: usize,
    ) -> Result<(), DeployError> {
        let payload: Vec<AssetUpload<'_>> = pages
            .iter()
            .zip(hashes)
            .map(|(page, hash)| AssetUpload {
                key: hash,
                value: BASE64.encode(&page.content),
                base64: true,
                metadata: AssetMetadata {
                    content_type: page.format.mime_type(),
                },
            })
            .collect();

        let response = self
            .agent
            .post(&format!("{API_URL}/pages/assets/upload"))
            .header("Authorization", &format!("Bearer {upload_token}"))
            .header("Accept", "application/json")
            .send_json(&payload)?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(DeployError::BatchUpload {
                batch,
                status,
                body,
            });
        }

        info!(batch, pages = pages.len(), "uploaded asset batch");
        Ok(())
    }

    /// Create a deployment from a path→hash manifest.
    ///
    /// The manifest is the sole field of a multipart form body, authed with
    /// the long-lived API token rather than the upload token.
    pub(crate) fn create_deployment(
        &self,
        manifest: &BTreeMap<String, String>,
    ) -> Result<(), DeployError> {
        let manifest_json = serde_json::to_string(manifest)?;

        let boundary = format!(
            "----OutpagesFormBoundary{:016x}",
            rand::rng().random::<u64>()
        );
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"manifest\"\r\n\r\n");
        body.extend_from_slice(manifest_json.as_bytes());
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let response = self
            .agent
            .post(&format!("{}/deployments", self.project_url()))
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send(&body[..])?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(DeployError::Deployment { status, body });
        }

        info!(paths = manifest.len(), "deployment created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn site_url_uses_pages_dev() {
        let client = CloudflareClient::new("acct", "my-site", "token");
        assert_eq!(client.site_url(), "https://my-site.pages.dev");
    }

    #[test]
    fn asset_upload_serializes_to_api_shape() {
        let upload = AssetUpload {
            key: "abc123",
            value: BASE64.encode(b"bytes"),
            base64: true,
            metadata: AssetMetadata {
                content_type: "text/css",
            },
        };
        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["key"], "abc123");
        assert_eq!(json["value"], "Ynl0ZXM=");
        assert_eq!(json["base64"], true);
        assert_eq!(json["metadata"]["contentType"], "text/css");
    }
}
