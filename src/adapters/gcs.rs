use crate::core::ObjectStore;
use crate::utils::error::{ReportError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::path::Path;
use url::Url;

pub const DEFAULT_GCS_ENDPOINT: &str = "https://storage.googleapis.com";

/// Google Cloud Storage through the JSON API.
#[derive(Debug, Clone)]
pub struct GcsObjectStore {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
    project_id: Option<String>,
}

impl GcsObjectStore {
    pub fn new(
        endpoint: &str,
        access_token: Option<String>,
        project_id: Option<String>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| ReportError::InvalidConfigValueError {
            field: "gcs_endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        if endpoint.cannot_be_a_base() {
            return Err(ReportError::InvalidConfigValueError {
                field: "gcs_endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client: Client::new(),
            endpoint,
            access_token,
            project_id,
        })
    }

    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET` target for an object; the key is encoded as a single path segment.
    pub fn object_url(&self, bucket: &str, key: &str) -> Url {
        let mut url = self.url_with_segments(&["storage", "v1", "b", bucket, "o", key]);
        url.query_pairs_mut().append_pair("alt", "media");
        url
    }

    pub fn upload_url(&self, bucket: &str, key: &str) -> Url {
        let mut url = self.url_with_segments(&["upload", "storage", "v1", "b", bucket, "o"]);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        match &self.project_id {
            Some(project) => request.header("x-goog-user-project", project),
            None => request,
        }
    }
}

impl ObjectStore for GcsObjectStore {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        let url = self.object_url(bucket, key);
        tracing::debug!("GET {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ReportError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::StoreError {
                message: format!(
                    "download of gs://{}/{} failed with status {}: {}",
                    bucket, key, status, body
                ),
            });
        }

        let data = response.bytes().await?;
        tokio::fs::write(destination, &data).await?;
        tracing::debug!("Downloaded {} bytes from gs://{}/{}", data.len(), bucket, key);
        Ok(())
    }

    async fn upload(&self, bucket: &str, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        let url = self.upload_url(bucket, key);
        tracing::debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data.to_vec())
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::StoreError {
                message: format!(
                    "upload to gs://{}/{} failed with status {}: {}",
                    bucket, key, status, body
                ),
            });
        }

        tracing::debug!("Uploaded {} bytes to gs://{}/{}", data.len(), bucket, key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_encodes_key_as_one_segment() {
        let store = GcsObjectStore::new(DEFAULT_GCS_ENDPOINT, None, None).unwrap();
        let url = store.object_url("retail-processed", "processed/forecast.csv");

        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/storage/v1/b/retail-processed/o/processed%2Fforecast.csv?alt=media"
        );
    }

    #[test]
    fn test_upload_url_keeps_endpoint_prefix() {
        let store = GcsObjectStore::new("http://localhost:4443/gcs/", None, None).unwrap();
        let url = store.upload_url("retail-processed", "reports/summary.json");

        assert_eq!(
            url.as_str(),
            "http://localhost:4443/gcs/upload/storage/v1/b/retail-processed/o?uploadType=media&name=reports%2Fsummary.json"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(GcsObjectStore::new("not a url", None, None).is_err());
        assert!(GcsObjectStore::new("mailto:ops@example.com", None, None).is_err());
    }
}
