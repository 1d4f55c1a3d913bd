use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Base URL of the hosted backend. Every endpoint path is appended to this.
pub const DEFAULT_API_URL: &str = "https://api-live.teknokreasi.site/api/live";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. The body is plain text meant for the user and is
    /// surfaced verbatim, so Display is the body alone.
    #[error("{body}")]
    Server { status: u16, body: String },
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Body of `GET /videos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub data: Vec<String>,
}

/// Body of `POST /stream-youtube`. Built right before submission and never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest {
    pub object_name: String,
    pub stream_key: String,
}

/// The three calls the backend exposes. `ApiClient` is the real
/// implementation; tests substitute mocks or recording fakes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveApi: Send + Sync {
    /// `GET /videos`: names of the videos stored on the backend.
    async fn list_videos(&self) -> Result<Vec<String>, ApiError>;

    /// `POST /video` in chunked mode: one slice of the file plus its
    /// position within the job.
    async fn upload_chunk(
        &self,
        data: Vec<u8>,
        index: u64,
        total: u64,
        filename: &str,
    ) -> Result<(), ApiError>;

    /// `POST /video` in whole-file mode: the entire file as a single
    /// multipart request, streamed from disk.
    async fn upload_whole(&self, path: &Path, filename: &str) -> Result<(), ApiError>;

    /// `POST /stream-youtube`: start restreaming a stored video.
    async fn start_stream(&self, request: &StreamRequest) -> Result<(), ApiError>;
}

pub struct ApiClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> reqwest::Result<ApiClient> {
        let client = reqwest::Client::builder().build()?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn server_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Server { status, body }
}

#[async_trait]
impl LiveApi for ApiClient {
    async fn list_videos(&self) -> Result<Vec<String>, ApiError> {
        let response = self.client.get(self.endpoint("/videos")).send().await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body = response.text().await?;
        let parsed: VideosResponse = serde_json::from_str(&body)?;
        Ok(parsed.data)
    }

    async fn upload_chunk(
        &self,
        data: Vec<u8>,
        index: u64,
        total: u64,
        filename: &str,
    ) -> Result<(), ApiError> {
        debug!(
            "POST /video chunk {} of {} ({} bytes)",
            index + 1,
            total,
            data.len()
        );

        let part = multipart::Part::bytes(data).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("video", part)
            .text("chunkIndex", index.to_string())
            .text("totalChunks", total.to_string())
            .text("filename", filename.to_string());

        let response = self
            .client
            .post(self.endpoint("/video"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        Ok(())
    }

    async fn upload_whole(&self, path: &Path, filename: &str) -> Result<(), ApiError> {
        let file = File::open(path).await?;
        let length = file.metadata().await?.len();
        debug!("POST /video whole file {} ({} bytes)", filename, length);

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let part = multipart::Part::stream_with_length(body, length).file_name(filename.to_string());
        let form = multipart::Form::new().part("video", part);

        let response = self
            .client
            .post(self.endpoint("/video"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        Ok(())
    }

    async fn start_stream(&self, request: &StreamRequest) -> Result<(), ApiError> {
        debug!("POST /stream-youtube for {}", request.object_name);

        let response = self
            .client
            .post(self.endpoint("/stream-youtube"))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_request_serializes_camel_case() {
        let request = StreamRequest {
            object_name: "a.mp4".to_string(),
            stream_key: "key123".to_string(),
        };

        let value = serde_json::to_value(&request).expect("Could not serialize request");
        assert_eq!(
            value,
            serde_json::json!({"objectName": "a.mp4", "streamKey": "key123"})
        );
    }

    #[test]
    fn videos_response_parses_data() {
        let parsed: VideosResponse =
            serde_json::from_str(r#"{"data":["a.mp4","b.mp4"]}"#).expect("Could not parse");
        assert_eq!(parsed.data, vec!["a.mp4", "b.mp4"]);
    }

    #[test]
    fn videos_response_tolerates_missing_data() {
        let parsed: VideosResponse = serde_json::from_str("{}").expect("Could not parse");
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn server_error_displays_body_verbatim() {
        let err = ApiError::Server {
            status: 500,
            body: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let api = ApiClient::new("http://127.0.0.1:9999/api/live/").expect("Could not build client");
        assert_eq!(api.endpoint("/videos"), "http://127.0.0.1:9999/api/live/videos");
    }
}
