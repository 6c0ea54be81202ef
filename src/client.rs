//! Whisper transcription client.

use std::env;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::encoding::ContentCoding;
use crate::types::{TranscribeOptions, Transcription};
use crate::{Error, ErrorContext, Result};

/// Default API host, overridable per client or via `OPENAI_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when [`TranscribeOptions::model`] is unset.
pub const DEFAULT_MODEL: &str = "whisper-1";

const TRANSCRIPTIONS_PATH: &str = "audio/transcriptions";

/// Client for OpenAI-compatible Whisper transcription endpoints.
///
/// All fields are set once by [`WhisperClientBuilder`] and never mutated, so
/// one client may serve any number of concurrent calls.
pub struct WhisperClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WhisperClient {
    pub fn builder() -> WhisperClientBuilder {
        WhisperClientBuilder::new()
    }

    /// Transcribe the audio file at `path`.
    ///
    /// Reads the file into memory and derives the upload filename from the
    /// path's final component unless `options.filename` is already set.
    pub async fn transcribe_file(
        &self,
        path: impl AsRef<Path>,
        mut options: TranscribeOptions,
    ) -> Result<Transcription> {
        let path = path.as_ref();
        let audio = tokio::fs::read(path).await?;
        if options.filename.is_none() {
            options.filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from);
        }
        self.transcribe(&audio, &options).await
    }

    /// Transcribe raw audio bytes.
    ///
    /// Builds a multipart form (`model`, `response_format=verbose_json`, the
    /// `file` part, and any optional fields that are set), posts it with
    /// bearer authentication, decompresses the response per its
    /// `Content-Encoding`, and decodes the JSON body.
    pub async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<Transcription> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::authentication("API key is not set (pass one to the builder or set OPENAI_API_KEY)")
        })?;

        let model = options.model.as_deref().unwrap_or(DEFAULT_MODEL);

        let filename = match options.filename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(Error::validation_with_context(
                    "filename is not set",
                    ErrorContext::new()
                        .with_field_path("filename")
                        .with_source("transcribe"),
                ))
            }
        };

        let part = reqwest::multipart::Part::bytes(audio.to_vec()).file_name(filename.to_string());
        let mut form = reqwest::multipart::Form::new()
            .text("model", model.to_string())
            .text("response_format", "verbose_json")
            .part("file", part);
        if let Some(lang) = &options.language {
            form = form.text("language", lang.clone());
        }
        if let Some(prompt) = &options.prompt {
            form = form.text("prompt", prompt.clone());
        }
        if let Some(temp) = options.temperature {
            form = form.text("temperature", temp.to_string());
        }

        let endpoint = self.endpoint_url(TRANSCRIPTIONS_PATH);
        debug!(endpoint = %endpoint, model, audio_len = audio.len(), "sending transcription request");

        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(api_key)
            .header("accept-encoding", "gzip, deflate")
            .header("accept", "*/*")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("transcription request failed: {}", e),
                    ErrorContext::new().with_source("transcribe"),
                )
            })?;

        let status = response.status();
        let coding = ContentCoding::from_header(
            response
                .headers()
                .get("content-encoding")
                .and_then(|v| v.to_str().ok()),
        );
        let raw = response.bytes().await.map_err(|e| {
            Error::network_with_context(
                format!("failed to read response body: {}", e),
                ErrorContext::new().with_source("transcribe"),
            )
        })?;
        let body = coding.decode(&raw)?;

        if status != reqwest::StatusCode::OK {
            warn!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "transcription request rejected"
            );
            return Err(Error::remote(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let transcription: Transcription = serde_json::from_slice(&body)?;
        debug!(
            text_len = transcription.text.len(),
            segments = transcription.segments.len(),
            "transcription complete"
        );
        Ok(transcription)
    }

    /// Resolve `path` against the configured base URL.
    ///
    /// A path that already carries a scheme separator is returned unchanged;
    /// otherwise base and path are joined with exactly one slash.
    pub fn endpoint_url(&self, path: &str) -> String {
        if path.contains("://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Builder for [`WhisperClient`].
///
/// Fields left unset fall back to the environment (`OPENAI_API_KEY`,
/// `OPENAI_BASE_URL`), read once inside [`build`](Self::build). A missing API
/// key is not a build error; [`WhisperClient::transcribe`] reports it before
/// any network call is made.
pub struct WhisperClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout_secs: u64,
}

impl WhisperClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            http_client: None,
            timeout_secs: 60,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Inject a preconfigured HTTP client; `timeout_secs` is ignored then.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<WhisperClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()));
        let base_url = self
            .base_url
            .filter(|u| !u.is_empty())
            .or_else(|| env::var("OPENAI_BASE_URL").ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(Duration::from_secs(self.timeout_secs))
                .build()
                .map_err(|e| Error::configuration(format!("failed to create HTTP client: {}", e)))?,
        };
        Ok(WhisperClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl Default for WhisperClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
