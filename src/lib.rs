//! # whisper-asr
//!
//! Minimal async client for OpenAI-compatible Whisper transcription
//! endpoints.
//!
//! ## Overview
//!
//! The whole library is one request/response cycle: build a multipart
//! file-upload request, POST it with bearer-token authentication, decompress
//! the response body per its `Content-Encoding`, and decode the
//! `verbose_json` result into structured data. There is no retry logic, no
//! streaming, and no multi-provider abstraction.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whisper_asr::{TranscribeOptions, WhisperClient};
//!
//! #[tokio::main]
//! async fn main() -> whisper_asr::Result<()> {
//!     // API key falls back to OPENAI_API_KEY, base URL to OPENAI_BASE_URL.
//!     let client = WhisperClient::builder().build()?;
//!
//!     let transcription = client
//!         .transcribe_file("meeting.m4a", TranscribeOptions::default())
//!         .await?;
//!     println!("{}", transcription.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The [`WhisperClient`] and its builder |
//! | [`types`] | Request options and decoded response types |
//! | [`encoding`] | Response body decompression (identity / gzip / deflate) |
//! | [`error`] | Unified error type |

pub mod client;
pub mod encoding;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{WhisperClient, WhisperClientBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{Error, ErrorContext};
pub use types::{TranscribeOptions, Transcription, TranscriptionSegment};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
