//! Transcription options and response types.

use serde::{Deserialize, Serialize};

/// Options for a single transcription call.
///
/// Built per call and discarded afterwards. Fields left as `None` fall back
/// to the client defaults (`model` → `"whisper-1"`) or are omitted from the
/// request entirely (`language`, `prompt`, `temperature`). `filename` must be
/// set before a request is sent; [`WhisperClient::transcribe_file`] derives
/// it from the path when unset.
///
/// [`WhisperClient::transcribe_file`]: crate::WhisperClient::transcribe_file
#[derive(Debug, Clone, Default)]
pub struct TranscribeOptions {
    pub model: Option<String>,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub temperature: Option<f32>,
    pub filename: Option<String>,
}

/// Transcription result decoded from a `verbose_json` response.
///
/// Fields missing from the provider payload decode to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transcription {
    pub task: String,
    pub language: String,
    pub duration: f64,
    pub segments: Vec<TranscriptionSegment>,
    pub text: String,
}

/// One time-bounded chunk of transcribed text with its diagnostic metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSegment {
    pub id: i64,
    pub seek: i64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub tokens: Vec<i64>,
    pub temperature: f64,
    pub avg_logprob: f64,
    pub compression_ratio: f64,
    pub no_speech_prob: f64,
    pub transient: bool,
}
