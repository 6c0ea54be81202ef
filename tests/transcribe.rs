//! Integration tests for the transcription request/response cycle against a
//! mock HTTP server.

use std::io::Write;

use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;
use mockito::Matcher;
use whisper_asr::{Error, TranscribeOptions, Transcription, WhisperClient};

const AUDIO: &[u8] = b"pretend this is audio";

fn verbose_json_body() -> String {
    serde_json::json!({
        "task": "transcribe",
        "language": "english",
        "duration": 3.84,
        "text": "The quick brown fox.",
        "segments": [{
            "id": 0,
            "seek": 0,
            "start": 0.0,
            "end": 3.84,
            "text": " The quick brown fox.",
            "tokens": [50364, 440, 1702, 4433, 283, 5230, 13],
            "temperature": 0.0,
            "avg_logprob": -0.19,
            "compression_ratio": 0.72,
            "no_speech_prob": 0.004,
            "transient": false
        }]
    })
    .to_string()
}

fn client_for(server: &mockito::ServerGuard) -> WhisperClient {
    WhisperClient::builder()
        .api_key("test-key")
        .base_url(server.url())
        .build()
        .expect("client should build")
}

fn options_with_filename() -> TranscribeOptions {
    TranscribeOptions {
        filename: Some("note.m4a".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_transcribe_decodes_plain_json_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(verbose_json_body())
        .create_async()
        .await;

    let client = client_for(&server);
    let transcription = client
        .transcribe(AUDIO, &options_with_filename())
        .await
        .expect("transcription should succeed");

    let expected: Transcription = serde_json::from_str(&verbose_json_body()).unwrap();
    assert_eq!(transcription, expected);
    assert_eq!(transcription.text, "The quick brown fox.");
    assert_eq!(transcription.segments.len(), 1);
    assert_eq!(transcription.segments[0].end, 3.84);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_sends_expected_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .match_header("authorization", "Bearer test-key")
        .match_header("accept-encoding", "gzip, deflate")
        .match_header("accept", "*/*")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=.+".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="model"\r\n\r\nwhisper-1\r\n"#.to_string()),
            Matcher::Regex(r#"name="response_format"\r\n\r\nverbose_json\r\n"#.to_string()),
            Matcher::Regex(r#"name="file"; filename="note\.m4a""#.to_string()),
            Matcher::Regex("pretend this is audio".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text": "ok"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .transcribe(AUDIO, &options_with_filename())
        .await
        .expect("transcription should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_sends_optional_fields_when_set() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="model"\r\n\r\nwhisper-large-v3\r\n"#.to_string()),
            Matcher::Regex(r#"name="language"\r\n\r\nde\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text": "ok"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = TranscribeOptions {
        model: Some("whisper-large-v3".to_string()),
        language: Some("de".to_string()),
        filename: Some("note.m4a".to_string()),
        ..Default::default()
    };
    client
        .transcribe(AUDIO, &options)
        .await
        .expect("transcription should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_decompresses_gzip_response() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(verbose_json_body().as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("content-encoding", "gzip")
        .with_body(compressed)
        .create_async()
        .await;

    let client = client_for(&server);
    let transcription = client
        .transcribe(AUDIO, &options_with_filename())
        .await
        .expect("gzip response should decode");
    assert_eq!(transcription.text, "The quick brown fox.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_decompresses_raw_deflate_response() {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(verbose_json_body().as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("content-encoding", "deflate")
        .with_body(compressed)
        .create_async()
        .await;

    let client = client_for(&server);
    let transcription = client
        .transcribe(AUDIO, &options_with_filename())
        .await
        .expect("deflate response should decode");
    assert_eq!(transcription.text, "The quick brown fox.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_200_maps_to_remote_error_even_with_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .transcribe(AUDIO, &options_with_filename())
        .await
        .expect_err("500 must not decode");

    assert!(matches!(err, Error::Remote { status: 500, .. }), "{err:?}");
    assert!(err.to_string().contains("Internal Server Error"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_api_key_fails_before_any_request() {
    // Explicit empty key plus a scrubbed environment leaves no credential.
    // Every other test passes a non-empty key, so the removal cannot race.
    std::env::remove_var("OPENAI_API_KEY");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .expect(0)
        .create_async()
        .await;

    let client = WhisperClient::builder()
        .api_key("")
        .base_url(server.url())
        .build()
        .unwrap();
    let err = client
        .transcribe(AUDIO, &options_with_filename())
        .await
        .expect_err("missing key must fail");

    assert!(matches!(err, Error::Authentication { .. }), "{err:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_filename_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    for options in [
        TranscribeOptions::default(),
        TranscribeOptions {
            filename: Some(String::new()),
            ..Default::default()
        },
    ] {
        let err = client
            .transcribe(AUDIO, &options)
            .await
            .expect_err("missing filename must fail");
        assert!(matches!(err, Error::Validation { .. }), "{err:?}");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_file_derives_filename_from_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/audio/transcriptions")
        .match_body(Matcher::Regex(
            r#"name="file"; filename="voice\.wav""#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text": "ok"}"#)
        .create_async()
        .await;

    let dir = std::env::temp_dir().join("whisper-asr-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("voice.wav");
    std::fs::write(&path, AUDIO).unwrap();

    let client = client_for(&server);
    client
        .transcribe_file(&path, TranscribeOptions::default())
        .await
        .expect("transcription should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_file_missing_file_is_an_io_error() {
    let client = WhisperClient::builder()
        .api_key("test-key")
        .base_url("http://localhost:9")
        .build()
        .unwrap();
    let err = client
        .transcribe_file("/no/such/file.m4a", TranscribeOptions::default())
        .await
        .expect_err("unreadable file must fail");
    assert!(matches!(err, Error::Io(_)), "{err:?}");
}
