//! transcribe — send an audio file to a Whisper endpoint and print the text.
//!
//! Usage:
//!   transcribe <audio-file> [--model <id>] [--language <code>]
//!
//! The API key is read from OPENAI_API_KEY, the base URL from
//! OPENAI_BASE_URL (defaulting to the OpenAI API host). RUST_LOG controls
//! log verbosity.

use whisper_asr::{TranscribeOptions, WhisperClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut file: Option<String> = None;
    let mut options = TranscribeOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--model" => {
                options.model = args.get(i + 1).cloned();
                i += 2;
            }
            "--language" => {
                options.language = args.get(i + 1).cloned();
                i += 2;
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return;
            }
            other if file.is_none() => {
                file = Some(other.to_string());
                i += 1;
            }
            other => {
                eprintln!("Unexpected argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
    }

    let Some(file) = file else {
        print_usage();
        std::process::exit(1);
    };

    let client = match WhisperClient::builder().build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating client: {e}");
            std::process::exit(1);
        }
    };

    match client.transcribe_file(&file, options).await {
        Ok(transcription) => println!("{}", transcription.text),
        Err(e) => {
            eprintln!("Error transcribing {file}: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"transcribe — Whisper transcription client

USAGE:
    transcribe <audio-file> [OPTIONS]

OPTIONS:
    --model <id>          Model identifier (default: whisper-1)
    --language <code>     ISO-639-1 language hint

ENVIRONMENT:
    OPENAI_API_KEY        API key (required)
    OPENAI_BASE_URL       Base URL override
    RUST_LOG              Log filter (e.g. debug)"#
    );
}
