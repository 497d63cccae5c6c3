use crate::chunk::split_text;
use crate::error::{Error, Result};
use crate::language::LanguageCode;
use async_trait::async_trait;

/// Default endpoint of Google's translate text-to-speech service
pub const GOOGLE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// The endpoint only speaks this many characters per request
const MAX_PIECE_CHARS: usize = 100;

/// Turns text into spoken audio.
///
/// Implementations are responsible for:
/// - respecting the provider's text length limits
/// - merging the audio of several requests into one MP3 stream
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` in `language`, returning MP3 audio
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>>;
}

/// [SpeechSynthesizer] backed by Google's translate TTS endpoint
#[derive(Debug, Clone)]
pub struct GoogleSpeech {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleSpeech {
    pub fn new<S: Into<String>>(client: reqwest::Client, endpoint: S) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn fetch_piece(
        &self,
        piece: &str,
        language: LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>> {
        let total = total.to_string();
        let idx = index.to_string();
        let textlen = piece.chars().count().to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("q", piece),
                ("tl", language.as_str()),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %language, piece_index = index, "speech request failed");
                Error::SynthesisFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, %language, piece_index = index, "speech service refused the request");
            return Err(Error::SynthesisFailed(format!(
                "speech service answered {status}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| Error::SynthesisFailed(format!("unreadable audio: {e}")))?;
        Ok(audio.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>> {
        let start_time = std::time::Instant::now();
        let pieces = split_text(text, MAX_PIECE_CHARS);
        if pieces.is_empty() {
            return Err(Error::SynthesisFailed("no text to speak".into()));
        }

        tracing::info!(
            %language,
            text_length = text.chars().count(),
            piece_count = pieces.len(),
            "starting speech synthesis"
        );

        // MP3 frames are self-delimiting, so consecutive responses concatenate
        let mut audio = Vec::new();
        for (index, piece) in pieces.iter().enumerate() {
            let bytes = self
                .fetch_piece(piece, language, index, pieces.len())
                .await?;
            audio.extend_from_slice(&bytes);
        }

        tracing::info!(
            %language,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.len(),
            "speech synthesis completed"
        );
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_text_is_rejected_without_a_request() {
        // unroutable endpoint: the call must fail before any request is made
        let speech = GoogleSpeech::new(reqwest::Client::new(), "http://127.0.0.1:9/unused");
        let err = speech.synthesize("   ", LanguageCode::English).await.unwrap_err();
        assert!(matches!(err, Error::SynthesisFailed(ref m) if m == "no text to speak"));
    }
}
