use crate::chunk::split_lines;
use crate::error::{Error, Result};
use crate::language::LanguageCode;
use async_trait::async_trait;
use serde_json::Value;

/// Default endpoint of the public Google web translation API
pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// The web endpoint rejects requests much longer than this
const MAX_BATCH_CHARS: usize = 5000;

/// Translates text into one of the supported languages.
/// The source language is detected by the implementation.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: LanguageCode) -> Result<String>;
}

/// [Translator] using Google's keyless web translation endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new<S: Into<String>>(client: reqwest::Client, endpoint: S) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn translate_batch(&self, text: &str, target: LanguageCode) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %target, "translation request failed");
                Error::TranslationFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, %target, "translation service refused the request");
            return Err(Error::TranslationFailed(format!(
                "translation service answered {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::TranslationFailed(format!("unreadable response: {e}")))?;
        parse_translation(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: LanguageCode) -> Result<String> {
        let start_time = std::time::Instant::now();
        let batches = split_lines(text, MAX_BATCH_CHARS);

        tracing::info!(
            %target,
            text_length = text.chars().count(),
            batch_count = batches.len(),
            "translating text"
        );

        // line breaks between batches are put back untranslated
        let mut translated = String::new();
        for (index, batch) in batches.iter().enumerate() {
            if batch.text.trim().is_empty() {
                translated.push_str(&batch.text);
            } else {
                tracing::debug!(
                    batch_index = index,
                    batch_size = batch.text.chars().count(),
                    "translating batch"
                );
                translated.push_str(&self.translate_batch(&batch.text, target).await?);
            }
            translated.push_str(batch.separator);
        }

        tracing::info!(
            %target,
            latency_ms = start_time.elapsed().as_millis(),
            translated_length = translated.chars().count(),
            "translation completed"
        );
        Ok(translated)
    }
}

/// The endpoint answers with nested arrays; the first element lists the
/// translated segments, each segment starting with its translated text:
/// `[[["Bonjour. ","Hello. ",...],["Au revoir","Goodbye",...]],null,"en",...]`
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::TranslationFailed("unexpected response shape".into()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_translated_segments() {
        let body = json!([
            [
                ["Bonjour. ", "Hello. ", null, null, 10],
                ["Au revoir", "Goodbye", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Bonjour. Au revoir");
    }

    #[test]
    fn skips_segments_without_text() {
        let body = json!([[["नमस्ते", "Hello"], [null, null, "Namaste"]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "नमस्ते");
    }

    #[tokio::test]
    async fn blank_text_needs_no_request() {
        // unroutable endpoint: any request would fail
        let translator = GoogleTranslator::new(reqwest::Client::new(), "http://127.0.0.1:9/unused");
        let translated = translator.translate(" \n\n", LanguageCode::French).await.unwrap();
        assert_eq!(translated, "");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        for body in [json!({"error": "quota"}), json!([]), json!([null, null, "en"])] {
            assert!(matches!(
                parse_translation(&body).unwrap_err(),
                Error::TranslationFailed(_)
            ));
        }
    }
}
