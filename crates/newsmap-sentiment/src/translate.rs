//! Headline translation into the scoring language.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

/// Translates text from `source_lang` into `target_lang`.
#[async_trait]
pub trait Translator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SentimentError::TranslationFailed`] when the provider cannot
    /// translate this text.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, SentimentError>;
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct HttpTranslator {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

impl HttpTranslator {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/translate", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, SentimentError> {
        if source_lang.eq_ignore_ascii_case(target_lang) || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let request = TranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::TranslationFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::TranslationFailed(format!(
                "translation service returned status {}",
                response.status()
            )));
        }

        let body: TranslateResponse = response.json().await.map_err(|e| {
            SentimentError::TranslationFailed(format!("response parse error: {e}"))
        })?;

        Ok(body.translated_text)
    }
}
