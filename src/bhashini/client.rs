use axum::body::Body;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use super::types::{
    Recognition, RecognizeReply, SynthesizePayload, TranslatePayload, TranslateReply, Translation,
};
use crate::config::AppConfig;
use crate::error::ProxyError;
use crate::lang;

const API_KEY_HEADER: &str = "X-API-KEY";

/// Content type the client receives for synthesized speech.
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Filename the audio blob is forwarded under; Bhashini keys its decoder
/// on the extension.
const UPSTREAM_AUDIO_FILENAME: &str = "speech.wav";

/// HTTP client for the Bhashini language services.
///
/// One outbound call per operation: no retries, no added timeouts (a hung
/// upstream call hangs the originating request, per the platform defaults).
#[derive(Debug, Clone)]
pub struct BhashiniClient {
    client: Client,
    api_key: Option<String>,
    translate_url: String,
    tts_url: String,
    asr_url: String,
}

impl BhashiniClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            translate_url: config.translate_url.clone(),
            tts_url: config.tts_url.clone(),
            asr_url: config.asr_url.clone(),
        }
    }

    /// Translate `text` between two client language codes.
    pub async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, ProxyError> {
        let payload = TranslatePayload {
            input_text: text.to_string(),
            input_language: lang::input_language(from, to),
            output_language: lang::output_language(to),
        };
        debug!(
            "translate {} chars: {} -> {}",
            payload.input_text.len(),
            payload.input_language,
            payload.output_language
        );

        let response = self.post(&self.translate_url).json(&payload).send().await?;
        let response = check_status(response).await?;
        let reply: TranslateReply = response.json().await?;
        Ok(reply.into_translation())
    }

    /// Synthesize speech for `text`. Returns a live audio stream; the body
    /// is forwarded chunk by chunk and never materialized here.
    pub async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: &str,
    ) -> Result<AudioStream, ProxyError> {
        let payload = SynthesizePayload {
            text: text.to_string(),
            language: lang::speech_language(language),
            voice_name: lang::voice_name(voice),
        };
        debug!(
            "synthesize {} chars: language={} voice={}",
            payload.text.len(),
            payload.language,
            payload.voice_name
        );

        let response = self
            .post(&self.tts_url)
            .header(reqwest::header::ACCEPT, AUDIO_CONTENT_TYPE)
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(AudioStream(response))
    }

    /// Recognize speech from an uploaded audio blob.
    pub async fn recognize(&self, audio: Bytes, language: &str) -> Result<Recognition, ProxyError> {
        debug!("recognize {} bytes: language hint {}", audio.len(), language);

        let part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(UPSTREAM_AUDIO_FILENAME);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("language", lang::speech_language(language));

        // The multipart content-type header is left to reqwest: it carries a
        // per-request generated boundary.
        let response = self.post(&self.asr_url).multipart(form).send().await?;
        let response = check_status(response).await?;
        let reply: RecognizeReply = response.json().await?;
        Ok(Recognition {
            text: reply.recognized().to_string(),
        })
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(url);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder
    }
}

/// Turn a non-success upstream reply into an `Upstream` error carrying the
/// status and raw body verbatim.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProxyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(ProxyError::Upstream {
        status: status.as_u16(),
        body,
    })
}

/// Synthesized audio still attached to the upstream socket. Converting it
/// into a response body keeps the transfer streaming end to end.
pub struct AudioStream(reqwest::Response);

impl AudioStream {
    pub fn into_body(self) -> Body {
        Body::from_stream(self.0.bytes_stream())
    }
}
