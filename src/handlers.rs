use axum::{
    extract::{Multipart, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::warn;

use crate::bhashini::{Recognition, Translation, AUDIO_CONTENT_TYPE};
use crate::error::ProxyError;
use crate::lang;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub q: String,
    #[serde(default = "default_source")]
    pub from: String,
    #[serde(default = "default_target")]
    pub to: String,
}

fn default_source() -> String {
    lang::AUTO_SOURCE.to_string()
}

fn default_target() -> String {
    lang::DEFAULT_TARGET.to_string()
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeBody {
    pub text: String,
    #[serde(default = "default_speech_language")]
    pub lang: String,
    #[serde(default)]
    pub options: SynthesizeOptions,
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeOptions {
    #[serde(default = "default_voice")]
    pub voice: String,
}

impl Default for SynthesizeOptions {
    fn default() -> Self {
        Self {
            voice: default_voice(),
        }
    }
}

fn default_speech_language() -> String {
    lang::DEFAULT_SPEECH_LANGUAGE.to_string()
}

fn default_voice() -> String {
    lang::DEFAULT_VOICE.to_string()
}

/// POST /api/bhashini/translate
pub async fn translate(
    State(state): State<AppState>,
    Json(body): Json<TranslateBody>,
) -> Result<Json<Translation>, ProxyError> {
    let translation = state
        .bhashini
        .translate(&body.q, &body.from, &body.to)
        .await?;
    Ok(Json(translation))
}

/// POST /api/bhashini/tts
///
/// The upstream audio body is piped through as it arrives; playback can
/// start before synthesis finishes.
pub async fn synthesize(
    State(state): State<AppState>,
    Json(body): Json<SynthesizeBody>,
) -> Result<Response, ProxyError> {
    let audio = state
        .bhashini
        .synthesize(&body.text, &body.lang, &body.options.voice)
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
        .body(audio.into_body())
        .map_err(|err| ProxyError::Transport(err.into()))
}

/// POST /api/bhashini/asr
///
/// Multipart upload: `audio` carries the recorded bytes, `lang` the hint.
/// A missing file is a client error and never reaches upstream.
pub async fn recognize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Recognition>, ProxyError> {
    let mut audio: Option<Bytes> = None;
    let mut language = lang::DEFAULT_SPEECH_LANGUAGE.to_string();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() == Some("audio") {
            audio = Some(field.bytes().await.map_err(bad_multipart)?);
        } else if field.name() == Some("lang") {
            let value = field.text().await.map_err(bad_multipart)?;
            if !value.is_empty() {
                language = value;
            }
        }
    }

    let audio = audio.ok_or_else(|| ProxyError::BadRequest("No audio uploaded".to_string()))?;
    let recognition = state.bhashini.recognize(audio, &language).await?;
    Ok(Json(recognition))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ProxyError {
    ProxyError::BadRequest(format!("invalid multipart body: {err}"))
}

/// Fallback route: everything outside /api/ is shell territory.
pub async fn shell(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match state.worker.handle(&method, &path).await {
        Some(Ok(asset)) => asset.into_response(),
        Some(Err(err)) => {
            warn!("shell fetch for {} failed: {:#}", path, err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "shell asset unavailable".to_string(),
            )
                .into_response()
        }
        // Not intercepted: reads go to the origin uncached, anything else
        // has no fallback route here.
        None if method == Method::GET => match state.worker.fetch_uncached(&path).await {
            Ok(asset) => asset.into_response(),
            Err(err) => {
                warn!("uncached read of {} failed: {:#}", path, err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "asset unavailable".to_string(),
                )
                    .into_response()
            }
        },
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
