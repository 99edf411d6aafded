use std::env;
use std::path::PathBuf;

use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_TRANSLATE_URL: &str = "https://bhashini.ai/v1/translate";
const DEFAULT_TTS_URL: &str = "https://tts.bhashini.ai/v1/synthesize";
const DEFAULT_ASR_URL: &str = "https://asr.bhashini.ai/v1/recognize";

/// Immutable process configuration.
///
/// Read from the environment exactly once in `main` and injected into the
/// pieces that need it. Nothing reads the environment at request time, so
/// tests can substitute credentials and endpoints by building the struct
/// directly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bhashini API key, sent as `X-API-KEY` on every upstream call. A
    /// missing key is not fatal: requests go out unauthenticated and fail
    /// upstream authorization instead.
    pub api_key: Option<String>,
    pub port: u16,
    /// Directory the shell assets are served (and precached) from.
    pub public_dir: PathBuf,
    pub translate_url: String,
    pub tts_url: String,
    pub asr_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            tts_url: DEFAULT_TTS_URL.to_string(),
            asr_url: DEFAULT_ASR_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Assemble the configuration from the process environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("BHASHINI_API_KEY").ok().filter(|k| !k.is_empty()),
            port: parse_port(env::var("PORT").ok()),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            translate_url: env::var("BHASHINI_TRANSLATE_URL").unwrap_or(defaults.translate_url),
            tts_url: env::var("BHASHINI_TTS_URL").unwrap_or(defaults.tts_url),
            asr_url: env::var("BHASHINI_ASR_URL").unwrap_or(defaults.asr_url),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!("ignoring unparseable PORT value {:?}", value);
            DEFAULT_PORT
        }),
    }
}
