use serde::{Deserialize, Serialize};

/// Body of the upstream translation call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePayload {
    pub input_text: String,
    pub input_language: String,
    pub output_language: String,
}

/// Translation reply as Bhashini sends it.
///
/// The provider's schema has drifted between releases, so every field is
/// optional and the translated text is accepted under three names.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateReply {
    pub output_text: Option<String>,
    pub translated_text: Option<String>,
    pub translation: Option<String>,
    pub transliteration: Option<String>,
    pub detected_source: Option<String>,
}

impl TranslateReply {
    /// First non-empty of `outputText` / `translatedText` / `translation`,
    /// or the empty string when none are present.
    pub fn translated(&self) -> &str {
        [&self.output_text, &self.translated_text, &self.translation]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|text| !text.is_empty()))
            .unwrap_or("")
    }

    pub fn into_translation(self) -> Translation {
        let translated_text = self.translated().to_string();
        Translation {
            translated_text,
            // Empty strings count as absent, like the text fields above.
            transliteration: self.transliteration.filter(|text| !text.is_empty()),
            detected_source: self.detected_source.filter(|text| !text.is_empty()),
        }
    }
}

/// Translation result in the shape the browser client expects. Absent
/// optional fields serialize as explicit `null`s, never disappear.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    pub transliteration: Option<String>,
    pub detected_source: Option<String>,
}

/// Body of the upstream synthesis call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizePayload {
    pub text: String,
    pub language: String,
    pub voice_name: String,
}

/// Recognition reply as Bhashini sends it; text accepted under two names.
#[derive(Debug, Default, Deserialize)]
pub struct RecognizeReply {
    pub text: Option<String>,
    pub transcript: Option<String>,
}

impl RecognizeReply {
    pub fn recognized(&self) -> &str {
        [&self.text, &self.transcript]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|text| !text.is_empty()))
            .unwrap_or("")
    }
}

/// Recognition result in the client-facing shape.
#[derive(Debug, Serialize)]
pub struct Recognition {
    pub text: String,
}
