pub mod client;
pub mod types;

pub use client::{AudioStream, BhashiniClient, AUDIO_CONTENT_TYPE};
pub use types::{Recognition, Translation};
