use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::handlers;
use crate::state::AppState;

// Recorded speech uploads routinely exceed axum's 2 MB default body cap.
const AUDIO_UPLOAD_LIMIT_BYTES: usize = 32 * 1024 * 1024;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bhashini/translate", post(handlers::translate))
        .route("/api/bhashini/tts", post(handlers::synthesize))
        .route(
            "/api/bhashini/asr",
            post(handlers::recognize).layer(DefaultBodyLimit::max(AUDIO_UPLOAD_LIMIT_BYTES)),
        )
        // Shell assets, served through the offline cache worker.
        .fallback(handlers::shell)
}
