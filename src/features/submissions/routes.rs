use axum::{
    routing::{get, post},
    Router,
};

use crate::features::submissions::handlers::{self, SubmissionState};

/// Create routes for the submissions feature
pub fn routes(state: SubmissionState) -> Router {
    Router::new()
        .route("/api/submissions", post(handlers::submit))
        .route("/api/submissions/validate", post(handlers::validate_step))
        .route(
            "/api/submissions/drafts/{draft_id}",
            get(handlers::get_draft)
                .put(handlers::save_draft)
                .delete(handlers::discard_draft),
        )
        .route(
            "/api/submissions/drafts/{draft_id}/submit",
            post(handlers::submit_draft),
        )
        .with_state(state)
}
