//! Contact form endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{IdParam, JsonBody};
use crate::http::server::AppState;
use crate::models::{ContactSubmission, ContactSubmissionPayload};

/// POST /contact - store a contact form submission
async fn create_submission(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<ContactSubmissionPayload>,
) -> Result<(StatusCode, Json<ContactSubmission>), ApiError> {
    let new = payload.validate()?;
    let submission = state.storage.create_contact_submission(new).await?;
    tracing::info!(id = submission.id, "Contact submission stored");

    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /contact - list all submissions
async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    Ok(Json(state.storage.list_contact_submissions().await?))
}

/// GET /contact/{id} - get a single submission
async fn get_submission(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> Result<Json<ContactSubmission>, ApiError> {
    state
        .storage
        .get_contact_submission(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            resource: "contact submission",
            id: id.to_string(),
        })
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", get(list_submissions).post(create_submission))
        .route("/contact/{id}", get(get_submission))
}
