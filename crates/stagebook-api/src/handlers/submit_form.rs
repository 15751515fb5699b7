//! Booking form submission endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::submission;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormResponse {
    pub message: String,
    /// Present when the submission carried a well-formed owner id and a
    /// booking row was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<Uuid>,
    pub email_sent: bool,
}

#[utoipa::path(
    post,
    path = "/submit-form",
    tag = "submissions",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Submission processed", body = SubmitFormResponse),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SubmitFormResponse>, HttpAppError> {
    let receipt = submission::process(&state, multipart).await?;

    let message = if receipt.email_sent {
        "Form submitted successfully!".to_string()
    } else {
        "Booking saved, but the notification email could not be sent".to_string()
    };

    Ok(Json(SubmitFormResponse {
        message,
        booking_id: receipt.booking_id,
        email_sent: receipt.email_sent,
    }))
}
