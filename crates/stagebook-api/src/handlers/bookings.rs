//! Booking retrieval handlers. Both are behind the auth middleware; every
//! query is scoped to the caller so other users' records stay invisible.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use stagebook_core::models::BookingWithOwner;
use stagebook_core::AppError;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/my-bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "Caller's bookings, newest first", body = [BookingWithOwner]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<BookingWithOwner>>, HttpAppError> {
    let bookings = state.bookings.list_with_owner(auth.user_id).await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/booking/{id}",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking", body = BookingWithOwner),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Absent or owned by someone else", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingWithOwner>, HttpAppError> {
    let booking = state
        .bookings
        .get_for_owner(id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    Ok(Json(booking))
}
