use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted form submission. `form_data` mirrors the submitted fields
/// verbatim; rows are created once and never mutated.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[schema(value_type = Object)]
    pub form_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Owner contact details attached to a booking in listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingOwner {
    pub name: String,
    pub email: String,
}

/// Booking with its owner populated for retrieval endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithOwner {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[schema(value_type = Object)]
    pub form_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<BookingOwner>,
}
