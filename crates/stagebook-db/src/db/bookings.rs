use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres};
use stagebook_core::{
    models::{Booking, BookingOwner, BookingWithOwner},
    AppError,
};
use uuid::Uuid;

/// Row shape for booking queries that join the owning user.
#[derive(Debug, FromRow)]
struct BookingOwnerRow {
    id: Uuid,
    user_id: Option<Uuid>,
    form_data: serde_json::Value,
    created_at: DateTime<Utc>,
    owner_name: Option<String>,
    owner_email: Option<String>,
}

impl From<BookingOwnerRow> for BookingWithOwner {
    fn from(row: BookingOwnerRow) -> Self {
        BookingWithOwner {
            id: row.id,
            user_id: row.user_id,
            form_data: row.form_data,
            created_at: row.created_at,
            owner: owner_from_parts(row.owner_name, row.owner_email),
        }
    }
}

fn owner_from_parts(name: Option<String>, email: Option<String>) -> Option<BookingOwner> {
    match (name, email) {
        (Some(name), Some(email)) => Some(BookingOwner { name, email }),
        _ => None,
    }
}

/// Repository for persisted form submissions
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a booking. `user_id` is stored as given; there is no
    /// referential check against the users table.
    #[tracing::instrument(
        skip(self, form_data),
        fields(db.table = "bookings", db.operation = "insert")
    )]
    pub async fn create(
        &self,
        user_id: Option<Uuid>,
        form_data: serde_json::Value,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<Postgres, Booking>(
            r#"
            INSERT INTO bookings (user_id, form_data)
            VALUES ($1, $2)
            RETURNING id, user_id, form_data, created_at
            "#,
        )
        .bind(user_id)
        .bind(form_data)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// List one owner's bookings, newest first, with the owner populated.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "bookings", db.operation = "select")
    )]
    pub async fn list_with_owner(&self, owner_id: Uuid) -> Result<Vec<BookingWithOwner>, AppError> {
        let rows = sqlx::query_as::<Postgres, BookingOwnerRow>(
            r#"
            SELECT b.id, b.user_id, b.form_data, b.created_at,
                   u.name AS owner_name, u.email AS owner_email
            FROM bookings b
            LEFT JOIN users u ON u.id = b.user_id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookingWithOwner::from).collect())
    }

    /// Fetch one booking scoped to its owner. Another user's booking comes
    /// back as `None`, indistinguishable from a missing one.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "bookings", db.operation = "select", db.record_id = %id)
    )]
    pub async fn get_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<BookingWithOwner>, AppError> {
        let row = sqlx::query_as::<Postgres, BookingOwnerRow>(
            r#"
            SELECT b.id, b.user_id, b.form_data, b.created_at,
                   u.name AS owner_name, u.email AS owner_email
            FROM bookings b
            LEFT JOIN users u ON u.id = b.user_id
            WHERE b.id = $1 AND b.user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookingWithOwner::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_requires_both_name_and_email() {
        assert!(owner_from_parts(Some("Alice".into()), Some("a@example.com".into())).is_some());
        assert!(owner_from_parts(Some("Alice".into()), None).is_none());
        assert!(owner_from_parts(None, None).is_none());
    }

    #[test]
    fn row_maps_into_booking_with_owner() {
        let row = BookingOwnerRow {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            form_data: serde_json::json!({"personName": "Alice"}),
            created_at: Utc::now(),
            owner_name: Some("Alice".to_string()),
            owner_email: Some("alice@example.com".to_string()),
        };
        let booking = BookingWithOwner::from(row);
        let owner = booking.owner.expect("owner populated");
        assert_eq!(owner.name, "Alice");
        assert_eq!(owner.email, "alice@example.com");
        assert_eq!(booking.form_data["personName"], "Alice");
    }
}
