use sqlx::{PgPool, Postgres};
use stagebook_core::{models::User, AppError};
use uuid::Uuid;

/// Repository for registered users
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user. Fails with `DuplicateEmail` when the email is taken.
    #[tracing::instrument(
        skip(self, password_hash),
        fields(db.table = "users", db.operation = "insert")
    )]
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let email_taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        if email_taken {
            return Err(AppError::DuplicateEmail);
        }

        let user = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Concurrent registrations can slip past the EXISTS check; the
            // unique index still decides.
            if let sqlx::Error::Database(ref db) = e {
                if db.constraint() == Some("users_email_key") {
                    return AppError::DuplicateEmail;
                }
            }
            AppError::Database(e)
        })?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(
        skip(self),
        fields(db.table = "users", db.operation = "select", db.record_id = %id)
    )]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
