//! Repository for the `users` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, STATUS_ACTIVE, STATUS_BLOCKED, STATUS_INACTIVE};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, middle_initial, email, password_hash, role, \
                        status, failed_login_attempts, blocked_at, restored_at, created_at, updated_at";

/// Provides CRUD and account-state operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. New accounts start
    /// `inactive`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, middle_initial, email, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.middle_initial)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Count all users. Used by the bootstrap guard.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Update a user's profile fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                middle_initial = COALESCE($4, middle_initial),
                email = COALESCE($5, email),
                role = COALESCE($6, role),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.middle_initial)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed sign-in counter by 1.
    pub async fn increment_failed_attempts(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_attempts = failed_login_attempts + 1,
                              updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Block a user after too many failed sign-ins: stamps `blocked_at` and
    /// sets the status. Returns `true` if the row was updated.
    pub async fn block(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET status = $2, blocked_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status <> $2",
        )
        .bind(id)
        .bind(STATUS_BLOCKED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unblock a user: back to `inactive` (not `active` -- the next sign-in
    /// re-activates), stamps `restored_at`, resets the failure counter.
    ///
    /// Returns `true` only when the user was actually blocked.
    pub async fn unblock(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET status = $2, restored_at = NOW(),
                              failed_login_attempts = 0, updated_at = NOW()
             WHERE id = $1 AND status = $3",
        )
        .bind(id)
        .bind(STATUS_INACTIVE)
        .bind(STATUS_BLOCKED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a successful sign-in: status to `active` and the failure
    /// counter back to zero.
    pub async fn record_successful_sign_in(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET status = $2, failed_login_attempts = 0, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(STATUS_ACTIVE)
        .execute(pool)
        .await?;
        Ok(())
    }
}
