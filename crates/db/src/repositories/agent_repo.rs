//! Repository for the `agents` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::agent::{Agent, CreateAgent, UpdateAgent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agent_code, tin, tin_digest, tax_classification, registered_name, \
                        agent_name, trade_name, agent_type, registration_type, \
                        authorized_representative, address, email, phone, fax, website, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for agents.
pub struct AgentRepo;

impl AgentRepo {
    /// Insert a new agent, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAgent) -> Result<Agent, sqlx::Error> {
        let query = format!(
            "INSERT INTO agents (agent_code, tin, tin_digest, tax_classification, registered_name,
                                 agent_name, trade_name, agent_type, registration_type,
                                 authorized_representative, address, email, phone, fax, website)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(&input.agent_code)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.tax_classification)
            .bind(&input.registered_name)
            .bind(&input.agent_name)
            .bind(&input.trade_name)
            .bind(&input.agent_type)
            .bind(&input.registration_type)
            .bind(&input.authorized_representative)
            .bind(&input.address)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.fax)
            .bind(&input.website)
            .fetch_one(pool)
            .await
    }

    /// Find an agent by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live agent by TIN digest, optionally excluding one id (the row
    /// being updated). Used by the uniqueness pre-check.
    pub async fn find_by_tin_digest(
        pool: &PgPool,
        tin_digest: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM agents
             WHERE tin_digest = $1 AND is_deleted = FALSE AND ($2::BIGINT IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(tin_digest)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List all agents, most recently created first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<Agent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM agents WHERE is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Agent>(&query).fetch_all(pool).await
    }

    /// List soft-deleted agents, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<Agent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM agents WHERE is_deleted = TRUE ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, Agent>(&query).fetch_all(pool).await
    }

    /// Update an agent. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAgent,
    ) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!(
            "UPDATE agents SET
                agent_code = COALESCE($2, agent_code),
                tin = COALESCE($3, tin),
                tin_digest = COALESCE($4, tin_digest),
                tax_classification = COALESCE($5, tax_classification),
                registered_name = COALESCE($6, registered_name),
                agent_name = COALESCE($7, agent_name),
                trade_name = COALESCE($8, trade_name),
                agent_type = COALESCE($9, agent_type),
                registration_type = COALESCE($10, registration_type),
                authorized_representative = COALESCE($11, authorized_representative),
                address = COALESCE($12, address),
                email = COALESCE($13, email),
                phone = COALESCE($14, phone),
                fax = COALESCE($15, fax),
                website = COALESCE($16, website),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .bind(&input.agent_code)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.tax_classification)
            .bind(&input.registered_name)
            .bind(&input.agent_name)
            .bind(&input.trade_name)
            .bind(&input.agent_type)
            .bind(&input.registration_type)
            .bind(&input.authorized_representative)
            .bind(&input.address)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.fax)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an agent. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE agents SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted agent; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE agents SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find an agent by ID regardless of deleted state.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE id = $1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
