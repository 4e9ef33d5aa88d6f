//! Repository for the `sessions` table (refresh-token persistence).

use chrono::Utc;
use folio_core::types::DbId;

use crate::models::session::{CreateSession, Session};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, created_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Persist a new session, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find the live session matching a refresh-token hash. Expired and
    /// revoked sessions do not match.
    pub async fn find_by_refresh_token_hash(
        pool: &DbPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = ?1 AND revoked_at IS NULL AND expires_at > ?2"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session (refresh-token rotation).
    pub async fn revoke(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET revoked_at = ?2 WHERE id = ?1 AND revoked_at IS NULL")
            .bind(id)
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke every session belonging to a user (logout).
    pub async fn revoke_all_for_user(pool: &DbPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE sessions SET revoked_at = ?2 WHERE user_id = ?1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(())
    }
}
