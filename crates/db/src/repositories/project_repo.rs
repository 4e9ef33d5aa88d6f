//! Repository for the `projects` table.
//!
//! The project lifecycle is create and delete only; there is no update
//! operation.

use chrono::Utc;
use folio_core::types::DbId;

use crate::models::project::{CreateProject, ProjectRow};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, long_description, timeline, tech_stack, \
     live_href, source_href, icon_name, images, sort_order, grid_class, created_at";

/// CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the stored row with its assigned
    /// id and server-side `created_at`.
    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, description, long_description, timeline, tech_stack,
                 live_href, source_href, icon_name, images, sort_order,
                 grid_class, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.long_description)
            .bind(&input.timeline)
            .bind(encode_list(&input.tech_stack))
            .bind(&input.live_href)
            .bind(&input.source_href)
            .bind(&input.icon_name)
            .bind(encode_list(&input.images))
            .bind(input.sort_order)
            .bind(&input.grid_class)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// All projects in display order: ascending sort weight, then newest
    /// first.
    pub async fn list_for_display(pool: &DbPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects ORDER BY sort_order ASC, created_at DESC"
        );
        sqlx::query_as::<_, ProjectRow>(&query).fetch_all(pool).await
    }

    /// Find a project by id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by id. Returns `true` if a row was removed.
    /// Immediate and irreversible; the stored cover image is not touched.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Encode a string list as the JSON text the list columns store.
fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}
