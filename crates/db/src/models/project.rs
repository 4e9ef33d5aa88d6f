//! Project row model and write DTO.

use folio_core::form::ProjectDraft;
use folio_core::project::ProjectRecord;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table. The list columns stay as the
/// stored JSON text; decoding is the normalizer's job.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub timeline: Option<String>,
    pub tech_stack: String,
    pub live_href: Option<String>,
    pub source_href: Option<String>,
    pub icon_name: Option<String>,
    pub images: String,
    pub sort_order: i64,
    pub grid_class: Option<String>,
    pub created_at: Timestamp,
}

impl ProjectRow {
    /// Reshape into the raw record the normalizer consumes.
    pub fn into_record(self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            name: Some(self.name),
            description: Some(self.description),
            long_description: self.long_description,
            timeline: self.timeline,
            tech_stack: Some(self.tech_stack),
            live_href: self.live_href,
            source_href: self.source_href,
            icon_name: self.icon_name,
            images: Some(self.images),
            sort_order: Some(self.sort_order),
            grid_class: self.grid_class,
            created_at: Some(self.created_at),
        }
    }
}

/// Insert payload for a new project. Built from a validated
/// [`ProjectDraft`]; the database assigns `id` and the server assigns
/// `created_at` at insert time.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub timeline: Option<String>,
    pub tech_stack: Vec<String>,
    pub live_href: Option<String>,
    pub source_href: Option<String>,
    pub icon_name: String,
    pub images: Vec<String>,
    pub sort_order: i64,
    pub grid_class: Option<String>,
}

impl From<ProjectDraft> for CreateProject {
    fn from(draft: ProjectDraft) -> Self {
        Self {
            name: draft.name,
            description: draft.description,
            long_description: draft.long_description,
            timeline: draft.timeline,
            tech_stack: draft.tech_stack,
            live_href: draft.live_href,
            source_href: draft.source_href,
            icon_name: draft.icon_name,
            images: draft.images,
            sort_order: draft.sort_order,
            grid_class: draft.grid_class,
        }
    }
}
