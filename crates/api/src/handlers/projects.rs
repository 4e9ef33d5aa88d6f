//! Handlers for the `/projects` resource.
//!
//! Create runs the full admin mutation pipeline: parse the multipart
//! form, validate before any write, upload the cover image with progress
//! events, persist, then notify subscribers. Delete requires an explicit
//! confirmation; without it no delete is issued.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use folio_core::error::CoreError;
use folio_core::form::ProjectForm;
use folio_core::project::{normalize, sort_for_display, Project};
use folio_core::types::DbId;
use folio_db::models::project::CreateProject;
use folio_db::repositories::ProjectRepo;
use folio_events::{SiteEvent, PROJECT_CREATED, PROJECT_DELETED, UPLOAD_PROGRESS};
use folio_storage::{object_key, UploadProgress};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field name carrying the cover image.
const IMAGE_FIELD: &str = "image";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Wire view of the live feed returned by `GET /projects/feed`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub loading: bool,
    pub projects: Arc<Vec<Project>>,
    pub last_error: Option<String>,
}

/// Query parameters for `DELETE /projects/{id}`.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// Must be `true`; the confirmation step of the delete flow.
    pub confirm: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// One-shot normalized project list in display order. Public.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let rows = ProjectRepo::list_for_display(&state.pool).await?;
    let mut projects: Vec<Project> = rows
        .into_iter()
        .map(|row| normalize(row.into_record()))
        .collect();
    sort_for_display(&mut projects);

    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/feed
///
/// The current snapshot of the live feed, including the loading flag and
/// the last rebuild error if one occurred. Public.
pub async fn feed(State(state): State<AppState>) -> Json<DataResponse<FeedView>> {
    let snapshot = state.feed.borrow().clone();
    Json(DataResponse {
        data: FeedView {
            loading: snapshot.loading,
            projects: snapshot.projects,
            last_error: snapshot.last_error,
        },
    })
}

/// GET /api/v1/projects/{id}
///
/// A single normalized project. Public.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let row = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: normalize(row.into_record()),
    }))
}

/// POST /api/v1/projects (multipart, admin only)
///
/// Pipeline order is fixed: validate the whole submission first (a
/// rejected form issues zero writes), then upload the image, then insert
/// the row, then publish the change event.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let mut form = ProjectForm::default();
    let mut image: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            image = Some((filename, data));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if !form.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    form.validate_submission(image.is_some())
        .map_err(AppError::Core)?;
    // Validation passed, so the image is present.
    let Some((filename, data)) = image else {
        return Err(AppError::Core(CoreError::Validation(
            "Please select an image for the project background".to_string(),
        )));
    };

    // Upload with progress fan-out: samples flow through a channel into
    // upload.progress events so dashboard clients can render a bar.
    let key = object_key(&filename, chrono::Utc::now().timestamp_millis());
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<UploadProgress>();

    let bus = Arc::clone(&state.event_bus);
    let progress_key = key.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(sample) = progress_rx.recv().await {
            bus.publish(SiteEvent::new(UPLOAD_PROGRESS).with_payload(serde_json::json!({
                "key": progress_key,
                "percent": sample.percent(),
            })));
        }
    });

    let upload_result = state.store.put(&key, data, Some(progress_tx)).await;
    // The sender is dropped either way, so the forwarder drains and exits.
    let _ = forwarder.await;
    let image_url = upload_result?;

    let input = CreateProject::from(form.into_draft(image_url.clone()));
    let row = match ProjectRepo::create(&state.pool, &input).await {
        Ok(row) => row,
        Err(error) => {
            // The image is already stored but the row never landed. Keep
            // the object and surface it; re-submission uploads a fresh key.
            tracing::warn!(%error, key, url = %image_url, "Orphaned upload: insert failed");
            return Err(error.into());
        }
    };

    state.event_bus.publish(
        SiteEvent::new(PROJECT_CREATED)
            .with_project(row.id)
            .with_payload(serde_json::json!({ "name": row.name })),
    );
    tracing::info!(project_id = row.id, admin_id = admin.user_id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: normalize(row.into_record()),
        }),
    ))
}

/// DELETE /api/v1/projects/{id}?confirm=true (admin only)
///
/// Without `confirm=true` the request is rejected before any delete is
/// issued. Deletion is immediate and irreversible; the stored cover
/// image is left in place.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    if params.confirm != Some(true) {
        return Err(AppError::ConfirmationRequired);
    }

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    state
        .event_bus
        .publish(SiteEvent::new(PROJECT_DELETED).with_project(id));
    tracing::info!(project_id = id, admin_id = admin.user_id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
