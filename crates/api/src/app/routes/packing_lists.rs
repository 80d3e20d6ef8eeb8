use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use tradedocs_core::PackingListId;
use tradedocs_infra::Stored;
use tradedocs_packing::{PackingList, PackingListChanges, PackingListDraft};

use crate::app::{AppState, dto, errors::ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_packing_lists))
        .route("/create", post(create_packing_list))
        .route("/:id", get(get_packing_list))
        .route("/:id/update", put(update_packing_list))
}

/// Store a new list and write its pivot next to the other snapshots.
pub async fn create_packing_list(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<PackingListDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = payload?;
    let document = draft.into_document()?;
    let file_name = document.snapshot_file_name();

    let mut uow = state.store.begin().await?;
    let stored = uow.insert(document).await?;
    uow.commit().await?;

    let relational = &stored.document.relational;
    state.snapshots.write_logged(&file_name, relational).await;
    tracing::info!(id = %stored.id, "packaging list created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": format!("Saved to DB and created {file_name}"),
            "data": relational,
            "id": stored.id,
        })),
    )
        .into_response())
}

pub async fn update_packing_list(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<PackingListId>, PathRejection>,
    payload: Result<Json<PackingListChanges>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut uow = state.store.begin().await?;
    let mut stored: Stored<PackingList> = uow.load(id).await?;
    stored.document.apply(changes)?;
    uow.save(&mut stored).await?;
    uow.commit().await?;

    tracing::info!(%id, "packaging list updated");
    Ok(Json(json!({
        "success": true,
        "message": "Packaging list updated successfully",
        "id": id,
    }))
    .into_response())
}

pub async fn list_packing_lists(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let rows = state.store.list::<PackingList>().await?;
    let items = rows.iter().map(dto::packing_list_summary).collect::<Vec<_>>();
    Ok(Json(items).into_response())
}

pub async fn get_packing_list(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<PackingListId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let stored: Stored<PackingList> = state.store.get(id).await?;
    Ok(Json(dto::packing_list_detail(&stored)).into_response())
}
