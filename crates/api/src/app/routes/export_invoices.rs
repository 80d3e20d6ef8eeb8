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

use tradedocs_core::ExportInvoiceId;
use tradedocs_export::{ExportInvoice, ExportInvoiceChanges, ExportInvoiceDraft};
use tradedocs_infra::Stored;

use crate::app::{AppState, dto, errors::ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_export_invoices))
        .route("/create", post(create_export_invoice))
        .route("/:id", get(get_export_invoice))
        .route("/:id/update", put(update_export_invoice))
}

pub async fn create_export_invoice(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ExportInvoiceDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = payload?;
    let document = draft.into_document()?;

    let mut uow = state.store.begin().await?;
    let stored = uow.insert(document).await?;
    uow.commit().await?;

    tracing::info!(id = %stored.id, "export invoice created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "ZC exporter created successfully",
            "id": stored.id,
        })),
    )
        .into_response())
}

pub async fn update_export_invoice(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<ExportInvoiceId>, PathRejection>,
    payload: Result<Json<ExportInvoiceChanges>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut uow = state.store.begin().await?;
    let mut stored: Stored<ExportInvoice> = uow.load(id).await?;
    stored.document.apply(changes)?;
    uow.save(&mut stored).await?;
    uow.commit().await?;

    tracing::info!(%id, "export invoice updated");
    Ok(Json(json!({
        "success": true,
        "message": "ZC exporter updated successfully",
        "id": id,
    }))
    .into_response())
}

pub async fn list_export_invoices(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let rows = state.store.list::<ExportInvoice>().await?;
    let items = rows.iter().map(dto::export_invoice_summary).collect::<Vec<_>>();
    Ok(Json(items).into_response())
}

pub async fn get_export_invoice(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<ExportInvoiceId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let stored: Stored<ExportInvoice> = state.store.get(id).await?;
    Ok(Json(dto::export_invoice_detail(&stored)).into_response())
}
