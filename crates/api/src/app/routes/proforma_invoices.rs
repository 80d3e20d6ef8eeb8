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

use tradedocs_core::ProformaInvoiceId;
use tradedocs_infra::Stored;
use tradedocs_proforma::{ProformaInvoice, ProformaInvoiceChanges, ProformaInvoiceDraft};

use crate::app::{AppState, dto, errors::ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_proforma_invoices))
        .route("/create", post(create_proforma_invoice))
        .route("/:id", get(get_proforma_invoice))
        .route("/:id/update", put(update_proforma_invoice))
}

pub async fn create_proforma_invoice(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ProformaInvoiceDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = payload?;
    let document = draft.into_document()?;

    let mut uow = state.store.begin().await?;
    let stored = uow.insert(document).await?;
    uow.commit().await?;

    let amounts = &stored.document.amounts;
    tracing::info!(
        id = %stored.id,
        currency = %stored.document.currency,
        total = amounts.total,
        balance = amounts.balance,
        "proforma invoice created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Proforma invoice created successfully",
            "id": stored.id,
        })),
    )
        .into_response())
}

pub async fn update_proforma_invoice(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<ProformaInvoiceId>, PathRejection>,
    payload: Result<Json<ProformaInvoiceChanges>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(changes) = payload?;

    let mut uow = state.store.begin().await?;
    let mut stored: Stored<ProformaInvoice> = uow.load(id).await?;
    stored.document.apply(changes)?;
    uow.save(&mut stored).await?;
    uow.commit().await?;

    tracing::info!(%id, "proforma invoice updated");
    Ok(Json(json!({
        "success": true,
        "message": "Proforma invoice updated successfully",
        "id": id,
    }))
    .into_response())
}

pub async fn list_proforma_invoices(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let rows = state.store.list::<ProformaInvoice>().await?;
    let items = rows.iter().map(dto::proforma_invoice_summary).collect::<Vec<_>>();
    Ok(Json(items).into_response())
}

pub async fn get_proforma_invoice(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<ProformaInvoiceId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let stored: Stored<ProformaInvoice> = state.store.get(id).await?;
    Ok(Json(dto::proforma_invoice_detail(&stored)).into_response())
}
