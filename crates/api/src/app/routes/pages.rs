//! Server-rendered pages: home, add/view/edit forms, and the print views.
//!
//! Form pages are thin shells; their script talks to the JSON API. Print pages
//! are rendered here and also leave a JSON snapshot of their context on disk.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Extension, Path, Query,
        rejection::{PathRejection, QueryRejection},
    },
    response::Html,
    routing::{MethodRouter, get},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tera::{Context, Tera};

use tradedocs_core::{ExportInvoiceId, PackingListId, ProformaInvoiceId};
use tradedocs_export::{ExportInvoice, InvoiceRowLayout};
use tradedocs_infra::{StoreError, Stored, StoredDocument};
use tradedocs_packing::PackingList;
use tradedocs_proforma::{ProformaInvoice, ProformaPrintView};

use crate::app::forms::{self, FormSpec};
use crate::app::{AppState, dto, errors::ApiError};

pub const PACKING_LIST_SNAPSHOT: &str = "packaging_list/data.json";
pub const EXPORT_INVOICE_SNAPSHOT: &str = "ZC/data.json";

/// A document type with add/view/edit pages.
pub trait PageDocument: StoredDocument {
    const FORM: &'static FormSpec;

    /// The record as the edit form expects it (same shape as the detail endpoint).
    fn detail(stored: &Stored<Self>) -> Result<Value, ApiError>;
}

impl PageDocument for PackingList {
    const FORM: &'static FormSpec = &forms::PACKING_LIST;

    fn detail(stored: &Stored<Self>) -> Result<Value, ApiError> {
        Ok(dto::packing_list_detail(stored))
    }
}

impl PageDocument for ProformaInvoice {
    const FORM: &'static FormSpec = &forms::PROFORMA_INVOICE;

    fn detail(stored: &Stored<Self>) -> Result<Value, ApiError> {
        Ok(dto::proforma_invoice_detail(stored))
    }
}

impl PageDocument for ExportInvoice {
    const FORM: &'static FormSpec = &forms::EXPORT_INVOICE;

    fn detail(stored: &Stored<Self>) -> Result<Value, ApiError> {
        Ok(serde_json::to_value(dto::export_invoice_detail(stored))?)
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .merge(document_pages::<PackingList>(get(print_packing_list)))
        .merge(document_pages::<ProformaInvoice>(get(print_proforma_invoice)))
        .merge(document_pages::<ExportInvoice>(get(print_export_invoice)))
}

fn document_pages<D: PageDocument>(print: MethodRouter) -> Router {
    let page = D::FORM.page;
    Router::new()
        .route(page, get(add_page::<D>))
        .route(&format!("{page}/view"), get(view_page::<D>))
        .route(&format!("{page}/edit"), get(edit_page::<D>))
        .route(&format!("{page}/print/:id"), print)
}

fn render<T: Serialize>(templates: &Tera, name: &str, context: &T) -> Result<Html<String>, ApiError> {
    let context = Context::from_serialize(context)?;
    Ok(Html(templates.render(name, &context)?))
}

#[derive(Debug, Serialize)]
struct HomePage {
    forms: [&'static FormSpec; 3],
}

#[derive(Debug, Serialize)]
struct ListPage {
    form: &'static FormSpec,
}

#[derive(Debug, Serialize)]
struct FormPage {
    form: &'static FormSpec,
    record_id: Option<i64>,
    record: Option<Value>,
    /// An id was asked for but no such record exists.
    missing: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    pub id: Option<String>,
}

pub async fn home(Extension(state): Extension<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render(&state.templates, "home.html", &HomePage { forms: forms::ALL })
}

pub async fn add_page<D: PageDocument>(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let page = FormPage {
        form: D::FORM,
        record_id: None,
        record: None,
        missing: false,
    };
    render(&state.templates, "form.html", &page)
}

pub async fn view_page<D: PageDocument>(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    render(&state.templates, "view.html", &ListPage { form: D::FORM })
}

/// Edit form seeded from `?id=`; an unknown or missing id gives an empty form.
pub async fn edit_page<D: PageDocument>(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<EditQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) = query?;
    let requested = query.id.as_deref().and_then(|raw| raw.trim().parse::<i64>().ok());

    let stored = match requested {
        Some(id) => match state.store.get::<D>(D::Id::from(id)).await {
            Ok(stored) => Some(stored),
            Err(StoreError::NotFound) => None,
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    let page = FormPage {
        form: D::FORM,
        record_id: stored.as_ref().map(|s| s.id.into()),
        record: stored.as_ref().map(D::detail).transpose()?,
        missing: query.id.is_some() && stored.is_none(),
    };
    render(&state.templates, "form.html", &page)
}

pub async fn print_packing_list(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<PackingListId>, PathRejection>,
) -> Result<Html<String>, ApiError> {
    let Path(id) = id?;
    let stored: Stored<PackingList> = state.store.get(id).await?;

    let view = stored.document.print_view();
    state.snapshots.write_logged(PACKING_LIST_SNAPSHOT, &view).await;
    render(&state.templates, "packing_list_print.html", &view)
}

pub async fn print_proforma_invoice(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<ProformaInvoiceId>, PathRejection>,
) -> Result<Html<String>, ApiError> {
    let Path(id) = id?;
    let stored: Stored<ProformaInvoice> = state.store.get(id).await?;

    let view = ProformaPrintView::new(&stored.document, stored.created_at);
    render(&state.templates, "proforma_invoice_print.html", &view)
}

pub async fn print_export_invoice(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<ExportInvoiceId>, PathRejection>,
) -> Result<Html<String>, ApiError> {
    let Path(id) = id?;
    let stored: Stored<ExportInvoice> = state.store.get(id).await?;

    let prepared = state.layout.prepare(&stored.document);
    state.snapshots.write_logged(EXPORT_INVOICE_SNAPSHOT, &prepared).await;
    render(&state.templates, "export_invoice_print.html", &prepared)
}
